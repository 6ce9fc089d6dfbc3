//! Style properties mirrored from the text input onto the overlay.
//!
//! The overlay only lines up with the input if its text wraps the same way,
//! so every property that affects box size or text layout is copied across.
//! Nothing else is.

/// CSS properties copied from the input's computed style.
pub const STYLE_PROPERTIES: &[&str] = &[
    "direction",
    "box-sizing",
    // Excludes the scrollbar in most engines, so wrapping matches.
    "width",
    "height",
    "overflow-x",
    "overflow-y",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-style",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "font-style",
    "font-variant",
    "font-weight",
    "font-stretch",
    "font-size",
    "font-size-adjust",
    "line-height",
    "font-family",
    "text-align",
    "text-transform",
    "text-indent",
    "text-decoration",
    "letter-spacing",
    "word-spacing",
    "tab-size",
    "-moz-tab-size",
];

/// Computed values for [`STYLE_PROPERTIES`], in list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDescriptor {
    entries: Vec<(&'static str, String)>,
}

impl StyleDescriptor {
    /// Build a descriptor by looking up every mirrored property.
    ///
    /// Properties the lookup has no value for (or an empty one) are left
    /// out; engines report unsupported properties that way.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let entries = STYLE_PROPERTIES
            .iter()
            .filter_map(|&name| {
                let value = lookup(name)?;
                (!value.is_empty()).then_some((name, value))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as an inline `style` attribute value.
    pub fn to_inline_css(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("; ");
        }
        out.truncate(out.trim_end().len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_only_mirrored_properties() {
        let style = StyleDescriptor::from_lookup(|name| Some(format!("v:{name}")));
        assert_eq!(style.len(), STYLE_PROPERTIES.len());
        assert_eq!(style.get("font-size"), Some("v:font-size"));
        assert_eq!(style.get("-moz-tab-size"), Some("v:-moz-tab-size"));
        assert_eq!(style.get("color"), None);
    }

    #[test]
    fn drops_empty_values() {
        let style = StyleDescriptor::from_lookup(|name| match name {
            "width" => Some("120px".into()),
            "height" => Some(String::new()),
            _ => None,
        });
        assert_eq!(style.len(), 1);
        assert_eq!(style.to_inline_css(), "width: 120px;");
    }

    #[test]
    fn inline_css_keeps_list_order() {
        let style = StyleDescriptor::from_lookup(|name| match name {
            "line-height" => Some("20px".into()),
            "direction" => Some("rtl".into()),
            _ => None,
        });
        assert_eq!(style.to_inline_css(), "direction: rtl; line-height: 20px;");
    }
}
