//! Types exposed to JavaScript via wasm-bindgen.

use serde::Deserialize;
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use text_highlight_core::{OffsetUnit, OverlayConfig, SmolStr, Tag};

/// Character range of a tag, in JS string indices by default.
#[derive(Debug, Clone, Copy, Deserialize, Tsify)]
pub struct JsTagIndices {
    pub start: usize,
    pub end: usize,
}

/// The fields of a JS tag object the overlay reads.
///
/// Anything else on the object (`data`, ...) is left alone and the object
/// itself is handed back on interactions.
#[derive(Debug, Clone, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct JsTag {
    pub indices: JsTagIndices,
    #[serde(default)]
    #[tsify(optional)]
    pub css_class: Option<String>,
}

impl JsTag {
    /// Parse `value` into a tag whose payload is `value` itself.
    pub fn parse(value: JsValue) -> Result<Tag<JsValue>, JsError> {
        let parsed: JsTag = serde_wasm_bindgen::from_value(value.clone())
            .map_err(|e| JsError::new(&format!("Invalid highlight tag: {}", e)))?;
        let mut tag = Tag::with_payload(parsed.indices.start, parsed.indices.end, value);
        tag.css_class = parsed.css_class.map(SmolStr::from);
        Ok(tag)
    }
}

/// Overlay options. Offsets default to UTF-16 so they match JS strings.
#[derive(Debug, Clone, Default, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct JsOverlayConfig {
    #[tsify(optional)]
    pub tag_css_class: Option<String>,
    #[tsify(optional, type = "\"char\" | \"utf16\"")]
    pub offset_unit: Option<OffsetUnit>,
    #[tsify(optional)]
    pub overlay_class: Option<String>,
    #[tsify(optional)]
    pub tag_class: Option<String>,
    #[tsify(optional)]
    pub container_class: Option<String>,
    #[tsify(optional)]
    pub input_class: Option<String>,
}

impl JsOverlayConfig {
    /// Read options from an optional JS object.
    pub fn from_js(value: JsValue) -> Result<Self, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid highlight config: {}", e)))
    }

    pub fn into_config(self) -> OverlayConfig {
        let defaults = OverlayConfig::default();
        OverlayConfig {
            tag_css_class: self.tag_css_class.map(SmolStr::from),
            offset_unit: self.offset_unit.unwrap_or(OffsetUnit::Utf16),
            overlay_class: self.overlay_class.map_or(defaults.overlay_class, SmolStr::from),
            tag_class: self.tag_class.map_or(defaults.tag_class, SmolStr::from),
            container_class: self.container_class.map_or(defaults.container_class, SmolStr::from),
            input_class: self.input_class.map_or(defaults.input_class, SmolStr::from),
        }
    }
}
