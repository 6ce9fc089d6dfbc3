//! Turning segments into overlay markup.

use crate::config::OverlayConfig;
use crate::escape::{escape_attr, escape_text};
use crate::segment::Segment;
use crate::tag::Tag;

/// Attribute carrying a tagged element's index in the caller's tag list.
pub const TAG_ID_ATTR: &str = "data-tag-id";

/// Appended after the last segment so a trailing newline still has height.
pub const TRAILING_PAD: &str = "&nbsp;";

/// Render segments as overlay markup.
///
/// Tagged segments become `<span>`s carrying the tag class, the resolved
/// style class and a [`TAG_ID_ATTR`] holding the tag's index in `tags`.
pub fn render_markup<T>(segments: &[Segment<'_>], tags: &[Tag<T>], config: &OverlayConfig) -> String {
    let capacity = segments.iter().map(|s| s.text().len()).sum::<usize>() + segments.len() * 48;
    let mut out = String::with_capacity(capacity);

    for segment in segments {
        match *segment {
            Segment::Plain(text) => escape_text(&mut out, text),
            Segment::Tagged { index, text } => {
                out.push_str("<span class=\"");
                escape_attr(&mut out, &config.tag_class);
                let default = config.tag_css_class.as_deref();
                if let Some(class) = tags.get(index).and_then(|t| t.resolved_class(default)) {
                    out.push(' ');
                    escape_attr(&mut out, class);
                }
                out.push_str("\" ");
                out.push_str(TAG_ID_ATTR);
                out.push_str("=\"");
                out.push_str(&index.to_string());
                out.push_str("\">");
                escape_text(&mut out, text);
                out.push_str("</span>");
            }
        }
    }

    out.push_str(TRAILING_PAD);
    out
}

/// Parse the tag index out of a [`TAG_ID_ATTR`] value.
pub fn parse_tag_id(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::offset::OffsetUnit;
    use crate::segment::build_segments;

    fn render(text: &str, tags: &[Tag], config: &OverlayConfig) -> String {
        let segments = build_segments(text, tags, OffsetUnit::Char).unwrap();
        render_markup(&segments, tags, config)
    }

    /// Strip elements and decode entities, the way a browser shows the text.
    fn visible_text(markup: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in markup.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&nbsp;", "\u{a0}")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    #[test]
    fn renders_mentions_with_default_class() {
        let config = OverlayConfig::default().with_tag_css_class("mention");
        let tags = [Tag::new(6, 10), Tag::new(15, 21).with_css_class("bg-blue")];
        assert_snapshot!(
            render("hello @bob and @alice", &tags, &config),
            @r#"hello <span class="text-highlight-tag mention" data-tag-id="0">@bob</span> and <span class="text-highlight-tag bg-blue" data-tag-id="1">@alice</span>&nbsp;"#
        );
    }

    #[test]
    fn omits_class_when_none_resolves() {
        let config = OverlayConfig::default();
        assert_snapshot!(
            render("ab", &[Tag::new(0, 1)], &config),
            @r#"<span class="text-highlight-tag" data-tag-id="0">a</span>b&nbsp;"#
        );
    }

    #[test]
    fn markup_in_text_cannot_open_elements() {
        let config = OverlayConfig::default();
        let markup = render("<b>x</b> <i>", &[Tag::new(9, 12)], &config);
        assert_snapshot!(
            markup,
            @r#"&lt;b&gt;x&lt;/b&gt; <span class="text-highlight-tag" data-tag-id="0">&lt;i&gt;</span>&nbsp;"#
        );
    }

    #[test]
    fn visible_text_round_trips() {
        let config = OverlayConfig::default().with_tag_css_class("t");
        for text in ["plain", "a < b > c", "<<>>", "&lt; literal", "x<span>y</span>z"] {
            let len = text.chars().count();
            let markup = render(text, &[Tag::new(1, len - 1)], &config);
            assert_eq!(visible_text(&markup), format!("{text}\u{a0}"));
        }
    }

    #[test]
    fn parses_tag_ids() {
        assert_eq!(parse_tag_id("12"), Some(12));
        assert_eq!(parse_tag_id("x"), None);
    }
}
