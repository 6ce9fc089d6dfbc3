//! Escaping user text for overlay markup.

/// Append `text` to `out` with `&`, `<` and `>` escaped.
///
/// User text can then never open or close a tagged element, and renders
/// as exactly the characters typed.
pub fn escape_text(out: &mut String, text: &str) {
    escape_into(out, text, false);
}

/// Like [`escape_text`], also escaping `"` for double-quoted attributes.
pub fn escape_attr(out: &mut String, text: &str) {
    escape_into(out, text, true);
}

fn escape_into(out: &mut String, text: &str, quotes: bool) {
    let mut last = 0;
    for (i, b) in text.bytes().enumerate() {
        let escaped = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' if quotes => "&quot;",
            _ => continue,
        };
        out.push_str(&text[last..i]);
        out.push_str(escaped);
        last = i + 1;
    }
    out.push_str(&text[last..]);
}
