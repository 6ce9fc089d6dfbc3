//! Conversion from tag offsets to byte indices.
//!
//! Tags address text by offset, never by byte. Which offset depends on
//! where the tags came from: Rust callers count `char`s, JS callers count
//! UTF-16 code units (string indices, `selectionStart`, ...).

use std::ops::Range;

use serde::Deserialize;

/// Unit that tag offsets are measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values.
    #[default]
    Char,
    /// UTF-16 code units.
    Utf16,
}

impl OffsetUnit {
    fn width(self, c: char) -> usize {
        match self {
            OffsetUnit::Char => 1,
            OffsetUnit::Utf16 => c.len_utf16(),
        }
    }
}

/// Length of `text` in `unit`s.
pub fn text_len(text: &str, unit: OffsetUnit) -> usize {
    match unit {
        OffsetUnit::Char => text.chars().count(),
        OffsetUnit::Utf16 => text.encode_utf16().count(),
    }
}

/// Byte index of `offset`, or `None` if it lies past the end of `text` or
/// inside a character (a split surrogate pair).
pub fn byte_index(text: &str, offset: usize, unit: OffsetUnit) -> Option<usize> {
    let mut pos = 0;
    for (byte, c) in text.char_indices() {
        if pos == offset {
            return Some(byte);
        }
        if pos > offset {
            return None;
        }
        pos += unit.width(c);
    }
    (pos == offset).then_some(text.len())
}

/// Byte range for `start..end`, if both ends land on character boundaries.
pub fn byte_range(text: &str, start: usize, end: usize, unit: OffsetUnit) -> Option<Range<usize>> {
    let start = byte_index(text, start, unit)?;
    let end = byte_index(text, end, unit)?;
    (start <= end).then_some(start..end)
}
