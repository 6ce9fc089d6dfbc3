//! Splitting text into plain and tagged segments.

use crate::error::{HighlightError, Result};
use crate::offset::{OffsetUnit, byte_range};
use crate::tag::Tag;

/// A contiguous run of the tracked text.
///
/// Segments borrow from the text they were built from and are rebuilt
/// wholesale on every change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    /// Text covered by the tag at `index` in the caller's tag list.
    Tagged { index: usize, text: &'a str },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(text) | Segment::Tagged { text, .. } => text,
        }
    }

    pub fn tag_index(&self) -> Option<usize> {
        match *self {
            Segment::Plain(_) => None,
            Segment::Tagged { index, .. } => Some(index),
        }
    }
}

/// Split `text` into segments covering it exactly once, end to end.
///
/// Tags are walked in ascending `(start, end)` order. A tag that starts
/// after it ends, or that overlaps a tag already accepted in this pass,
/// fails the whole build. A tag whose offsets no longer fit the text (the
/// text changed under a stale tag set) is skipped for this pass.
///
/// The output always ends with a plain segment, possibly empty.
pub fn build_segments<'a, T>(
    text: &'a str,
    tags: &[Tag<T>],
    unit: OffsetUnit,
) -> Result<Vec<Segment<'a>>> {
    let mut order: Vec<usize> = (0..tags.len()).collect();
    // Stable, so equal ranges keep caller order. Empty tags sort before
    // a non-empty tag that starts at the same offset.
    order.sort_by_key(|&i| (tags[i].start, tags[i].end));

    let mut accepted: Vec<&Tag<T>> = Vec::with_capacity(tags.len());
    let mut segments = Vec::with_capacity(tags.len() * 2 + 1);
    let mut previous_end = 0;

    for index in order {
        let tag = &tags[index];
        if tag.start > tag.end {
            return Err(HighlightError::RangeOrder {
                start: tag.start,
                end: tag.end,
            });
        }

        if let Some(other) = accepted.iter().find(|other| other.overlaps(tag)) {
            return Err(HighlightError::Overlap {
                start: tag.start,
                end: tag.end,
                other_start: other.start,
                other_end: other.end,
            });
        }

        let Some(range) = byte_range(text, tag.start, tag.end, unit) else {
            tracing::trace!(
                index,
                start = tag.start,
                end = tag.end,
                "skipping tag that no longer fits the text"
            );
            continue;
        };
        debug_assert!(previous_end <= range.start);

        segments.push(Segment::Plain(&text[previous_end..range.start]));
        segments.push(Segment::Tagged {
            index,
            text: &text[range.clone()],
        });
        previous_end = range.end;
        accepted.push(tag);
    }

    segments.push(Segment::Plain(&text[previous_end..]));
    Ok(segments)
}
