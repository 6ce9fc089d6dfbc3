//! Caller-supplied tags.

use std::ops::Range;

use smol_str::SmolStr;

/// An annotation over `[start, end)` of the tracked text.
///
/// Offsets are in the overlay's configured `OffsetUnit`. A tag owns no
/// text; what it covers is re-read from the live value on every render.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag<T = ()> {
    pub start: usize,
    pub end: usize,
    /// Overrides the overlay's default tag class.
    pub css_class: Option<SmolStr>,
    /// Opaque caller data, handed back on interactions.
    pub payload: T,
}

impl Tag<()> {
    /// Create a tag without payload.
    pub fn new(start: usize, end: usize) -> Self {
        Self::with_payload(start, end, ())
    }
}

impl<T> Tag<T> {
    pub fn with_payload(start: usize, end: usize, payload: T) -> Self {
        Self {
            start,
            end,
            css_class: None,
            payload,
        }
    }

    /// Set the class override.
    pub fn with_css_class(mut self, class: impl Into<SmolStr>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the two tags share at least one position.
    ///
    /// Touching endpoints do not overlap. Identical non-empty ranges do.
    pub fn overlaps<U>(&self, other: &Tag<U>) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Class to render this tag with: its own override, else `default`.
    pub fn resolved_class<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        self.css_class.as_deref().or(default)
    }
}
