//! Error types for highlight overlay operations.

use miette::Diagnostic;
use thiserror::Error;

/// Usage errors: the caller handed us something malformed.
///
/// None of these are recoverable by retrying. They indicate a bug in the
/// embedding application and are surfaced at the operation that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[non_exhaustive]
pub enum HighlightError {
    /// A tag starts after it ends.
    #[error("highlight tag with indices [{start}, {end}] cannot start after it ends")]
    #[diagnostic(code(highlight::range_order))]
    RangeOrder { start: usize, end: usize },

    /// A tag overlaps a tag that was already accepted.
    #[error(
        "highlight tag with indices [{start}, {end}] overlaps with tag [{other_start}, {other_end}]"
    )]
    #[diagnostic(
        code(highlight::overlap),
        help("tags may touch at their endpoints but must not share any characters")
    )]
    Overlap {
        start: usize,
        end: usize,
        other_start: usize,
        other_end: usize,
    },

    /// The bound target is not a multi-line text input.
    #[error("text input highlight must be bound to a textarea, received a {element}")]
    #[diagnostic(code(highlight::invalid_target))]
    InvalidTarget { element: String },
}

pub type Result<T> = std::result::Result<T, HighlightError>;
