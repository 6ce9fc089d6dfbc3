//! Platform abstraction for the overlay.
//!
//! The overlay logic never touches a UI toolkit directly. A platform binds
//! one target text input to one overlay surface and performs the reads and
//! writes the composition root asks for. The browser implementation lives
//! in `text-highlight-browser`; tests use an in-memory fake.

use crate::rect::TagRect;
use crate::style::StyleDescriptor;

/// One target input paired with one overlay surface.
pub trait OverlayPlatform {
    /// Handle to a rendered tag element.
    type Element: Clone;
    /// Raw pointer event handed back to the embedder.
    type Event: Clone;

    /// Live value of the target input.
    fn input_value(&self) -> String;

    /// Computed style of the target input, restricted to mirrored properties.
    fn read_input_style(&self) -> StyleDescriptor;

    /// Make `style` the overlay's own inline style.
    fn apply_overlay_style(&self, style: &StyleDescriptor);

    /// Replace the overlay's content with `markup`.
    fn set_overlay_markup(&self, markup: &str);

    /// Rendered tag elements in render order, each with its tag index.
    fn tag_elements(&self) -> Vec<(usize, Self::Element)>;

    /// Current viewport rectangle of a rendered tag element.
    fn bounding_rect(&self, element: &Self::Element) -> TagRect;

    /// Copy the input's scroll offset onto the overlay.
    fn sync_scroll(&self);
}
