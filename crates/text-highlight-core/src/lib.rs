//! text-highlight-core: highlight overlays for plain text inputs, without a UI toolkit.
//!
//! This crate provides:
//! - `Tag` and `build_segments` - splitting text into plain and tagged runs
//! - `render_markup` - overlay markup with addressable tag elements
//! - `StyleDescriptor` - the style properties mirrored from the input
//! - `RectCache` and `HoverTracker` - hit testing pointer events back to tags
//! - `Overlay<P>` - the composition root, generic over an `OverlayPlatform`

pub mod config;
pub mod error;
pub mod escape;
pub mod hover;
pub mod offset;
pub mod overlay;
pub mod platform;
pub mod rect;
pub mod render;
pub mod segment;
pub mod style;
pub mod tag;
pub mod task;

pub use config::{CONTAINER_CLASS, INPUT_CLASS, OVERLAY_CLASS, OverlayConfig, TAG_CLASS};
pub use error::{HighlightError, Result};
pub use hover::{HoverTracker, InteractionKind, TagHit, TagInteraction};
pub use offset::{OffsetUnit, byte_index, byte_range, text_len};
pub use overlay::{Overlay, PlatformInteraction};
pub use platform::OverlayPlatform;
pub use rect::{CachedTag, RectCache, TagRect};
pub use render::{TAG_ID_ATTR, TRAILING_PAD, parse_tag_id, render_markup};
pub use segment::{Segment, build_segments};
pub use smol_str::SmolStr;
pub use style::{STYLE_PROPERTIES, StyleDescriptor};
pub use tag::Tag;
pub use task::{CancellationToken, Disposable, Subscriptions};
