//! Overlay configuration.

use serde::Deserialize;
use smol_str::SmolStr;

use crate::offset::OffsetUnit;

/// Marker class for the overlay element.
pub const OVERLAY_CLASS: &str = "text-highlight-element";
/// Class carried by every rendered tag element.
pub const TAG_CLASS: &str = "text-highlight-tag";
/// Marker class for the embedder's positioning container.
pub const CONTAINER_CLASS: &str = "text-input-highlight-container";
/// Marker class for the tracked text input.
pub const INPUT_CLASS: &str = "text-input-element";

/// Configuration for a highlight overlay.
///
/// Deserializable so JS embedders can pass a plain object; every field has
/// a default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Style class for tags that carry no override of their own.
    pub tag_css_class: Option<SmolStr>,
    /// Unit the tag offsets are expressed in.
    pub offset_unit: OffsetUnit,
    pub overlay_class: SmolStr,
    pub tag_class: SmolStr,
    pub container_class: SmolStr,
    pub input_class: SmolStr,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tag_css_class: None,
            offset_unit: OffsetUnit::default(),
            overlay_class: SmolStr::new_static(OVERLAY_CLASS),
            tag_class: SmolStr::new_static(TAG_CLASS),
            container_class: SmolStr::new_static(CONTAINER_CLASS),
            input_class: SmolStr::new_static(INPUT_CLASS),
        }
    }
}

impl OverlayConfig {
    /// Set the default tag style class.
    pub fn with_tag_css_class(mut self, class: impl Into<SmolStr>) -> Self {
        self.tag_css_class = Some(class.into());
        self
    }

    /// Set the offset unit.
    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = unit;
        self
    }
}
