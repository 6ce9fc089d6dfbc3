//! Marker classes for the elements around an overlay.
//!
//! Embedders position the overlay with CSS keyed on these classes: the
//! container wraps both the textarea and the overlay, the textarea is
//! marked as the tracked element.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTextAreaElement};

use text_highlight_core::OverlayConfig;

/// Mark `element` as the container holding the input and its overlay.
pub fn mark_container(element: &Element, config: &OverlayConfig) {
    if let Err(e) = element.class_list().add_1(&config.container_class) {
        tracing::warn!("Failed to mark highlight container: {:?}", e);
    }
}

/// Mark `element` as the tracked text input.
///
/// Only textareas are marked. Returns whether the class was added.
pub fn mark_text_input(element: &Element, config: &OverlayConfig) -> bool {
    if !element.is_instance_of::<HtmlTextAreaElement>() {
        return false;
    }
    match element.class_list().add_1(&config.input_class) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to mark text input: {:?}", e);
            false
        }
    }
}
