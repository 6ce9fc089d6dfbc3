//! Mirroring the target input's computed style onto the overlay.

use web_sys::{Element, HtmlElement};

use text_highlight_core::{STYLE_PROPERTIES, StyleDescriptor};

/// Read the mirrored properties from `element`'s computed style.
///
/// Returns an empty descriptor if the element is not attached to a
/// window, which only happens for detached nodes.
pub fn computed_style(element: &Element) -> StyleDescriptor {
    let Some(window) = web_sys::window() else {
        return StyleDescriptor::default();
    };
    let declaration = match window.get_computed_style(element) {
        Ok(Some(declaration)) => declaration,
        Ok(None) => return StyleDescriptor::default(),
        Err(e) => {
            tracing::warn!("getComputedStyle failed: {:?}", e);
            return StyleDescriptor::default();
        }
    };

    StyleDescriptor::from_lookup(|name| declaration.get_property_value(name).ok())
}

/// Make `style` the inline style of `overlay`.
///
/// Mirrored properties missing from `style` are removed, so values from
/// an earlier target never linger.
pub fn apply_style(overlay: &HtmlElement, style: &StyleDescriptor) {
    let declaration = overlay.style();
    for &name in STYLE_PROPERTIES {
        let result = match style.get(name) {
            Some(value) => declaration.set_property(name, value),
            None => declaration.remove_property(name).map(|_| ()),
        };
        if let Err(e) = result {
            tracing::trace!(property = name, "Could not mirror style property: {:?}", e);
        }
    }
}
