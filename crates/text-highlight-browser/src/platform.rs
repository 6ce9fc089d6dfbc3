//! DOM implementation of `OverlayPlatform`.

use web_sys::{Element, HtmlElement, HtmlTextAreaElement, MouseEvent};

use text_highlight_core::{OverlayPlatform, StyleDescriptor, TAG_ID_ATTR, TagRect, parse_tag_id};

use crate::style_mirror::{apply_style, computed_style};

/// A textarea bound to the overlay element drawn over it.
#[derive(Clone, Debug)]
pub struct DomPlatform {
    input: HtmlTextAreaElement,
    overlay: HtmlElement,
}

impl DomPlatform {
    pub fn new(input: HtmlTextAreaElement, overlay: HtmlElement) -> Self {
        Self { input, overlay }
    }

    pub fn input(&self) -> &HtmlTextAreaElement {
        &self.input
    }

    pub fn overlay(&self) -> &HtmlElement {
        &self.overlay
    }
}

impl OverlayPlatform for DomPlatform {
    type Element = Element;
    type Event = MouseEvent;

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn read_input_style(&self) -> StyleDescriptor {
        computed_style(&self.input)
    }

    fn apply_overlay_style(&self, style: &StyleDescriptor) {
        apply_style(&self.overlay, style);
    }

    fn set_overlay_markup(&self, markup: &str) {
        self.overlay.set_inner_html(markup);
    }

    fn tag_elements(&self) -> Vec<(usize, Element)> {
        let selector = format!("[{TAG_ID_ATTR}]");
        let node_list = match self.overlay.query_selector_all(&selector) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to query rendered tags: {:?}", e);
                return Vec::new();
            }
        };

        let mut elements = Vec::with_capacity(node_list.length() as usize);
        for i in 0..node_list.length() {
            let Some(node) = node_list.item(i) else {
                continue;
            };
            let Some(element) = wasm_bindgen::JsCast::dyn_ref::<Element>(&node) else {
                continue;
            };
            let Some(index) = element
                .get_attribute(TAG_ID_ATTR)
                .as_deref()
                .and_then(parse_tag_id)
            else {
                continue;
            };
            elements.push((index, element.clone()));
        }
        elements
    }

    fn bounding_rect(&self, element: &Element) -> TagRect {
        let rect = element.get_bounding_client_rect();
        TagRect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
    }

    fn sync_scroll(&self) {
        self.overlay.set_scroll_top(self.input.scroll_top());
    }
}
