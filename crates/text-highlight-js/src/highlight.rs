//! JsTextHighlight - the highlight component wrapped for JavaScript.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use text_highlight_browser::{HighlightError, SmolStr, TagMouseEvent, TextInputHighlight};

use crate::types::{JsOverlayConfig, JsTag};

fn js_error(e: HighlightError) -> JsError {
    JsError::new(&e.to_string())
}

/// A highlight overlay drawn over one textarea.
///
/// Register interaction callbacks before calling `bind`; mouse listeners
/// are only installed for interactions someone listens to.
#[wasm_bindgen]
pub struct JsTextHighlight {
    inner: TextInputHighlight<JsValue>,
}

#[wasm_bindgen]
impl JsTextHighlight {
    /// Use `element` as the overlay. `config` is an optional options object.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, config: JsValue) -> Result<JsTextHighlight, JsError> {
        let config = JsOverlayConfig::from_js(config)?.into_config();
        Ok(Self {
            inner: TextInputHighlight::new(element, config),
        })
    }

    /// Replace the tag set.
    ///
    /// Each tag is `{ indices: { start, end }, cssClass? }` plus any data of
    /// your own; callbacks receive the same object back.
    #[wasm_bindgen(js_name = setTags)]
    pub fn set_tags(&self, tags: Array) -> Result<(), JsError> {
        let tags = tags
            .iter()
            .map(JsTag::parse)
            .collect::<Result<Vec<_>, _>>()?;
        self.inner.set_tags(tags).map_err(js_error)
    }

    /// Default class for tags without their own `cssClass`.
    #[wasm_bindgen(js_name = setTagCssClass)]
    pub fn set_tag_css_class(&self, class: Option<String>) -> Result<(), JsError> {
        self.inner
            .set_tag_css_class(class.map(SmolStr::from))
            .map_err(js_error)
    }

    /// Highlight `value` instead of the textarea's value; `undefined` reverts.
    #[wasm_bindgen(js_name = setTextInputValue)]
    pub fn set_text_input_value(&self, value: Option<String>) -> Result<(), JsError> {
        self.inner.set_text_input_value(value).map_err(js_error)
    }

    /// Track `target`, which must be a textarea.
    pub fn bind(&self, target: &Element) -> Result<(), JsError> {
        self.inner.bind(target).map_err(js_error)
    }

    pub fn unbind(&self) {
        self.inner.unbind();
    }

    pub fn destroy(&self) {
        self.inner.destroy();
    }

    /// Re-mirror the textarea's style and re-render.
    pub fn refresh(&self) -> Result<(), JsError> {
        self.inner.refresh().map_err(js_error)
    }

    /// Mark `element` as the container, with this overlay's class names.
    #[wasm_bindgen(js_name = markContainer)]
    pub fn mark_container(&self, element: &Element) {
        text_highlight_browser::mark_container(element, &self.inner.config());
    }

    /// Mark `element` as a tracked textarea, with this overlay's class names.
    #[wasm_bindgen(js_name = markTextInput)]
    pub fn mark_text_input(&self, element: &Element) -> bool {
        text_highlight_browser::mark_text_input(element, &self.inner.config())
    }

    #[wasm_bindgen(getter, js_name = isBound)]
    pub fn is_bound(&self) -> bool {
        self.inner.is_bound()
    }

    #[wasm_bindgen(js_name = onTagClick)]
    pub fn on_tag_click(&self, callback: Function) {
        self.inner.on_tag_click(forward(callback, "tagClick"));
    }

    #[wasm_bindgen(js_name = onTagMouseEnter)]
    pub fn on_tag_mouse_enter(&self, callback: Function) {
        self.inner.on_tag_mouse_enter(forward(callback, "tagMouseEnter"));
    }

    #[wasm_bindgen(js_name = onTagMouseLeave)]
    pub fn on_tag_mouse_leave(&self, callback: Function) {
        self.inner.on_tag_mouse_leave(forward(callback, "tagMouseLeave"));
    }

    /// Receive errors raised while syncing in the background.
    ///
    /// Without a callback they are thrown from the event handler.
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        self.inner.on_error(move |e| {
            let error = js_sys::Error::new(&e.to_string());
            if let Err(err) = callback.call1(&JsValue::NULL, &error) {
                tracing::warn!("onError callback threw: {:?}", err);
            }
        });
    }
}

/// Adapt a JS callback to receive `{ tag, target, event }`.
fn forward(callback: Function, name: &'static str) -> impl Fn(TagMouseEvent<JsValue>) + 'static {
    move |interaction| {
        let payload = Object::new();
        let target: &JsValue = &interaction.target;
        let event: &JsValue = &interaction.event;
        let set = |key: &str, value: &JsValue| Reflect::set(&payload, &JsValue::from_str(key), value);
        let result = set("tag", &interaction.tag.payload)
            .and_then(|_| set("target", target))
            .and_then(|_| set("event", event));
        if let Err(e) = result {
            tracing::warn!("Failed to build {} payload: {:?}", name, e);
            return;
        }
        if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
            tracing::warn!("{} callback threw: {:?}", name, e);
        }
    }
}

/// Mark `element` as the container of a textarea and its overlay.
///
/// `config` takes the same options as the `JsTextHighlight` constructor.
#[wasm_bindgen(js_name = markContainer)]
pub fn mark_container(element: &Element, config: JsValue) -> Result<(), JsError> {
    let config = JsOverlayConfig::from_js(config)?.into_config();
    text_highlight_browser::mark_container(element, &config);
    Ok(())
}

/// Mark `element` as a tracked textarea. Other elements are left alone.
#[wasm_bindgen(js_name = markTextInput)]
pub fn mark_text_input(element: &Element, config: JsValue) -> Result<bool, JsError> {
    let config = JsOverlayConfig::from_js(config)?.into_config();
    Ok(text_highlight_browser::mark_text_input(element, &config))
}
