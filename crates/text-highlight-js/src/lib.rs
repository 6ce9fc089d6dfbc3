//! WASM bindings for text input highlight overlays.
//!
//! Provides the highlight component for JavaScript/TypeScript apps:
//! `new JsTextHighlight(overlayElement, options)`, then `setTags`, the
//! `onTag*` callbacks and `bind(textarea)`.

mod highlight;
mod types;

pub use highlight::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Embedders may have installed their own subscriber already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}
