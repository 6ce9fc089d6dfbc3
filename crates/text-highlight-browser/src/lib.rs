//! Browser DOM layer for text input highlight overlays.
//!
//! This crate drives a `text-highlight-core` overlay from a real textarea.
//! It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `component`: `TextInputHighlight`, the embeddable component
//! - `platform`: `OverlayPlatform` over a textarea and its overlay element
//! - `style_mirror`: computed style copied from textarea to overlay
//! - `listen`: disposable event listeners, resize observers and deferred syncs
//! - `marker`: marker classes for the container and the tracked textarea
//!
//! # Re-exports
//!
//! This crate re-exports `text-highlight-core` for convenience, so consumers
//! only need to depend on `text-highlight-browser`.

// Re-export core crate
pub use text_highlight_core;
pub use text_highlight_core::*;

pub mod component;
pub mod listen;
pub mod marker;
pub mod platform;
pub mod style_mirror;

pub use component::{TagMouseEvent, TextInputHighlight};
pub use listen::{DeferredSync, Listener};
pub use marker::{mark_container, mark_text_input};
pub use platform::DomPlatform;
