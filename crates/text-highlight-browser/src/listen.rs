//! Disposable DOM subscriptions.
//!
//! Every listener the overlay installs is wrapped in a [`Listener`] so the
//! component can hold them in one `Subscriptions` set and tear them all
//! down together.

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, ResizeObserver};

use text_highlight_core::{CancellationToken, Disposable};

/// One installed subscription. Dropping it unsubscribes.
pub enum Listener {
    Event(EventListener),
    Resize(ResizeObserverHandle),
}

impl Disposable for Listener {
    fn dispose(self: Box<Self>) {
        // Dropping removes the listener or disconnects the observer.
        drop(self);
    }
}

/// Listen for `event_type` on `target`.
pub fn listen(
    target: &EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> Listener {
    Listener::Event(EventListener::new(target, event_type, callback))
}

/// A `ResizeObserver` watching one element.
pub struct ResizeObserverHandle {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `callback` whenever `element`'s box changes size.
///
/// The report every observer makes right after `observe` is skipped; only
/// later size changes get through.
pub fn observe_resize(
    element: &Element,
    mut callback: impl FnMut() + 'static,
) -> Result<Listener, JsValue> {
    let mut observed = false;
    let callback = Closure::<dyn FnMut()>::new(move || {
        if observed {
            callback();
        } else {
            observed = true;
        }
    });
    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
    observer.observe(element);
    Ok(Listener::Resize(ResizeObserverHandle {
        observer,
        _callback: callback,
    }))
}

/// A callback deferred to the next tick that can be positively cancelled.
///
/// Cancelling after the callback ran is harmless.
pub struct DeferredSync {
    timeout: Option<Timeout>,
    token: CancellationToken,
}

impl DeferredSync {
    /// Run `callback` on the next tick unless cancelled first.
    pub fn schedule(callback: impl FnOnce() + 'static) -> Self {
        let token = CancellationToken::new();
        let guard = token.clone();
        let timeout = Timeout::new(0, move || {
            if !guard.is_cancelled() {
                callback();
            }
        });
        Self {
            timeout: Some(timeout),
            token,
        }
    }

    /// Cancel the callback. A callback that already ran is unaffected.
    pub fn cancel(&mut self) {
        self.token.cancel();
        if let Some(timeout) = self.timeout.take() {
            // Clears the browser timer; the returned closure is dropped unrun.
            drop(timeout.cancel());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
