//! The embeddable highlight component.
//!
//! `TextInputHighlight` owns one overlay element and drives it from a bound
//! textarea. Binding is a small state machine:
//!
//! ```text
//! Unbound --bind--> Pending --next tick--> Bound --unbind/bind/destroy--> Unbound
//! ```
//!
//! The first style/segment sync is deferred one tick so the textarea has
//! committed layout. Every listener is held in one `Subscriptions` set and
//! the pending sync in its own slot; both are torn down before anything new
//! is installed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlTextAreaElement, MouseEvent};

use text_highlight_core::{
    HighlightError, InteractionKind, Overlay, OverlayConfig, PlatformInteraction, Result, SmolStr,
    Subscriptions, Tag,
};

use crate::listen::{DeferredSync, listen, observe_resize};
use crate::marker::mark_text_input;
use crate::platform::DomPlatform;

/// A pointer interaction on a tag, as handed to the embedder.
#[derive(Clone, Debug)]
pub struct TagMouseEvent<T> {
    pub tag: Tag<T>,
    /// Rendered element of the tag.
    pub target: Element,
    pub event: MouseEvent,
}

type TagHandler<T> = Rc<dyn Fn(TagMouseEvent<T>)>;
type ErrorHandler = Rc<dyn Fn(HighlightError)>;

struct Handlers<T> {
    click: Option<TagHandler<T>>,
    mouse_enter: Option<TagHandler<T>>,
    mouse_leave: Option<TagHandler<T>>,
    error: Option<ErrorHandler>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            click: None,
            mouse_enter: None,
            mouse_leave: None,
            error: None,
        }
    }
}

struct Inner<T> {
    overlay: Overlay<DomPlatform, T>,
    element: HtmlElement,
    target: Option<HtmlTextAreaElement>,
    subscriptions: Subscriptions,
    pending: Option<DeferredSync>,
    window_resize: Option<crate::listen::Listener>,
    handlers: Handlers<T>,
    destroyed: bool,
}

type Shared<T> = Rc<RefCell<Inner<T>>>;

/// Highlight overlay for one textarea at a time.
///
/// Cloning gives another handle to the same component.
pub struct TextInputHighlight<T: 'static = ()> {
    inner: Shared<T>,
}

impl<T: 'static> Clone for TextInputHighlight<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> TextInputHighlight<T> {
    /// Take over `element` as the overlay surface.
    ///
    /// Marks it with the overlay class and starts following window resizes.
    pub fn new(element: HtmlElement, config: OverlayConfig) -> Self {
        if let Err(e) = element.class_list().add_1(&config.overlay_class) {
            tracing::warn!("Failed to mark overlay element: {:?}", e);
        }

        let inner = Rc::new(RefCell::new(Inner {
            overlay: Overlay::new(config),
            element,
            target: None,
            subscriptions: Subscriptions::new(),
            pending: None,
            window_resize: None,
            handlers: Handlers::default(),
            destroyed: false,
        }));

        if let Some(window) = web_sys::window() {
            let weak = Rc::downgrade(&inner);
            let listener = listen(&window, "resize", move |_: &Event| {
                if let Some(inner) = weak.upgrade() {
                    refresh(&inner);
                }
            });
            inner.borrow_mut().window_resize = Some(listener);
        }

        Self { inner }
    }

    /// Report tag clicks. Register before [`bind`](Self::bind).
    pub fn on_tag_click(&self, handler: impl Fn(TagMouseEvent<T>) + 'static) {
        self.inner.borrow_mut().handlers.click = Some(Rc::new(handler));
    }

    /// Report the start of a hover session. Register before [`bind`](Self::bind).
    pub fn on_tag_mouse_enter(&self, handler: impl Fn(TagMouseEvent<T>) + 'static) {
        self.inner.borrow_mut().handlers.mouse_enter = Some(Rc::new(handler));
    }

    /// Report the end of a hover session. Register before [`bind`](Self::bind).
    pub fn on_tag_mouse_leave(&self, handler: impl Fn(TagMouseEvent<T>) + 'static) {
        self.inner.borrow_mut().handlers.mouse_leave = Some(Rc::new(handler));
    }

    /// Receive usage errors raised inside browser callbacks.
    ///
    /// Without a handler they are thrown as JS exceptions.
    pub fn on_error(&self, handler: impl Fn(HighlightError) + 'static) {
        self.inner.borrow_mut().handlers.error = Some(Rc::new(handler));
    }

    /// Track `target`, replacing any previous target.
    ///
    /// Fails if `target` is not a textarea. The first sync runs on the next
    /// tick; errors from it go to [`on_error`](Self::on_error).
    pub fn bind(&self, target: &Element) -> Result<()> {
        let target: HtmlTextAreaElement =
            target
                .clone()
                .dyn_into()
                .map_err(|element: Element| HighlightError::InvalidTarget {
                    element: element.tag_name().to_lowercase(),
                })?;

        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            tracing::debug!("ignoring bind on destroyed highlight");
            return Ok(());
        }

        teardown(&mut inner);
        mark_text_input(&target, inner.overlay.config());
        inner.target = Some(target.clone());

        let weak = Rc::downgrade(&self.inner);
        let deferred = DeferredSync::schedule(move || {
            if let Some(inner) = weak.upgrade() {
                complete_bind(&inner, target);
            }
        });
        inner.pending = Some(deferred);
        Ok(())
    }

    /// Stop tracking the current target. Safe to call repeatedly.
    pub fn unbind(&self) {
        let mut inner = self.inner.borrow_mut();
        teardown(&mut inner);
        inner.target = None;
    }

    /// Tear down for good. Later binds and pending callbacks do nothing.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            return;
        }
        inner.destroyed = true;
        teardown(&mut inner);
        inner.target = None;
        inner.window_resize = None;
    }

    pub fn set_tags(&self, tags: Vec<Tag<T>>) -> Result<()> {
        self.inner.borrow_mut().overlay.set_tags(tags)
    }

    pub fn set_tag_css_class(&self, class: Option<SmolStr>) -> Result<()> {
        self.inner.borrow_mut().overlay.set_tag_css_class(class)
    }

    /// Render `value` instead of the textarea's own value; `None` reverts.
    pub fn set_text_input_value(&self, value: Option<String>) -> Result<()> {
        self.inner.borrow_mut().overlay.set_text_override(value)
    }

    /// Re-mirror style and re-render now.
    pub fn refresh(&self) -> Result<()> {
        self.inner.borrow_mut().overlay.refresh()
    }

    /// Whether the deferred sync has run for the current target.
    pub fn is_bound(&self) -> bool {
        self.inner.borrow().overlay.is_bound()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    pub fn target(&self) -> Option<HtmlTextAreaElement> {
        self.inner.borrow().target.clone()
    }

    pub fn config(&self) -> OverlayConfig {
        self.inner.borrow().overlay.config().clone()
    }

    pub fn element(&self) -> HtmlElement {
        self.inner.borrow().element.clone()
    }

    pub fn tags(&self) -> Vec<Tag<T>> {
        self.inner.borrow().overlay.tags().to_vec()
    }

    pub fn hovered_tag(&self) -> Option<usize> {
        self.inner.borrow().overlay.hovered_tag()
    }

    /// Number of live listeners on the current target.
    ///
    /// Zero until the deferred sync has run; the pending sync itself is not
    /// a listener.
    pub fn subscription_count(&self) -> usize {
        self.inner.borrow().subscriptions.len()
    }
}

fn teardown<T>(inner: &mut Inner<T>) {
    if let Some(mut pending) = inner.pending.take() {
        pending.cancel();
    }
    let disposed = inner.subscriptions.dispose_all();
    if inner.overlay.unbind().is_some() || disposed > 0 {
        tracing::debug!(disposed, "highlight unbound");
    }
}

/// Deferred half of `bind`: sync once, then subscribe to the target.
fn complete_bind<T: Clone + 'static>(shared: &Shared<T>, target: HtmlTextAreaElement) {
    let result = {
        let Ok(mut inner) = shared.try_borrow_mut() else {
            tracing::warn!("highlight busy, skipping deferred bind");
            return;
        };
        if inner.destroyed {
            return;
        }

        let platform = DomPlatform::new(target.clone(), inner.element.clone());
        let result = inner.overlay.bind(platform);
        subscribe(shared, &mut inner, &target);
        tracing::debug!(
            subscriptions = inner.subscriptions.len(),
            "highlight bound"
        );
        result
    };
    report(shared, result);
}

fn subscribe<T: Clone + 'static>(shared: &Shared<T>, inner: &mut Inner<T>, target: &HtmlTextAreaElement) {
    let weak = Rc::downgrade(shared);

    inner.subscriptions.push(listen(target, "input", {
        let weak = weak.clone();
        move |_: &Event| with_shared(&weak, |shared| {
            let result = shared.borrow_mut().overlay.render();
            report(shared, result);
        })
    }));

    inner.subscriptions.push(listen(target, "scroll", {
        let weak = weak.clone();
        move |_: &Event| with_shared(&weak, |shared| shared.borrow_mut().overlay.scroll())
    }));

    // The observer skips its initial report; the sync above already covered it.
    match observe_resize(target, {
        let weak = weak.clone();
        move || with_shared(&weak, refresh)
    }) {
        Ok(listener) => inner.subscriptions.push(listener),
        Err(e) => tracing::warn!("Failed to observe textarea resize: {:?}", e),
    }

    if inner.handlers.click.is_some() {
        inner.subscriptions.push(listen(target, "click", {
            let weak = weak.clone();
            move |event: &Event| {
                with_shared(&weak, |shared| {
                    let Some(event) = mouse_event(event) else {
                        return;
                    };
                    let (x, y) = client_point(&event);
                    let interaction = shared.borrow().overlay.click(x, y, event);
                    dispatch(shared, interaction);
                })
            }
        }));
    }

    if inner.handlers.mouse_enter.is_some() || inner.handlers.mouse_leave.is_some() {
        inner.subscriptions.push(listen(target, "mousemove", {
            let weak = weak.clone();
            move |event: &Event| {
                with_shared(&weak, |shared| {
                    let Some(event) = mouse_event(event) else {
                        return;
                    };
                    let (x, y) = client_point(&event);
                    let interaction = shared.borrow_mut().overlay.mouse_move(x, y, event);
                    dispatch(shared, interaction);
                })
            }
        }));

        inner.subscriptions.push(listen(target, "mouseleave", move |_: &Event| {
            with_shared(&weak, |shared| {
                let interaction = shared.borrow_mut().overlay.mouse_leave();
                dispatch(shared, interaction);
            })
        }));
    }
}

fn with_shared<T>(weak: &Weak<RefCell<Inner<T>>>, f: impl FnOnce(&Shared<T>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let destroyed = match shared.try_borrow() {
        Ok(inner) => inner.destroyed,
        Err(_) => {
            tracing::warn!("highlight busy, dropping re-entrant event");
            return;
        }
    };
    if !destroyed {
        f(&shared);
    }
}

fn refresh<T: Clone + 'static>(shared: &Shared<T>) {
    let result = match shared.try_borrow_mut() {
        Ok(mut inner) => inner.overlay.refresh(),
        Err(_) => return,
    };
    report(shared, result);
}

fn mouse_event(event: &Event) -> Option<MouseEvent> {
    event.dyn_ref::<MouseEvent>().cloned()
}

fn client_point(event: &MouseEvent) -> (f64, f64) {
    (event.client_x() as f64, event.client_y() as f64)
}

/// Hand an interaction to its handler with no borrow held, so the handler
/// may call back into the component.
fn dispatch<T: Clone + 'static>(
    shared: &Shared<T>,
    interaction: Option<PlatformInteraction<DomPlatform, T>>,
) {
    let Some(interaction) = interaction else {
        return;
    };

    let handler = {
        let inner = shared.borrow();
        match interaction.kind {
            InteractionKind::Click => inner.handlers.click.clone(),
            InteractionKind::MouseEnter => inner.handlers.mouse_enter.clone(),
            InteractionKind::MouseLeave => inner.handlers.mouse_leave.clone(),
        }
    };

    tracing::trace!(kind = ?interaction.kind, index = interaction.index, "tag interaction");
    if let Some(handler) = handler {
        handler(TagMouseEvent {
            tag: interaction.tag,
            target: interaction.element,
            event: interaction.event,
        });
    }
}

/// Surface a usage error from a browser callback.
fn report<T>(shared: &Shared<T>, result: Result<()>) {
    let Err(err) = result else {
        return;
    };
    let handler = shared.borrow().handlers.error.clone();
    match handler {
        Some(handler) => handler(err),
        None => {
            tracing::error!("text input highlight: {}", err);
            wasm_bindgen::throw_str(&err.to_string());
        }
    }
}
