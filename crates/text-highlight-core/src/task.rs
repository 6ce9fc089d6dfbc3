//! Cancellation and subscription handles.
//!
//! Everything here is single-threaded: overlays live on the UI thread.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag that positively cancels a scheduled callback.
///
/// Clones observe the same flag. The scheduler checks it before acting,
/// and whoever cancels is expected to also drop or cancel the platform
/// timer so the callback does not run at all.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// A platform subscription that can be torn down.
pub trait Disposable {
    fn dispose(self: Box<Self>);
}

/// Every subscription held for one binding.
///
/// Disposing drains the set, so each handle is disposed exactly once no
/// matter how often teardown runs. Remaining handles are disposed on drop.
#[derive(Default)]
pub struct Subscriptions {
    handles: Vec<Box<dyn Disposable>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: impl Disposable + 'static) {
        self.handles.push(Box::new(handle));
    }

    /// Dispose every held handle, returning how many there were.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.dispose();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.handles.len())
            .finish()
    }
}
