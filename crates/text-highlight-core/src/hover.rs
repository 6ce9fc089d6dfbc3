//! Tag interactions and hover session tracking.

use crate::tag::Tag;

/// Kind of interaction reported to the embedder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Click,
    MouseEnter,
    MouseLeave,
}

/// A rendered tag under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct TagHit<T, E> {
    /// Index of the tag in the tag list it was rendered from.
    pub index: usize,
    pub tag: Tag<T>,
    /// Rendered element of the tag.
    pub element: E,
}

/// A pointer interaction resolved to the tag it landed on.
#[derive(Clone, Debug, PartialEq)]
pub struct TagInteraction<T, E, Ev> {
    pub kind: InteractionKind,
    /// Index of the tag in the tag list it was rendered from.
    pub index: usize,
    pub tag: Tag<T>,
    /// Rendered element of the tag.
    pub element: E,
    /// Originating platform event.
    pub event: Ev,
}

impl<T, E, Ev> TagInteraction<T, E, Ev> {
    fn new(kind: InteractionKind, hit: TagHit<T, E>, event: Ev) -> Self {
        Self {
            kind,
            index: hit.index,
            tag: hit.tag,
            element: hit.element,
            event,
        }
    }
}

/// At most one hovered tag at a time.
///
/// Enter fires once per hover session. Moving from one tag straight onto
/// another does not start a new session; only leaving every tag ends one.
/// The session keeps the tag it entered, so the leave names that tag even
/// if the tag list changed in between.
#[derive(Clone, Debug)]
pub struct HoverTracker<T, E, Ev> {
    current: Option<(TagHit<T, E>, Ev)>,
}

impl<T, E, Ev> Default for HoverTracker<T, E, Ev> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T, E, Ev> HoverTracker<T, E, Ev> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Index of the hovered tag, if a session is active.
    pub fn hovered(&self) -> Option<usize> {
        self.current.as_ref().map(|(hit, _)| hit.index)
    }

    /// Tag of the active session.
    pub fn hovered_tag(&self) -> Option<&Tag<T>> {
        self.current.as_ref().map(|(hit, _)| &hit.tag)
    }

    /// The pointer left the whole input: end any active session.
    pub fn mouse_leave(&mut self) -> Option<TagInteraction<T, E, Ev>> {
        let (hit, event) = self.current.take()?;
        Some(TagInteraction::new(InteractionKind::MouseLeave, hit, event))
    }

    /// Drop the session without reporting it.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl<T: Clone, E: Clone, Ev: Clone> HoverTracker<T, E, Ev> {
    /// Feed a mousemove and its hit test result.
    pub fn mouse_move(&mut self, hit: Option<TagHit<T, E>>, event: Ev) -> Option<TagInteraction<T, E, Ev>> {
        match (hit, self.current.is_some()) {
            (Some(hit), false) => {
                self.current = Some((hit.clone(), event.clone()));
                Some(TagInteraction::new(InteractionKind::MouseEnter, hit, event))
            }
            (None, true) => {
                let (hit, _) = self.current.take()?;
                Some(TagInteraction::new(InteractionKind::MouseLeave, hit, event))
            }
            _ => None,
        }
    }
}
