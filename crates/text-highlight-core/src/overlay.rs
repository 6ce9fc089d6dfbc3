//! The overlay composition root.
//!
//! `Overlay` owns all derived state (rendered rects, hover session, mirrored
//! style) for one tag set and drives a bound [`OverlayPlatform`]. It is told
//! about every change explicitly; nothing is observed implicitly:
//!
//! | change                              | recompute                  |
//! |-------------------------------------|----------------------------|
//! | tags, default class, text override  | [`Overlay::render`]        |
//! | input edited                        | [`Overlay::render`]        |
//! | input or window resized, new target | [`Overlay::refresh`]       |
//! | input scrolled                      | [`Overlay::scroll`]        |

use std::mem;

use smol_str::SmolStr;

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::hover::{HoverTracker, InteractionKind, TagHit, TagInteraction};
use crate::platform::OverlayPlatform;
use crate::rect::{CachedTag, RectCache};
use crate::render::render_markup;
use crate::segment::build_segments;
use crate::style::StyleDescriptor;
use crate::tag::Tag;

/// Interaction resolved against a platform's element and event types.
pub type PlatformInteraction<P, T = ()> =
    TagInteraction<T, <P as OverlayPlatform>::Element, <P as OverlayPlatform>::Event>;

/// Highlight overlay state for one tag set, optionally bound to a platform.
///
/// While unbound every update is stored and nothing renders. While bound an
/// update that fails to render is rolled back, so the stored tags always
/// match what is on screen.
pub struct Overlay<P: OverlayPlatform, T = ()> {
    config: OverlayConfig,
    tags: Vec<Tag<T>>,
    text_override: Option<String>,
    platform: Option<P>,
    style: StyleDescriptor,
    rects: RectCache<P::Element>,
    hover: HoverTracker<T, P::Element, P::Event>,
}

impl<P: OverlayPlatform, T> Overlay<P, T> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            tags: Vec::new(),
            text_override: None,
            platform: None,
            style: StyleDescriptor::default(),
            rects: RectCache::new(),
            hover: HoverTracker::new(),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn tags(&self) -> &[Tag<T>] {
        &self.tags
    }

    /// Tag at `index` in the current tag list.
    pub fn tag(&self, index: usize) -> Option<&Tag<T>> {
        self.tags.get(index)
    }

    pub fn platform(&self) -> Option<&P> {
        self.platform.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.platform.is_some()
    }

    /// Style last mirrored from the target input.
    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    pub fn rects(&self) -> &RectCache<P::Element> {
        &self.rects
    }

    /// Index of the tag in the active hover session, if any.
    pub fn hovered_tag(&self) -> Option<usize> {
        self.hover.hovered()
    }

    /// Tag of the active hover session, as it was when the session began.
    pub fn hovered_tag_value(&self) -> Option<&Tag<T>> {
        self.hover.hovered_tag()
    }

    /// Bind to a new platform, replacing any previous binding, and sync.
    pub fn bind(&mut self, platform: P) -> Result<()> {
        self.unbind();
        tracing::debug!("binding overlay");
        self.platform = Some(platform);
        self.refresh()
    }

    /// Drop the current binding and all state derived from it.
    ///
    /// An active hover session ends silently. Returns the platform that was
    /// bound, if any; unbinding twice is a no-op.
    pub fn unbind(&mut self) -> Option<P> {
        let platform = self.platform.take()?;
        tracing::debug!("unbinding overlay");
        self.hover.clear();
        self.rects.clear();
        self.style = StyleDescriptor::default();
        Some(platform)
    }

    pub fn set_tags(&mut self, tags: Vec<Tag<T>>) -> Result<()> {
        self.update(tags, |overlay| &mut overlay.tags)
    }

    /// Change the default class for tags without an override.
    pub fn set_tag_css_class(&mut self, class: Option<SmolStr>) -> Result<()> {
        self.update(class, |overlay| &mut overlay.config.tag_css_class)
    }

    /// Render `value` instead of the input's live value, or go back to the
    /// live value with `None`.
    pub fn set_text_override(&mut self, value: Option<String>) -> Result<()> {
        self.update(value, |overlay| &mut overlay.text_override)
    }

    /// Swap in `value` and re-render, restoring the old value on error.
    fn update<V>(&mut self, value: V, field: impl Fn(&mut Self) -> &mut V) -> Result<()> {
        let previous = mem::replace(field(self), value);
        let result = self.render();
        if result.is_err() {
            *field(self) = previous;
        }
        result
    }

    /// Text the tags are applied to.
    pub fn effective_text(&self) -> Option<String> {
        match (&self.text_override, &self.platform) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(platform)) => Some(platform.input_value()),
            (None, None) => None,
        }
    }

    /// Re-mirror the input's style, then re-render.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(platform) = &self.platform else {
            return Ok(());
        };
        let style = platform.read_input_style();
        platform.apply_overlay_style(&style);
        self.style = style;
        self.render()
    }

    /// Rebuild segments and overlay content, then re-measure every tag.
    ///
    /// On a usage error the overlay keeps its previous content.
    pub fn render(&mut self) -> Result<()> {
        let Some(platform) = &self.platform else {
            return Ok(());
        };

        let live;
        let text = match &self.text_override {
            Some(text) => text.as_str(),
            None => {
                live = platform.input_value();
                live.as_str()
            }
        };

        let segments = build_segments(text, &self.tags, self.config.offset_unit)?;
        let markup = render_markup(&segments, &self.tags, &self.config);
        platform.set_overlay_markup(&markup);

        self.rects
            .rebuild(platform.tag_elements().into_iter().map(|(index, element)| {
                let rect = platform.bounding_rect(&element);
                CachedTag {
                    index,
                    element,
                    rect,
                }
            }));
        tracing::trace!(
            segments = segments.len(),
            tags = self.rects.len(),
            "rendered overlay"
        );
        Ok(())
    }

    /// Follow the input's scroll offset and re-measure cached tags in place.
    pub fn scroll(&mut self) {
        let Some(platform) = &self.platform else {
            return;
        };
        platform.sync_scroll();
        self.rects.refresh(|element| platform.bounding_rect(element));
    }
}

impl<P: OverlayPlatform, T: Clone> Overlay<P, T> {
    /// Rendered tag under client coordinates.
    fn hit(&self, x: f64, y: f64) -> Option<TagHit<T, P::Element>> {
        let cached = self.rects.hit(x, y)?;
        Some(TagHit {
            index: cached.index,
            tag: self.tags.get(cached.index)?.clone(),
            element: cached.element.clone(),
        })
    }

    /// Resolve a click at client coordinates. Fires on every hit.
    pub fn click(&self, x: f64, y: f64, event: P::Event) -> Option<PlatformInteraction<P, T>> {
        let hit = self.hit(x, y)?;
        Some(TagInteraction {
            kind: InteractionKind::Click,
            index: hit.index,
            tag: hit.tag,
            element: hit.element,
            event,
        })
    }

    /// Resolve a mousemove at client coordinates into hover enter/leave.
    pub fn mouse_move(&mut self, x: f64, y: f64, event: P::Event) -> Option<PlatformInteraction<P, T>> {
        // Inside a session only leaving matters; skip resolving the tag.
        if self.hover.is_active() && self.rects.hit(x, y).is_some() {
            return None;
        }
        let hit = self.hit(x, y);
        self.hover.mouse_move(hit, event)
    }

    /// The pointer left the input entirely.
    pub fn mouse_leave(&mut self) -> Option<PlatformInteraction<P, T>> {
        self.hover.mouse_leave()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::error::HighlightError;
    use crate::rect::TagRect;
    use crate::render::{TAG_ID_ATTR, parse_tag_id};

    #[derive(Default)]
    struct FakeDom {
        value: String,
        computed: Vec<(&'static str, &'static str)>,
        applied_style: Option<StyleDescriptor>,
        markup: String,
        rects: HashMap<usize, TagRect>,
        scroll_syncs: usize,
    }

    #[derive(Clone, Default)]
    struct FakePlatform(Rc<RefCell<FakeDom>>);

    impl FakePlatform {
        fn with_value(value: &str) -> Self {
            let fake = Self::default();
            fake.0.borrow_mut().value = value.to_string();
            fake
        }

        fn place(&self, index: usize, rect: TagRect) {
            self.0.borrow_mut().rects.insert(index, rect);
        }
    }

    impl OverlayPlatform for FakePlatform {
        type Element = usize;
        type Event = &'static str;

        fn input_value(&self) -> String {
            self.0.borrow().value.clone()
        }

        fn read_input_style(&self) -> StyleDescriptor {
            let dom = self.0.borrow();
            StyleDescriptor::from_lookup(|name| {
                dom.computed
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, v)| v.to_string())
            })
        }

        fn apply_overlay_style(&self, style: &StyleDescriptor) {
            self.0.borrow_mut().applied_style = Some(style.clone());
        }

        fn set_overlay_markup(&self, markup: &str) {
            self.0.borrow_mut().markup = markup.to_string();
        }

        fn tag_elements(&self) -> Vec<(usize, usize)> {
            let dom = self.0.borrow();
            let needle = format!("{TAG_ID_ATTR}=\"");
            dom.markup
                .match_indices(&needle)
                .filter_map(|(at, _)| {
                    let rest = &dom.markup[at + needle.len()..];
                    let id = parse_tag_id(&rest[..rest.find('"')?])?;
                    Some((id, id))
                })
                .collect()
        }

        fn bounding_rect(&self, element: &usize) -> TagRect {
            self.0.borrow().rects.get(element).copied().unwrap_or_default()
        }

        fn sync_scroll(&self) {
            self.0.borrow_mut().scroll_syncs += 1;
        }
    }

    fn mention_overlay(fake: &FakePlatform) -> Overlay<FakePlatform, &'static str> {
        let mut overlay = Overlay::new(OverlayConfig::default().with_tag_css_class("mention"));
        overlay
            .set_tags(vec![
                Tag::with_payload(6, 10, "bob"),
                Tag::with_payload(15, 21, "alice"),
            ])
            .unwrap();
        fake.place(0, TagRect::new(40.0, 0.0, 70.0, 20.0));
        fake.place(1, TagRect::new(100.0, 0.0, 150.0, 20.0));
        overlay.bind(fake.clone()).unwrap();
        overlay
    }

    #[test]
    fn unbound_overlay_stores_updates_without_rendering() {
        let mut overlay: Overlay<FakePlatform> = Overlay::new(OverlayConfig::default());
        overlay.set_tags(vec![Tag::new(0, 2)]).unwrap();
        overlay.set_text_override(Some("hi".into())).unwrap();
        overlay.scroll();
        assert_eq!(overlay.tags().len(), 1);
        assert!(overlay.rects().is_empty());
        assert!(overlay.mouse_move(1.0, 1.0, "move").is_none());
        assert!(overlay.unbind().is_none());
    }

    #[test]
    fn bind_mirrors_style_and_renders() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        fake.0.borrow_mut().computed = vec![("font-size", "14px"), ("color", "red")];
        let overlay = mention_overlay(&fake);

        let dom = fake.0.borrow();
        let applied = dom.applied_style.as_ref().unwrap();
        assert_eq!(applied.get("font-size"), Some("14px"));
        assert_eq!(applied.get("color"), None);
        assert_eq!(overlay.style(), applied);
        assert!(dom.markup.contains(r#"data-tag-id="1">@alice</span>"#));
        assert_eq!(overlay.rects().len(), 2);
    }

    #[test]
    fn input_changes_rerender_from_live_value() {
        let fake = FakePlatform::with_value("hello @bob and @al");
        let mut overlay = mention_overlay(&fake);
        // "@alice" does not fit yet, so only one tag renders.
        assert_eq!(overlay.rects().len(), 1);

        fake.0.borrow_mut().value = "hello @bob and @alice".into();
        overlay.render().unwrap();
        assert_eq!(overlay.rects().len(), 2);
    }

    #[test]
    fn text_override_wins_over_live_value() {
        let fake = FakePlatform::with_value("live text");
        let mut overlay = mention_overlay(&fake);
        overlay
            .set_text_override(Some("hello @bob and @alice".into()))
            .unwrap();
        assert_eq!(overlay.effective_text().as_deref(), Some("hello @bob and @alice"));
        assert!(fake.0.borrow().markup.contains(">@bob</span>"));

        overlay.set_text_override(None).unwrap();
        assert_eq!(overlay.effective_text().as_deref(), Some("live text"));
    }

    #[test]
    fn default_class_change_rerenders() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        overlay.set_tag_css_class(Some("hashtag".into())).unwrap();
        assert!(fake.0.borrow().markup.contains("text-highlight-tag hashtag"));
    }

    #[test]
    fn usage_error_keeps_previous_content() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        let before = fake.0.borrow().markup.clone();

        let err = overlay
            .set_tags(vec![Tag::with_payload(0, 8, "a"), Tag::with_payload(6, 10, "b")])
            .unwrap_err();
        assert!(matches!(err, HighlightError::Overlap { .. }));
        assert_eq!(fake.0.borrow().markup, before);
    }

    #[test]
    fn rejected_tags_leave_rendered_tags_clickable() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);

        overlay
            .set_tags(vec![Tag::with_payload(0, 8, "x"), Tag::with_payload(6, 10, "y")])
            .unwrap_err();
        let payloads: Vec<_> = overlay.tags().iter().map(|t| t.payload).collect();
        assert_eq!(payloads, vec!["bob", "alice"]);
        assert_eq!(overlay.click(120.0, 10.0, "click").unwrap().tag.payload, "alice");
    }

    #[test]
    fn failed_override_is_rolled_back() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay: Overlay<FakePlatform> = Overlay::new(OverlayConfig::default());
        // Unbound, so the reversed range is not caught until the bind.
        overlay.set_tags(vec![Tag::new(4, 2)]).unwrap();
        assert!(matches!(
            overlay.bind(fake.clone()).unwrap_err(),
            HighlightError::RangeOrder { .. }
        ));

        overlay.set_text_override(Some("other".into())).unwrap_err();
        overlay.set_tag_css_class(Some("x".into())).unwrap_err();
        assert_eq!(overlay.effective_text().as_deref(), Some("hello @bob and @alice"));
        assert_eq!(overlay.config().tag_css_class, None);
    }

    #[test]
    fn clicks_resolve_to_tag_every_time() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let overlay = mention_overlay(&fake);

        for _ in 0..2 {
            let click = overlay.click(120.0, 10.0, "click").unwrap();
            assert_eq!(click.kind, InteractionKind::Click);
            assert_eq!(click.tag.payload, "alice");
        }
        assert!(overlay.click(70.0, 10.0, "click").is_none());
    }

    #[test]
    fn hover_session_emits_one_enter_and_one_leave() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);

        let events: Vec<_> = [(10.0, 10.0), (45.0, 10.0), (50.0, 5.0), (65.0, 15.0), (80.0, 10.0), (90.0, 10.0)]
            .into_iter()
            .filter_map(|(x, y)| overlay.mouse_move(x, y, "move"))
            .map(|i| (i.kind, i.index))
            .collect();
        assert_eq!(
            events,
            vec![(InteractionKind::MouseEnter, 0), (InteractionKind::MouseLeave, 0)]
        );
    }

    #[test]
    fn hover_leave_names_the_entered_tag_after_tags_change() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        let enter = overlay.mouse_move(120.0, 10.0, "enter").unwrap();
        assert_eq!(enter.tag.payload, "alice");

        // "alice" is gone; only "bob" renders now.
        overlay.set_tags(vec![Tag::with_payload(6, 10, "bob")]).unwrap();
        assert_eq!(overlay.hovered_tag_value().map(|t| t.payload), Some("alice"));
        let leave = overlay.mouse_move(90.0, 10.0, "move").unwrap();
        assert_eq!(leave.kind, InteractionKind::MouseLeave);
        assert_eq!((leave.index, leave.tag.payload), (1, "alice"));
    }

    #[test]
    fn hover_leave_survives_reordered_tags() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        overlay.mouse_move(50.0, 10.0, "enter").unwrap();

        overlay
            .set_tags(vec![
                Tag::with_payload(15, 21, "alice"),
                Tag::with_payload(6, 10, "bob"),
            ])
            .unwrap();
        let leave = overlay.mouse_leave().unwrap();
        assert_eq!(leave.tag.payload, "bob");
    }

    #[test]
    fn mouse_leave_ends_session() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        overlay.mouse_move(120.0, 10.0, "enter");
        let leave = overlay.mouse_leave().unwrap();
        assert_eq!((leave.kind, leave.index, leave.event), (InteractionKind::MouseLeave, 1, "enter"));
        assert!(overlay.mouse_leave().is_none());
    }

    #[test]
    fn scroll_refreshes_rects_in_place() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        fake.place(0, TagRect::new(40.0, -20.0, 70.0, 0.0));
        assert!(overlay.click(50.0, -10.0, "click").is_none());

        overlay.scroll();
        assert_eq!(fake.0.borrow().scroll_syncs, 1);
        assert_eq!(overlay.click(50.0, -10.0, "click").unwrap().index, 0);
    }

    #[test]
    fn unbind_clears_state_silently() {
        let fake = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&fake);
        overlay.mouse_move(50.0, 10.0, "enter");
        assert_eq!(overlay.hovered_tag(), Some(0));

        assert!(overlay.unbind().is_some());
        assert!(overlay.unbind().is_none());
        assert_eq!(overlay.hovered_tag(), None);
        assert!(overlay.rects().is_empty());
        assert!(overlay.mouse_leave().is_none());
    }

    #[test]
    fn rebinding_replaces_target() {
        let first = FakePlatform::with_value("hello @bob and @alice");
        let mut overlay = mention_overlay(&first);
        let second = FakePlatform::with_value("short");
        overlay.bind(second.clone()).unwrap();
        assert!(overlay.rects().is_empty());
        assert_eq!(second.0.borrow().markup, "short&nbsp;");
    }
}
