//! Cached tag rectangles and hit testing against them.

/// A bounding rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TagRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl TagRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether `(x, y)` lies strictly inside. Points on an edge do not.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left < x && x < self.right && self.top < y && y < self.bottom
    }
}

/// A rendered tag element and its last known rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedTag<E> {
    /// Index of the tag in the caller's tag list.
    pub index: usize,
    pub element: E,
    pub rect: TagRect,
}

/// Last known rectangles of every rendered tag element, in render order.
///
/// Rebuilt wholesale after each render; rectangles are refreshed in place
/// when the overlay scrolls or resizes.
#[derive(Clone, Debug)]
pub struct RectCache<E> {
    entries: Vec<CachedTag<E>>,
}

impl<E> Default for RectCache<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> RectCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = CachedTag<E>>) {
        self.entries.clear();
        self.entries.extend(entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-measure every cached element.
    pub fn refresh(&mut self, mut measure: impl FnMut(&E) -> TagRect) {
        for entry in &mut self.entries {
            entry.rect = measure(&entry.element);
        }
    }

    /// First entry, in render order, whose rectangle strictly contains the point.
    ///
    /// Render order is ascending tag start, so where rectangles overlap the
    /// tag whose text starts first wins.
    pub fn hit(&self, x: f64, y: f64) -> Option<&CachedTag<E>> {
        let hit = self.entries.iter().find(|e| e.rect.contains(x, y));
        tracing::trace!(x, y, index = ?hit.map(|e| e.index), "rect cache hit test");
        hit
    }

    /// Entry for the tag at `index` in the caller's list.
    pub fn get(&self, index: usize) -> Option<&CachedTag<E>> {
        self.entries.iter().find(|e| e.index == index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CachedTag<E>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
