//! Geometry and hit-testing
//!
//! Pure types only. The DOM-backed provider that measures live elements is
//! in `context`; tests use [`StaticBounds`] with synthetic rectangles.

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// What the pointer is currently over.
///
/// `Container` means the pointer is inside a container but not over any of
/// its items (empty container, or the area past the last item).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverTarget {
    Item(u32),
    Container(String),
    #[default]
    None,
}

impl HoverTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, HoverTarget::None)
    }
}

/// Resolves a pointer position to a drop target.
///
/// Items take precedence over containers. Bounds must be read fresh on
/// every call: items shift while the optimistic order changes mid-drag.
pub trait GeometryProvider {
    fn locate(&self, x: f64, y: f64) -> HoverTarget;
}

/// Fixed-rectangle provider for tests and headless use.
#[derive(Clone, Debug, Default)]
pub struct StaticBounds {
    items: Vec<(u32, Rect)>,
    containers: Vec<(String, Rect)>,
}

impl StaticBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: u32, rect: Rect) -> Self {
        self.set_item(id, rect);
        self
    }

    pub fn with_container(mut self, key: &str, rect: Rect) -> Self {
        self.containers.push((key.to_string(), rect));
        self
    }

    /// Insert or replace an item rectangle.
    pub fn set_item(&mut self, id: u32, rect: Rect) {
        if let Some(entry) = self.items.iter_mut().find(|(item, _)| *item == id) {
            entry.1 = rect;
        } else {
            self.items.push((id, rect));
        }
    }
}

impl GeometryProvider for StaticBounds {
    fn locate(&self, x: f64, y: f64) -> HoverTarget {
        for (id, rect) in &self.items {
            if rect.contains(x, y) {
                return HoverTarget::Item(*id);
            }
        }
        for (key, rect) in &self.containers {
            if rect.contains(x, y) {
                return HoverTarget::Container(key.clone());
            }
        }
        HoverTarget::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> StaticBounds {
        StaticBounds::new()
            .with_item(1, Rect::new(0.0, 0.0, 100.0, 40.0))
            .with_item(2, Rect::new(0.0, 40.0, 100.0, 40.0))
            .with_container("mon", Rect::new(0.0, 0.0, 100.0, 300.0))
            .with_container("tue", Rect::new(100.0, 0.0, 100.0, 300.0))
    }

    #[test]
    fn item_wins_over_enclosing_container() {
        assert_eq!(bounds().locate(50.0, 20.0), HoverTarget::Item(1));
    }

    #[test]
    fn container_hit_past_last_item() {
        assert_eq!(
            bounds().locate(50.0, 200.0),
            HoverTarget::Container("mon".into())
        );
    }

    #[test]
    fn empty_container_hit() {
        assert_eq!(
            bounds().locate(150.0, 20.0),
            HoverTarget::Container("tue".into())
        );
    }

    #[test]
    fn miss_everything() {
        assert_eq!(bounds().locate(500.0, 500.0), HoverTarget::None);
    }

    #[test]
    fn moved_bounds_are_respected() {
        let mut b = bounds();
        // item 1 shifts down mid-drag; the old spot now falls through to
        // the container underneath
        b.set_item(1, Rect::new(0.0, 80.0, 100.0, 40.0));
        assert_eq!(b.locate(50.0, 20.0), HoverTarget::Container("mon".into()));
        assert_eq!(b.locate(50.0, 100.0), HoverTarget::Item(1));
    }
}
