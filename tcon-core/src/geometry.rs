//! Rectangle geometry

/// Axis-aligned rectangle in panel pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rectangle {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rectangle {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub const fn with_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    ///
    /// Computed in `u32` so edges past `u16::MAX` do not wrap.
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.height as u32
    }

    /// Whether `inner` lies entirely within `self`, edges included
    pub const fn contains(&self, inner: &Rectangle) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PANEL: Rectangle = Rectangle::with_size(1872, 1404);

    #[test]
    fn test_area() {
        assert_eq!(PANEL.area(), 1872 * 1404);
        assert_eq!(Rectangle::new(10, 10, 0, 50).area(), 0);
        assert_eq!(Rectangle::with_size(u16::MAX, u16::MAX).area(), 65535 * 65535);
    }

    #[test]
    fn test_contains_self_and_edges() {
        assert!(PANEL.contains(&PANEL));
        assert!(PANEL.contains(&Rectangle::new(1871, 1403, 1, 1)));
        assert!(PANEL.contains(&Rectangle::new(1872, 1404, 0, 0)));
    }

    #[test]
    fn test_contains_rejects_each_edge() {
        let outer = Rectangle::new(10, 20, 100, 50);
        assert!(outer.contains(&Rectangle::new(10, 20, 100, 50)));

        assert!(!outer.contains(&Rectangle::new(9, 20, 10, 10)));
        assert!(!outer.contains(&Rectangle::new(10, 19, 10, 10)));
        assert!(!outer.contains(&Rectangle::new(11, 20, 100, 10)));
        assert!(!outer.contains(&Rectangle::new(10, 21, 10, 50)));
    }

    #[test]
    fn test_contains_does_not_wrap() {
        let outer = Rectangle::with_size(u16::MAX, u16::MAX);
        assert!(!outer.contains(&Rectangle::new(u16::MAX, 0, 1, 1)));
    }

    proptest! {
        #[test]
        fn contained_rects_pass(
            x in 0u16..1872, y in 0u16..1404, w in 0u16..1872, h in 0u16..1404
        ) {
            let w = w.min(1872 - x);
            let h = h.min(1404 - y);
            prop_assert!(PANEL.contains(&Rectangle::new(x, y, w, h)));
        }

        #[test]
        fn any_overhanging_edge_rejected(
            x in 0u16..1872, y in 0u16..1404, over in 1u16..100, vertical in any::<bool>()
        ) {
            let rect = if vertical {
                Rectangle::new(x, y, 1, 1404 - y + over)
            } else {
                Rectangle::new(x, y, 1872 - x + over, 1)
            };
            prop_assert!(!PANEL.contains(&rect));
        }
    }
}
