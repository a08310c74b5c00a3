use glamx::Vec2;

/// An axis-aligned rectangle described by its top-left origin and size.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ViewRect {
    pub fn new(origin: Vec2, size: Vec2) -> ViewRect {
        ViewRect { origin, size }
    }

    /// The corner opposite the origin.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Whether the point lies on or inside the rectangle's boundary.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.max().x
            && point.y <= self.max().y
    }

    /// Clamps each axis of the point independently into the rectangle,
    /// yielding the boundary position closest to it along each axis.
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.origin, self.max())
    }

    /// The same rectangle translated by `offset`.
    #[inline]
    pub fn offset_by(&self, offset: Vec2) -> ViewRect {
        ViewRect::new(self.origin + offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_only_the_out_of_range_axis() {
        let rect = ViewRect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert_eq!(rect.clamp(Vec2::new(150.0, 50.0)), Vec2::new(100.0, 50.0));
        assert_eq!(rect.clamp(Vec2::new(-20.0, 120.0)), Vec2::new(0.0, 100.0));
    }

    #[test]
    fn contains_includes_the_boundary() {
        let rect = ViewRect::new(Vec2::new(10.0, 10.0), Vec2::new(30.0, 30.0));
        assert!(rect.contains(Vec2::new(10.0, 40.0)));
        assert!(rect.contains(rect.center()));
        assert!(!rect.contains(Vec2::new(9.9, 20.0)));
    }
}
