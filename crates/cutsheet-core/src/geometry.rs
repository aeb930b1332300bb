use serde::{Deserialize, Serialize};

use crate::part::Part;

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Map a part from source units into pixels. Each coordinate is
    /// multiplied by `scale` and nothing else.
    pub fn from_part(part: &Part, scale: f64) -> Self {
        Self {
            x: part.x * scale,
            y: part.y * scale,
            w: part.w * scale,
            h: part.h * scale,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when the rectangle is thinner than `max_width` and taller than wide.
    pub fn is_narrow_and_tall(&self, max_width: f64) -> bool {
        self.w < max_width && self.h > self.w
    }

    /// True when both sides strictly exceed the given minimums.
    pub fn exceeds(&self, min_width: f64, min_height: f64) -> bool {
        self.w > min_width && self.h > min_height
    }

    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_part_scales_every_coordinate() {
        let part = Part::new(3.0, 7.5, 20.0, 5.0, "Shelf", "20x5");
        let r = PixelRect::from_part(&part, 4.0);
        assert_eq!(r, PixelRect::new(12.0, 30.0, 80.0, 20.0));
    }

    #[test]
    fn test_center() {
        let r = PixelRect::new(10.0, 20.0, 80.0, 20.0);
        let c = r.center();
        assert!((c.x - 50.0).abs() < 1e-10);
        assert!((c.y - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_narrow_and_tall() {
        assert!(PixelRect::new(0.0, 0.0, 20.0, 120.0).is_narrow_and_tall(40.0));
        // Wide enough, even though tall.
        assert!(!PixelRect::new(0.0, 0.0, 40.0, 120.0).is_narrow_and_tall(40.0));
        // Narrow but not taller than wide.
        assert!(!PixelRect::new(0.0, 0.0, 20.0, 20.0).is_narrow_and_tall(40.0));
    }

    #[test]
    fn test_intersects() {
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::new(5.0, 5.0, 10.0, 10.0);
        let c = PixelRect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        // Shared edge only.
        assert!(!a.intersects(&c));
    }
}
