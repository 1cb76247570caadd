//! Screen-space primitives: Point, Size, Rect.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `angle` radians and `radius` from `self`.
    ///
    /// Angles follow canvas convention: 0 points right, positive turns clockwise
    /// because the y axis grows downward.
    #[must_use]
    pub fn polar(&self, angle: f64, radius: f64) -> Self {
        Self::new(
            (f64::from(self.x) + angle.cos() * radius) as f32,
            (f64::from(self.y) + angle.sin() * radius) as f32,
        )
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions.
    #[must_use]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Center point of a surface of this size.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_polar_twelve_oclock() {
        let c = Point::new(100.0, 100.0);
        let p = c.polar(-std::f64::consts::FRAC_PI_2, 50.0);
        assert!((p.x - 100.0).abs() < 0.001);
        assert!((p.y - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_point_add_sub() {
        let sum = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
        assert_eq!(sum, Point::new(4.0, 6.0));
        let diff = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(diff, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_rect_from_size() {
        assert_eq!(Rect::from_size(Size::new(30.0, 20.0)), Rect::new(0.0, 0.0, 30.0, 20.0));
    }

    #[test]
    fn test_size_center_and_min_side() {
        let s = Size::new(400.0, 300.0);
        assert_eq!(s.center(), Point::new(200.0, 150.0));
        assert_eq!(s.min_side(), 300.0);
    }

    proptest! {
        #[test]
        fn prop_polar_keeps_radius(angle in -10.0f64..10.0, radius in 0.0f64..500.0) {
            let c = Point::new(250.0, 250.0);
            let d = c.polar(angle, radius) - c;
            prop_assert!((f64::from(d.x.hypot(d.y)) - radius).abs() < 0.01);
        }
    }
}
