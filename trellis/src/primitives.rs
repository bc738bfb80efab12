//! Core primitive types for Trellis.
//!
//! Geometry, color, border insets and the 2D transform used by every widget
//! and by the draw surface.

use std::ops::{Add, Mul, Sub};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Get the intersection of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        })
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Unscaled widget size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Per-axis scale factor applied on top of a widget's pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Integer rectangle, used for texture sub-regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    #[inline]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// The all-zero rectangle means "not set".
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Border insets in pixels, one per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Borders {
    #[inline]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same inset on all four edges.
    #[inline]
    pub const fn uniform(width: u32) -> Self {
        Self::new(width, width, width, width)
    }

    #[inline]
    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Default highlight behind the selected list item.
    pub const SELECTION: Self = Self::rgb(50, 100, 200);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when the alpha channel is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// A 2D affine transform, stored as the top two rows of a 3x3 matrix.
///
/// `[a, b, tx, c, d, ty]` maps `(x, y)` to `(a*x + b*y + tx, c*x + d*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [f32; 6],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    };

    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self {
            m: [1.0, 0.0, x, 0.0, 1.0, y],
        }
    }

    #[inline]
    pub const fn scaling(x: f32, y: f32) -> Self {
        Self {
            m: [x, 0.0, 0.0, 0.0, y, 0.0],
        }
    }

    /// Translation to `position` followed by a scale, the usual widget transform.
    #[inline]
    pub fn from_position_scale(position: Point, scale: Scale) -> Self {
        Self::translation(position.x, position.y) * Self::scaling(scale.x, scale.y)
    }

    /// Apply a translation after the existing transform (in local space).
    #[inline]
    pub fn translate(self, x: f32, y: f32) -> Self {
        self * Self::translation(x, y)
    }

    /// Apply a scale after the existing transform (in local space).
    #[inline]
    pub fn scale(self, x: f32, y: f32) -> Self {
        self * Self::scaling(x, y)
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let [a, b, tx, c, d, ty] = self.m;
        Point::new(a * p.x + b * p.y + tx, c * p.x + d * p.y + ty)
    }

    /// Axis-aligned bounding box of the transformed rectangle.
    pub fn transform_rect(&self, r: Rect) -> Rect {
        let corners = [
            self.transform_point(Point::new(r.x, r.y)),
            self.transform_point(Point::new(r.right(), r.y)),
            self.transform_point(Point::new(r.x, r.bottom())),
            self.transform_point(Point::new(r.right(), r.bottom())),
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Self;

    /// `self * rhs` applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        let [a1, b1, tx1, c1, d1, ty1] = self.m;
        let [a2, b2, tx2, c2, d2, ty2] = rhs.m;
        Self {
            m: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                a1 * tx2 + b1 * ty2 + tx1,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                c1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Point tests
    // =========================================================================

    #[test]
    fn point_add_sub() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(5.0, 15.0);
        assert_eq!(a + b, Point::new(15.0, 35.0));
        assert_eq!(a - b, Point::new(5.0, 5.0));
    }

    #[test]
    fn point_from_tuple() {
        let p: Point = (5.0, 10.0).into();
        assert_eq!(p, Point::new(5.0, 10.0));
    }

    // =========================================================================
    // Rect tests
    // =========================================================================

    #[test]
    fn rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(10.0, 20.0))); // Top-left corner
        assert!(rect.contains(Point::new(50.0, 40.0)));
        assert!(rect.contains(Point::new(109.9, 69.9)));

        assert!(!rect.contains(Point::new(110.0, 70.0))); // exclusive
        assert!(!rect.contains(Point::new(5.0, 40.0)));
        assert!(!rect.contains(Point::new(50.0, 80.0)));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let c = Rect::new(200.0, 200.0, 50.0, 50.0);
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn rect_translate() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.translate(Point::new(5.0, -10.0)), Rect::new(15.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 10.0, 1.0).is_empty());
    }

    // =========================================================================
    // Borders / IntRect tests
    // =========================================================================

    #[test]
    fn borders_sums() {
        let b = Borders::new(1, 2, 3, 4);
        assert_eq!(b.horizontal(), 4);
        assert_eq!(b.vertical(), 6);
        assert_eq!(Borders::uniform(2), Borders::new(2, 2, 2, 2));
    }

    #[test]
    fn int_rect_zero() {
        assert!(IntRect::default().is_zero());
        assert!(!IntRect::new(0, 0, 1, 1).is_zero());
    }

    // =========================================================================
    // Color tests
    // =========================================================================

    #[test]
    fn color_constants() {
        assert_eq!(Color::BLACK, Color::rgba(0, 0, 0, 255));
        assert_eq!(Color::WHITE, Color::rgba(255, 255, 255, 255));
        assert_eq!(Color::TRANSPARENT, Color::rgba(0, 0, 0, 0));
        assert!(Color::RED.is_opaque());
        assert!(!Color::RED.with_alpha(128).is_opaque());
    }

    // =========================================================================
    // Transform tests
    // =========================================================================

    #[test]
    fn transform_translate_then_scale() {
        let t = Transform::from_position_scale(Point::new(10.0, 20.0), Scale::new(2.0, 3.0));
        assert_eq!(t.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 23.0));
    }

    #[test]
    fn transform_composition_order() {
        let t = Transform::translation(5.0, 5.0).scale(2.0, 2.0).translate(1.0, 0.0);
        // (0,0) -> translate(1,0) -> scale 2 -> translate(5,5)
        assert_eq!(t.transform_point(Point::ORIGIN), Point::new(7.0, 5.0));
    }

    #[test]
    fn transform_flip_rect_is_normalised() {
        let t = Transform::scaling(1.0, -1.0);
        let r = t.transform_rect(Rect::new(0.0, 10.0, 5.0, 5.0));
        assert_eq!(r, Rect::new(0.0, -15.0, 5.0, 5.0));
    }
}
