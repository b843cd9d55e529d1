//! 2-D value geometry for the graphing layer.
//!
//! Points, lines, and polylines in model space, plus the axis-aligned
//! affine map that places them on a device canvas. Device y grows
//! downward, so the viewport map flips vertically: model "up" renders up.
//! All coordinates in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// Tolerance used for approximate point equality.
pub const POINT_EPSILON: Decimal = dec!(0.000001);

/// An immutable 2-D point (also used as a vector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: Decimal,
    pub y: Decimal,
}

impl Point {
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, factor: Decimal) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn dot(&self, other: &Point) -> Decimal {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean norm.
    pub fn norm(&self) -> Decimal {
        self.dot(self).sqrt().unwrap_or(Decimal::ZERO)
    }

    pub fn distance(&self, other: &Point) -> Decimal {
        self.sub(other).norm()
    }

    /// Componentwise equality within `POINT_EPSILON`.
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

/// A directed line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// An ordered, non-empty sequence of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyLine {
    points: Vec<Point>,
}

impl PolyLine {
    /// Build a polyline; at least one point is required.
    pub fn new(points: Vec<Point>) -> LoanResult<Self> {
        if points.is_empty() {
            return Err(LoanError::InvalidInput {
                field: "points".into(),
                reason: "A polyline needs at least one point".into(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consecutive point pairs as drawable segments.
    pub fn segments(&self) -> Vec<Line> {
        self.points
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1]))
            .collect()
    }
}

/// Axis-aligned affine map `(x, y) -> (a*x + b, c*y + d)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
    pub d: Decimal,
}

impl AffineTransform {
    pub fn new(a: Decimal, b: Decimal, c: Decimal, d: Decimal) -> Self {
        Self { a, b, c, d }
    }

    /// Map model space `[0, x_max] x [0, y_max]` onto a device canvas of
    /// `width` x `height` pixels, flipping vertically so that model (0,
    /// y_max) lands at device (0, 0). Non-positive model bounds degenerate
    /// to the zero map.
    pub fn viewport(x_max: Decimal, y_max: Decimal, width: Decimal, height: Decimal) -> Self {
        if x_max <= Decimal::ZERO || y_max <= Decimal::ZERO {
            return Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        }
        Self::new(
            width / x_max,
            Decimal::ZERO,
            -height / y_max,
            height,
        )
    }

    pub fn apply(&self, p: &Point) -> Point {
        Point::new(self.a * p.x + self.b, self.c * p.y + self.d)
    }

    pub fn apply_line(&self, line: &Line) -> Line {
        Line::new(self.apply(&line.start), self.apply(&line.end))
    }

    /// Pointwise map; the result is non-empty whenever the input is, so
    /// reconstruction cannot fail.
    pub fn apply_polyline(&self, polyline: &PolyLine) -> PolyLine {
        PolyLine {
            points: polyline.points.iter().map(|p| self.apply(p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn p(x: Decimal, y: Decimal) -> Point {
        Point::new(x, y)
    }

    // -----------------------------------------------------------------------
    // 1. Vector arithmetic
    // -----------------------------------------------------------------------
    #[test]
    fn test_point_arithmetic() {
        let a = p(dec!(1), dec!(2));
        let b = p(dec!(3), dec!(-1));
        assert_eq!(a.add(&b), p(dec!(4), dec!(1)));
        assert_eq!(a.sub(&b), p(dec!(-2), dec!(3)));
        assert_eq!(a.scale(dec!(2)), p(dec!(2), dec!(4)));
        assert_eq!(a.dot(&b), dec!(1));
    }

    // -----------------------------------------------------------------------
    // 2. Norm and distance
    // -----------------------------------------------------------------------
    #[test]
    fn test_norm_and_distance() {
        let a = p(dec!(3), dec!(4));
        assert!((a.norm() - dec!(5)).abs() < POINT_EPSILON);
        assert!((p(dec!(0), dec!(0)).distance(&a) - dec!(5)).abs() < POINT_EPSILON);
    }

    // -----------------------------------------------------------------------
    // 3. Approximate equality honours the epsilon
    // -----------------------------------------------------------------------
    #[test]
    fn test_approx_eq() {
        let a = p(dec!(1), dec!(1));
        assert!(a.approx_eq(&p(dec!(1.0000005), dec!(0.9999995))));
        assert!(!a.approx_eq(&p(dec!(1.000002), dec!(1))));
    }

    // -----------------------------------------------------------------------
    // 4. Polyline needs at least one point
    // -----------------------------------------------------------------------
    #[test]
    fn test_polyline_non_empty() {
        assert!(PolyLine::new(vec![]).is_err());
        let single = PolyLine::new(vec![p(dec!(0), dec!(0))]).unwrap();
        assert!(single.segments().is_empty());
    }

    // -----------------------------------------------------------------------
    // 5. Viewport corners map per the canvas convention
    // -----------------------------------------------------------------------
    #[test]
    fn test_viewport_corner_mapping() {
        let t = AffineTransform::viewport(dec!(10), dec!(100), dec!(200), dec!(50));
        assert_eq!(t.apply(&p(dec!(0), dec!(100))), p(dec!(0), dec!(0)));
        assert_eq!(t.apply(&p(dec!(10), dec!(0))), p(dec!(200), dec!(50)));
    }

    // -----------------------------------------------------------------------
    // 6. Non-positive model bounds degenerate to the zero map
    // -----------------------------------------------------------------------
    #[test]
    fn test_viewport_degenerate() {
        let t = AffineTransform::viewport(dec!(0), dec!(100), dec!(200), dec!(50));
        assert_eq!(t.apply(&p(dec!(5), dec!(50))), p(dec!(0), dec!(0)));
        let t = AffineTransform::viewport(dec!(10), dec!(-1), dec!(200), dec!(50));
        assert_eq!(t.apply(&p(dec!(5), dec!(50))), p(dec!(0), dec!(0)));
    }

    // -----------------------------------------------------------------------
    // 7. Line and polyline map pointwise
    // -----------------------------------------------------------------------
    #[test]
    fn test_pointwise_mapping() {
        let t = AffineTransform::viewport(dec!(10), dec!(100), dec!(200), dec!(50));
        let line = Line::new(p(dec!(0), dec!(100)), p(dec!(10), dec!(0)));
        let mapped = t.apply_line(&line);
        assert_eq!(mapped.start, p(dec!(0), dec!(0)));
        assert_eq!(mapped.end, p(dec!(200), dec!(50)));

        let poly = PolyLine::new(vec![line.start, line.end]).unwrap();
        let mapped_poly = t.apply_polyline(&poly);
        assert_eq!(mapped_poly.points()[0], p(dec!(0), dec!(0)));
        assert_eq!(mapped_poly.segments().len(), 1);
    }
}
