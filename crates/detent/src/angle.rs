//! Screen-space angle math shared by the controller and the geometry generator.
//!
//! Angles are degrees, measured from the positive x-axis and growing clockwise
//! on screen (y points down). [`polar`] shifts by -90 so that 0 lands at
//! 12 o'clock, which is where segment 0 starts.

use crate::detent::DETENT_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Layout box of the wheel, in the same space as pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A zero-sized box means the widget has not been allocated yet.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Angle of `point` around `center`, in (-180, 180].
pub fn pointer_angle(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    dy.atan2(dx).to_degrees()
}

pub fn normalize(deg: f64) -> f64 {
    let n = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if n >= 360.0 { 0.0 } else { n }
}

/// Nearest detent angle, in [0, 360).
pub fn snap(deg: f64) -> f64 {
    normalize((normalize(deg) / DETENT_STEP).round() * DETENT_STEP)
}

/// Shortest signed rotation taking `from` onto `to`, in (-180, 180].
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let d = normalize(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unsigned distance around the circle, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    signed_delta(a, b).abs()
}

/// Point at `radius` from `center`, with `deg = 0` at the top of the circle.
pub fn polar(center: Point, radius: f64, deg: f64) -> Point {
    let theta = to_screen_radians(deg);
    Point::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Wheel degrees to the radians a renderer expects (0 at 12 o'clock).
pub fn to_screen_radians(deg: f64) -> f64 {
    (deg - 90.0).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_pointer_angle_screen_convention() {
        let c = Point::new(100.0, 100.0);
        assert!((pointer_angle(c, Point::new(200.0, 100.0))).abs() < EPS);
        // y grows downwards so "below" is +90
        assert!((pointer_angle(c, Point::new(100.0, 200.0)) - 90.0).abs() < EPS);
        assert!((pointer_angle(c, Point::new(100.0, 0.0)) + 90.0).abs() < EPS);
    }

    #[test]
    fn test_snap_is_idempotent_on_detents() {
        for i in 0..12 {
            let a = i as f64 * 30.0;
            assert_eq!(snap(a), a);
        }
    }

    #[test]
    fn test_snap_lands_on_detent_within_half_step() {
        let mut a = -725.0;
        while a < 725.0 {
            let s = snap(a);
            assert_eq!(s % 30.0, 0.0, "snap({a}) = {s}");
            assert!((0.0..360.0).contains(&s));
            assert!(angular_distance(s, a) <= 15.0 + EPS, "snap({a}) = {s}");
            a += 0.7;
        }
    }

    #[test]
    fn test_snap_wraps_to_zero() {
        assert_eq!(snap(350.0), 0.0);
        assert_eq!(snap(-10.0), 0.0);
        assert_eq!(snap(47.0), 60.0);
    }

    #[test]
    fn test_signed_delta_takes_short_way() {
        assert!((signed_delta(330.0, 0.0) - 30.0).abs() < EPS);
        assert!((signed_delta(0.0, 330.0) + 30.0).abs() < EPS);
        assert!((signed_delta(10.0, 190.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn test_polar_zero_is_twelve_o_clock() {
        let c = Point::new(100.0, 100.0);
        let top = polar(c, 100.0, 0.0);
        assert!((top.x - 100.0).abs() < EPS && top.y.abs() < EPS);
        let right = polar(c, 100.0, 90.0);
        assert!((right.x - 200.0).abs() < EPS && (right.y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_bounds_layout() {
        assert!(!Bounds::default().is_laid_out());
        let b = Bounds::new(10.0, 20.0, 200.0, 100.0);
        assert!(b.is_laid_out());
        assert_eq!(b.center(), Point::new(110.0, 70.0));
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(!b.contains(Point::new(9.0, 20.0)));
    }
}
