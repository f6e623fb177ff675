//! Cubic-Bézier easing anchored at (0,0) and (1,1).

use serde::{Deserialize, Serialize};

/// Bisection stops once the bracket half-width drops to this for `ease`.
const VALUE_ERROR: f64 = 0.01;
/// Tighter bracket used by `ease_diff`.
const SLOPE_ERROR: f64 = 0.0001;

/// Bézier easing with control points `(x1, y1)` and `(x2, y2)`.
///
/// `ease(x)` inverts `X(t) = x` by bisection on the Bézier parameter and interpolates
/// `Y` across the final bracket, which makes the result exactly piecewise linear on a
/// fixed grid of `t` and therefore monotone whenever `X` and `Y` are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicEasing {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

impl CubicEasing {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    fn x_at(&self, t: f64) -> f64 {
        cubic_bezier(0.0, self.x1, self.x2, 1.0, t)
    }

    #[inline]
    fn y_at(&self, t: f64) -> f64 {
        cubic_bezier(0.0, self.y1, self.y2, 1.0, t)
    }

    /// Returns `(t, half_width)` of the final bracket around `X(t) = x`.
    fn bracket(&self, x: f64, error: f64) -> (f64, f64) {
        let mut t = 0.5;
        let mut range = 0.5;
        while range > error {
            let tx = self.x_at(t);
            range *= 0.5;
            if tx < x {
                t += range;
            } else {
                t -= range;
            }
        }
        (t, range)
    }

    /// Eased value; 0 at or below 0 and 1 at or above 1.
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let (t, range) = self.bracket(x, VALUE_ERROR);
        let x1 = self.x_at(t - range);
        let x2 = self.x_at(t + range);
        let y1 = self.y_at(t - range);
        let y2 = self.y_at(t + range);
        (y2 - y1) * (x - x1) / (x2 - x1) + y1
    }

    /// Local secant slope `dY/dX` around `x`.
    pub fn ease_diff(&self, x: f64) -> f64 {
        let (t, range) = self.bracket(x, SLOPE_ERROR);
        let x1 = self.x_at(t - range);
        let x2 = self.x_at(t + range);
        let y1 = self.y_at(t - range);
        let y2 = self.y_at(t + range);
        (y2 - y1) / (x2 - x1)
    }
}

impl std::fmt::Display for CubicEasing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cubic({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn diagonal_controls_are_identity() {
        let easing = CubicEasing::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 1..10 {
            let x = i as f64 / 10.0;
            assert_abs_diff_eq!(easing.ease(x), x, epsilon = 1e-9);
            assert_abs_diff_eq!(easing.ease_diff(x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn clamps_outside_unit_interval() {
        let easing = CubicEasing::new(0.4, 0.0, 0.2, 1.0);
        assert_eq!(easing.ease(-0.5), 0.0);
        assert_eq!(easing.ease(0.0), 0.0);
        assert_eq!(easing.ease(1.0), 1.0);
        assert_eq!(easing.ease(3.0), 1.0);
    }

    #[test]
    fn symmetric_curve_passes_through_the_middle() {
        let easing = CubicEasing::new(0.42, 0.0, 0.58, 1.0);
        assert_abs_diff_eq!(easing.ease(0.5), 0.5, epsilon = 1e-9);
        assert!(easing.ease_diff(0.5) > 1.0);
    }

    #[test]
    fn prints_as_a_spec_string() {
        assert_eq!(
            CubicEasing::new(0.4, 0.0, 0.2, 1.0).to_string(),
            "cubic(0.4, 0, 0.2, 1)"
        );
    }
}
