//! Schlick bias/gain easing.

use serde::{Deserialize, Serialize};

/// Rational bias/gain curve with slope parameter `s` and turning point `t`.
///
/// Below `t` the curve is `t·x / (x + s(t - x))`; above it the mirrored form
/// `1 + (1 - t)(x - 1) / (1 - x - s(t - x))`. Both meet at `(t, t)` and the
/// curve runs from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schlick {
    pub s: f64,
    pub t: f64,
}

impl Schlick {
    pub const fn new(s: f64, t: f64) -> Self {
        Self { s, t }
    }

    pub fn ease(&self, x: f64) -> f64 {
        let Self { s, t } = *self;
        if x < t {
            t * x / (x + s * (t - x))
        } else {
            1.0 + (1.0 - t) * (x - 1.0) / (1.0 - x - s * (t - x))
        }
    }

    pub fn ease_diff(&self, x: f64) -> f64 {
        let Self { s, t } = *self;
        if x < t {
            let den = x + s * (t - x);
            s * t * t / (den * den)
        } else {
            let den = 1.0 - x - s * (t - x);
            s * (1.0 - t) * (1.0 - t) / (den * den)
        }
    }
}

impl std::fmt::Display for Schlick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schlick({}, {})", self.s, self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn branches_meet_at_the_turning_point() {
        let easing = Schlick::new(3.0, 0.4);
        assert_abs_diff_eq!(easing.ease(0.0), 0.0);
        assert_abs_diff_eq!(easing.ease(0.4), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(easing.ease(0.4 - 1e-9), 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(easing.ease(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn derivative_matches_finite_differences() {
        let easing = Schlick::new(2.5, 0.6);
        let h = 1e-6;
        for &x in &[0.1, 0.3, 0.55, 0.7, 0.95] {
            let numeric = (easing.ease(x + h) - easing.ease(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(easing.ease_diff(x), numeric, epsilon = 1e-4);
        }
    }

    #[test]
    fn unit_slope_is_identity() {
        let easing = Schlick::new(1.0, 0.5);
        assert_abs_diff_eq!(easing.ease(0.25), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(easing.ease(0.75), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(easing.ease_diff(0.75), 1.0, epsilon = 1e-12);
    }
}
