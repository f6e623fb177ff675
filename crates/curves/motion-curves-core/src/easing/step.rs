//! Easing through a list of evenly spaced levels.

use crate::error::CurveError;
use crate::mono::MonoSpline;
use crate::wave::periodic_wave;

/// Monotone spline through `values` at `0, 1/n, .., 1`, periodically extended so
/// the slope is continuous across the wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCurve {
    values: Vec<f64>,
    curve: MonoSpline,
}

impl StepCurve {
    pub fn new(values: &[f64]) -> Result<Self, CurveError> {
        let curve = periodic_wave(values)?;
        Ok(Self {
            values: values.to_vec(),
            curve,
        })
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn ease(&self, x: f64) -> f64 {
        self.curve.pos_axis(x, 0)
    }

    #[inline]
    pub fn ease_diff(&self, x: f64) -> f64 {
        self.curve.slope_axis(x, 0)
    }
}

impl std::fmt::Display for StepCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("spline(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}
