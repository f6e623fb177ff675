//! Common query surface over the time-keyed curves.

use crate::arc::ArcSpline;
use crate::error::CurveError;
use crate::linear::LinearCurve;
use crate::mono::MonoSpline;
use crate::series::Extrapolation;

/// A curve evaluated by progress `t`, producing a fixed number of coordinates.
///
/// `t` outside [`Curve::domain`] follows the curve's [`Extrapolation`] policy.
pub trait Curve {
    fn dims(&self) -> usize;

    /// First and last keyed time.
    fn domain(&self) -> (f64, f64);

    /// Write the position at `t` into the first `dims()` slots of `out`.
    fn pos_into(&self, t: f64, out: &mut [f64]);

    fn pos_axis(&self, t: f64, axis: usize) -> f64;

    /// Write the slope at `t` into the first `dims()` slots of `out`.
    fn slope_into(&self, t: f64, out: &mut [f64]);

    fn slope_axis(&self, t: f64, axis: usize) -> f64;

    fn pos(&self, t: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.pos_into(t, &mut out);
        out
    }

    fn slope(&self, t: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.slope_into(t, &mut out);
        out
    }

    /// [`Curve::pos_axis`] that reports a bad axis instead of panicking.
    fn checked_pos_axis(&self, t: f64, axis: usize) -> Result<f64, CurveError> {
        if axis >= self.dims() {
            return Err(CurveError::AxisOutOfRange {
                axis,
                dims: self.dims(),
            });
        }
        Ok(self.pos_axis(t, axis))
    }

    /// [`Curve::slope_axis`] that reports a bad axis instead of panicking.
    fn checked_slope_axis(&self, t: f64, axis: usize) -> Result<f64, CurveError> {
        if axis >= self.dims() {
            return Err(CurveError::AxisOutOfRange {
                axis,
                dims: self.dims(),
            });
        }
        Ok(self.slope_axis(t, axis))
    }
}

macro_rules! impl_keyed_curve {
    ($ty:ty) => {
        impl Curve for $ty {
            #[inline]
            fn dims(&self) -> usize {
                <$ty>::dims(self)
            }

            fn domain(&self) -> (f64, f64) {
                let times = self.times();
                (times[0], times[times.len() - 1])
            }

            #[inline]
            fn pos_into(&self, t: f64, out: &mut [f64]) {
                <$ty>::pos_into(self, t, out)
            }

            #[inline]
            fn pos_axis(&self, t: f64, axis: usize) -> f64 {
                <$ty>::pos_axis(self, t, axis)
            }

            #[inline]
            fn slope_into(&self, t: f64, out: &mut [f64]) {
                <$ty>::slope_into(self, t, out)
            }

            #[inline]
            fn slope_axis(&self, t: f64, axis: usize) -> f64 {
                <$ty>::slope_axis(self, t, axis)
            }
        }
    };
}

impl_keyed_curve!(MonoSpline);
impl_keyed_curve!(LinearCurve);

impl Curve for ArcSpline {
    #[inline]
    fn dims(&self) -> usize {
        2
    }

    fn domain(&self) -> (f64, f64) {
        ArcSpline::domain(self)
    }

    fn pos_into(&self, t: f64, out: &mut [f64]) {
        let pos = ArcSpline::pos(self, t);
        for (slot, v) in out.iter_mut().zip(pos) {
            *slot = v;
        }
    }

    fn pos_axis(&self, t: f64, axis: usize) -> f64 {
        ArcSpline::pos_axis(self, t, axis)
    }

    fn slope_into(&self, t: f64, out: &mut [f64]) {
        let vel = ArcSpline::slope(self, t);
        for (slot, v) in out.iter_mut().zip(vel) {
            *slot = v;
        }
    }

    fn slope_axis(&self, t: f64, axis: usize) -> f64 {
        ArcSpline::slope_axis(self, t, axis)
    }
}

/// Interpolation kind chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCurve {
    Monotone(MonoSpline),
    Linear(LinearCurve),
    Arc(ArcSpline),
}

impl KeyCurve {
    pub fn kind(&self) -> &'static str {
        match self {
            KeyCurve::Monotone(_) => "monotone",
            KeyCurve::Linear(_) => "linear",
            KeyCurve::Arc(_) => "arc",
        }
    }

    /// Apply an extrapolation policy to whichever curve is inside.
    pub fn with_extrapolation(self, extrapolation: Extrapolation) -> Self {
        match self {
            KeyCurve::Monotone(c) => KeyCurve::Monotone(c.with_extrapolation(extrapolation)),
            KeyCurve::Linear(c) => KeyCurve::Linear(c.with_extrapolation(extrapolation)),
            KeyCurve::Arc(c) => KeyCurve::Arc(c.with_extrapolation(extrapolation)),
        }
    }

    fn inner(&self) -> &dyn Curve {
        match self {
            KeyCurve::Monotone(c) => c,
            KeyCurve::Linear(c) => c,
            KeyCurve::Arc(c) => c,
        }
    }
}

impl Curve for KeyCurve {
    fn dims(&self) -> usize {
        self.inner().dims()
    }

    fn domain(&self) -> (f64, f64) {
        self.inner().domain()
    }

    fn pos_into(&self, t: f64, out: &mut [f64]) {
        self.inner().pos_into(t, out)
    }

    fn pos_axis(&self, t: f64, axis: usize) -> f64 {
        self.inner().pos_axis(t, axis)
    }

    fn slope_into(&self, t: f64, out: &mut [f64]) {
        self.inner().slope_into(t, out)
    }

    fn slope_axis(&self, t: f64, axis: usize) -> f64 {
        self.inner().slope_axis(t, axis)
    }
}

impl From<MonoSpline> for KeyCurve {
    fn from(curve: MonoSpline) -> Self {
        KeyCurve::Monotone(curve)
    }
}

impl From<LinearCurve> for KeyCurve {
    fn from(curve: LinearCurve) -> Self {
        KeyCurve::Linear(curve)
    }
}

impl From<ArcSpline> for KeyCurve {
    fn from(curve: ArcSpline) -> Self {
        KeyCurve::Arc(curve)
    }
}
