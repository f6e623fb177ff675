//! Piecewise-linear interpolation in N dimensions.
//!
//! Same query surface as [`crate::MonoSpline`] so either can back a keyed property.

use crate::error::CurveError;
use crate::series::{Extrapolation, Series};

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearCurve {
    series: Series,
    /// Cumulative x/y polyline length at each waypoint (empty for 1-D curves).
    path_length: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearCurve {
    pub fn new<P: AsRef<[f64]>>(times: &[f64], points: &[P]) -> Result<Self, CurveError> {
        let series = Series::new(times, points)?;
        let path_length = if series.dims() >= 2 {
            let mut acc = 0.0;
            let mut lengths = Vec::with_capacity(series.len());
            lengths.push(0.0);
            for i in 1..series.len() {
                let dx = series.value(i, 0) - series.value(i - 1, 0);
                let dy = series.value(i, 1) - series.value(i - 1, 1);
                acc += dx.hypot(dy);
                lengths.push(acc);
            }
            lengths
        } else {
            Vec::new()
        };
        Ok(Self {
            series,
            path_length,
            extrapolation: Extrapolation::default(),
        })
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.series.dims()
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        self.series.times()
    }

    #[inline]
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn pos_into(&self, t: f64, out: &mut [f64]) {
        for (j, slot) in out.iter_mut().enumerate().take(self.dims()) {
            *slot = self.pos_axis(t, j);
        }
    }

    pub fn pos(&self, t: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.pos_into(t, &mut out);
        out
    }

    /// # Panics
    /// If `dim >= self.dims()`.
    pub fn pos_axis(&self, t: f64, dim: usize) -> f64 {
        let s = &self.series;
        let last = s.len() - 1;
        if t <= s.first_time() {
            return match self.extrapolation {
                Extrapolation::Linear => {
                    s.value(0, dim) + (t - s.first_time()) * self.slope_axis(s.first_time(), dim)
                }
                Extrapolation::Clamp => s.value(0, dim),
            };
        }
        if t >= s.last_time() {
            return match self.extrapolation {
                Extrapolation::Linear => {
                    s.value(last, dim) + (t - s.last_time()) * self.slope_axis(s.last_time(), dim)
                }
                Extrapolation::Clamp => s.value(last, dim),
            };
        }
        let i = s.segment(t);
        let x = (t - s.times()[i]) / s.span(i);
        lerp(s.value(i, dim), s.value(i + 1, dim), x)
    }

    pub fn slope_into(&self, t: f64, out: &mut [f64]) {
        for (j, slot) in out.iter_mut().enumerate().take(self.dims()) {
            *slot = self.slope_axis(t, j);
        }
    }

    pub fn slope(&self, t: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.slope_into(t, &mut out);
        out
    }

    /// # Panics
    /// If `dim >= self.dims()`.
    pub fn slope_axis(&self, t: f64, dim: usize) -> f64 {
        let s = &self.series;
        let i = s.segment(s.clamp(t));
        (s.value(i + 1, dim) - s.value(i, dim)) / s.span(i)
    }

    /// Distance travelled along the first two dimensions from the start up to `t`.
    ///
    /// Zero before the first waypoint, the full polyline length after the last one,
    /// and always zero for one-dimensional curves.
    pub fn length_2d(&self, t: f64) -> f64 {
        let Some(&total) = self.path_length.last() else {
            return 0.0;
        };
        let s = &self.series;
        if t <= s.first_time() {
            return 0.0;
        }
        if t >= s.last_time() {
            return total;
        }
        let i = s.segment(t);
        let x = (t - s.times()[i]) / s.span(i);
        let dx = (s.value(i + 1, 0) - s.value(i, 0)) * x;
        let dy = (s.value(i + 1, 1) - s.value(i, 1)) * x;
        self.path_length[i] + dx.hypot(dy)
    }

    /// Full x/y polyline length.
    pub fn total_length_2d(&self) -> f64 {
        self.path_length.last().copied().unwrap_or(0.0)
    }
}
