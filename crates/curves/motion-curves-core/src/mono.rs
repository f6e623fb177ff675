//! Monotone cubic Hermite interpolation in N dimensions (Fritsch–Carlson tangents).

use crate::error::CurveError;
use crate::series::{Extrapolation, Series};

/// Tangents are rescaled when `hypot(m_i / s_i, m_{i+1} / s_i)` exceeds this radius.
const MONOTONE_RADIUS: f64 = 3.0;

/// Cubic Hermite interpolant whose tangents are limited so monotone data never overshoots.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoSpline {
    series: Series,
    tangents: Vec<f64>,
    extrapolation: Extrapolation,
}

impl MonoSpline {
    /// Build from strictly increasing `times` and one waypoint row per time.
    pub fn new<P: AsRef<[f64]>>(times: &[f64], points: &[P]) -> Result<Self, CurveError> {
        let series = Series::new(times, points)?;
        let tangents = monotone_tangents(&series);
        Ok(Self {
            series,
            tangents,
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

    /// Tangent of dimension `dim` at waypoint `index`.
    #[inline]
    pub fn tangent(&self, index: usize, dim: usize) -> f64 {
        self.tangents[index * self.dims() + dim]
    }

    /// Write the position at `t` into `out` (one slot per dimension).
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

    /// Position of a single dimension.
    ///
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
        let h = s.span(i);
        let x = (t - s.times()[i]) / h;
        hermite(
            h,
            x,
            s.value(i, dim),
            s.value(i + 1, dim),
            self.tangent(i, dim),
            self.tangent(i + 1, dim),
        )
    }

    /// Write the slope at `t` into `out`. Outside the domain this is the boundary slope.
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

    /// Slope of a single dimension.
    ///
    /// # Panics
    /// If `dim >= self.dims()`.
    pub fn slope_axis(&self, t: f64, dim: usize) -> f64 {
        let s = &self.series;
        let t = s.clamp(t);
        let i = s.segment(t);
        let h = s.span(i);
        let x = (t - s.times()[i]) / h;
        hermite_diff(
            h,
            x,
            s.value(i, dim),
            s.value(i + 1, dim),
            self.tangent(i, dim),
            self.tangent(i + 1, dim),
        ) / h
    }
}

/// Averaged-secant tangents limited to the monotonicity circle of radius 3.
fn monotone_tangents(series: &Series) -> Vec<f64> {
    let n = series.len();
    let dims = series.dims();
    let mut secants = vec![0.0; (n - 1) * dims];
    let mut tangents = vec![0.0; n * dims];

    for j in 0..dims {
        for i in 0..(n - 1) {
            let s = (series.value(i + 1, j) - series.value(i, j)) / series.span(i);
            secants[i * dims + j] = s;
            tangents[i * dims + j] = if i == 0 {
                s
            } else {
                (secants[(i - 1) * dims + j] + s) * 0.5
            };
        }
        tangents[(n - 1) * dims + j] = secants[(n - 2) * dims + j];
    }

    for i in 0..(n - 1) {
        for j in 0..dims {
            let s = secants[i * dims + j];
            let (left, right) = (i * dims + j, (i + 1) * dims + j);
            if s == 0.0 {
                // Flat data stays flat.
                tangents[left] = 0.0;
                tangents[right] = 0.0;
            } else {
                let a = tangents[left] / s;
                let b = tangents[right] / s;
                let h = a.hypot(b);
                if h > MONOTONE_RADIUS {
                    let k = MONOTONE_RADIUS / h;
                    tangents[left] = k * a * s;
                    tangents[right] = k * b * s;
                }
            }
        }
    }
    tangents
}

/// Cubic Hermite basis on a segment of width `h`, local parameter `x` in [0,1].
#[inline]
fn hermite(h: f64, x: f64, y1: f64, y2: f64, m1: f64, m2: f64) -> f64 {
    let x2 = x * x;
    let x3 = x2 * x;
    (2.0 * x3 - 3.0 * x2 + 1.0) * y1
        + (x3 - 2.0 * x2 + x) * h * m1
        + (3.0 * x2 - 2.0 * x3) * y2
        + (x3 - x2) * h * m2
}

/// Derivative of [`hermite`] with respect to `x`.
#[inline]
fn hermite_diff(h: f64, x: f64, y1: f64, y2: f64, m1: f64, m2: f64) -> f64 {
    let x2 = x * x;
    (6.0 * x2 - 6.0 * x) * (y1 - y2) + (3.0 * x2 - 4.0 * x + 1.0) * h * m1 + (3.0 * x2 - 2.0 * x) * h * m2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hermite_hits_endpoints_and_tangents() {
        assert_abs_diff_eq!(hermite(2.0, 0.0, 1.0, 5.0, 0.3, 0.7), 1.0);
        assert_abs_diff_eq!(hermite(2.0, 1.0, 1.0, 5.0, 0.3, 0.7), 5.0);
        assert_abs_diff_eq!(hermite_diff(2.0, 0.0, 1.0, 5.0, 0.3, 0.7) / 2.0, 0.3);
        assert_abs_diff_eq!(hermite_diff(2.0, 1.0, 1.0, 5.0, 0.3, 0.7) / 2.0, 0.7);
    }

    #[test]
    fn flat_segments_zero_both_tangents() {
        let spline = MonoSpline::new(&[0.0, 1.0, 2.0, 3.0], &[[0.0], [1.0], [1.0], [2.0]]).unwrap();
        assert_eq!(spline.tangent(1, 0), 0.0);
        assert_eq!(spline.tangent(2, 0), 0.0);
        assert_abs_diff_eq!(spline.pos_axis(1.5, 0), 1.0);
    }

    #[test]
    fn steep_tangents_are_pulled_into_the_circle() {
        // Secants 0.1 then 10: the averaged tangent at the middle point is 5.05,
        // far outside the radius-3 circle for the first segment.
        let spline = MonoSpline::new(&[0.0, 1.0, 2.0], &[[0.0], [0.1], [10.1]]).unwrap();
        let a = spline.tangent(0, 0) / 0.1;
        let b = spline.tangent(1, 0) / 0.1;
        assert!(a.hypot(b) <= MONOTONE_RADIUS + 1e-9);
    }

    #[test]
    fn clamp_extrapolation_holds_boundary_values() {
        let spline = MonoSpline::new(&[0.0, 1.0], &[[2.0, 0.0], [4.0, 1.0]])
            .unwrap()
            .with_extrapolation(Extrapolation::Clamp);
        assert_eq!(spline.pos(-1.0), vec![2.0, 0.0]);
        assert_eq!(spline.pos(3.0), vec![4.0, 1.0]);
        // Slope keeps reporting the boundary tangent.
        assert_abs_diff_eq!(spline.slope_axis(3.0, 0), 2.0);
    }
}
