//! Keyed time-series storage shared by the interpolating curves.
//!
//! Model:
//! - `times` is strictly increasing and has at least two entries.
//! - Waypoints are stored row-major (`values[i * dims + j]`), one row per time point.
//! - Segment `i` spans `[times[i], times[i + 1]]`.
//!
//! Constructors validate the caller contract and report violations as [`CurveError`];
//! evaluation code only keeps debug assertions.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// What a curve returns for progress values outside its time domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Continue linearly with the slope at the nearest boundary point.
    #[default]
    Linear,
    /// Hold the boundary value.
    Clamp,
}

/// Validated copy of a keyed series.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Series {
    times: Vec<f64>,
    values: Vec<f64>,
    dims: usize,
}

impl Series {
    pub(crate) fn new<P: AsRef<[f64]>>(times: &[f64], points: &[P]) -> Result<Self, CurveError> {
        if times.len() != points.len() {
            return Err(CurveError::LengthMismatch {
                times: times.len(),
                points: points.len(),
            });
        }
        check_increasing(times)?;
        let (dims, values) = flatten_rows(points, 2)?;
        Ok(Self {
            times: times.to_vec(),
            values,
            dims,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub(crate) fn dims(&self) -> usize {
        self.dims
    }

    #[inline]
    pub(crate) fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub(crate) fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dims + j]
    }

    #[inline]
    pub(crate) fn first_time(&self) -> f64 {
        self.times[0]
    }

    #[inline]
    pub(crate) fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index of the first segment whose end is at or after `t`.
    /// Times past the end (and NaN) land in the last segment.
    pub(crate) fn segment(&self, t: f64) -> usize {
        let n = self.times.len();
        debug_assert!(n >= 2, "series must hold at least two points");
        // Linear scan: point counts are small (typically < 20).
        for i in 0..(n - 1) {
            if t <= self.times[i + 1] {
                return i;
            }
        }
        n - 2
    }

    /// Width of segment `i`.
    #[inline]
    pub(crate) fn span(&self, i: usize) -> f64 {
        let h = self.times[i + 1] - self.times[i];
        debug_assert!(h > 0.0, "segment {i} has non-positive width {h}");
        h
    }

    /// Clamp `t` into the time domain.
    #[inline]
    pub(crate) fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.first_time(), self.last_time())
    }
}

/// Reject time sequences that are not strictly increasing (NaN included).
pub(crate) fn check_increasing(times: &[f64]) -> Result<(), CurveError> {
    if times.len() < 2 {
        return Err(CurveError::TooFewPoints {
            required: 2,
            actual: times.len(),
        });
    }
    for (index, pair) in times.windows(2).enumerate() {
        // `!(a < b)` also catches NaN.
        if !(pair[0] < pair[1]) {
            return Err(CurveError::NonIncreasingTime {
                index: index + 1,
                previous: pair[0],
                value: pair[1],
            });
        }
    }
    Ok(())
}

/// Copy rows of equal length into a row-major buffer, returning `(dims, values)`.
pub(crate) fn flatten_rows<P: AsRef<[f64]>>(
    points: &[P],
    required: usize,
) -> Result<(usize, Vec<f64>), CurveError> {
    if points.len() < required {
        return Err(CurveError::TooFewPoints {
            required,
            actual: points.len(),
        });
    }
    let dims = points[0].as_ref().len();
    let mut values = Vec::with_capacity(dims * points.len());
    for (index, point) in points.iter().enumerate() {
        let row = point.as_ref();
        if row.is_empty() || row.len() != dims {
            return Err(CurveError::DimensionMismatch {
                index,
                expected: dims.max(1),
                actual: row.len(),
            });
        }
        values.extend_from_slice(row);
    }
    Ok((dims, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_increasing_and_nan_times() {
        let pts = [[0.0], [1.0], [2.0]];
        assert_eq!(
            Series::new(&[0.0, 1.0, 1.0], &pts).unwrap_err(),
            CurveError::NonIncreasingTime {
                index: 2,
                previous: 1.0,
                value: 1.0
            }
        );
        assert!(matches!(
            Series::new(&[0.0, f64::NAN, 2.0], &pts),
            Err(CurveError::NonIncreasingTime { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows_and_length_mismatch() {
        let ragged: Vec<Vec<f64>> = vec![vec![0.0, 1.0], vec![2.0]];
        assert_eq!(
            Series::new(&[0.0, 1.0], &ragged).unwrap_err(),
            CurveError::DimensionMismatch {
                index: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            Series::new(&[0.0, 1.0, 2.0], &[[0.0], [1.0]]).unwrap_err(),
            CurveError::LengthMismatch {
                times: 3,
                points: 2
            }
        );
        assert!(matches!(
            Series::new(&[0.0], &[[0.0]]),
            Err(CurveError::TooFewPoints { required: 2, .. })
        ));
    }

    #[test]
    fn segment_lookup_includes_knots_and_clamps_the_tail() {
        let series = Series::new(&[0.0, 1.0, 3.0], &[[0.0], [1.0], [2.0]]).unwrap();
        assert_eq!(series.segment(-5.0), 0);
        assert_eq!(series.segment(1.0), 0);
        assert_eq!(series.segment(1.5), 1);
        assert_eq!(series.segment(10.0), 1);
        assert_eq!(series.value(2, 0), 2.0);
    }
}
