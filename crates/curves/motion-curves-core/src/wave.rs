//! Periodic extension of sampled levels, shared by step easings and custom oscillator waves.

use crate::error::CurveError;
use crate::mono::MonoSpline;

/// Monotone spline through `values` spread evenly over `[0, 1]`, with one replica
/// period on each side so value and slope stay continuous across the wrap.
///
/// The replicas are shifted by `values[last] - values[0]`: a ramp keeps rising from
/// period to period while a closed shape (equal ends) repeats in place.
pub(crate) fn periodic_wave(values: &[f64]) -> Result<MonoSpline, CurveError> {
    if values.len() < 2 {
        return Err(CurveError::TooFewPoints {
            required: 2,
            actual: values.len(),
        });
    }
    let len = values.len() - 1;
    let gap = 1.0 / len as f64;
    let step = values[len] - values[0];

    let count = 3 * len + 1;
    let mut times = Vec::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    for (j, v) in values.iter().enumerate().take(len) {
        times.push(j as f64 * gap - 1.0);
        points.push([v - step]);
    }
    for (j, v) in values.iter().enumerate() {
        times.push(j as f64 * gap);
        points.push([*v]);
    }
    for (j, v) in values.iter().enumerate().skip(1) {
        times.push(1.0 + j as f64 * gap);
        points.push([v + step]);
    }
    MonoSpline::new(&times, &points)
}
