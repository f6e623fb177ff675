//! 2-D motion paths stitched from quarter-ellipse arcs and straight lines.
//!
//! Model:
//! - Each segment `[t_i, t_{i+1}]` joins two waypoints with either a quarter ellipse
//!   (axes aligned, major direction chosen per segment) or a line.
//! - Along an arc the angle is not linear in time: a 101-entry table maps the fraction of
//!   elapsed time to the angle at which the same fraction of arc length has been covered,
//!   so the speed along the arc is constant.
//! - Outside the time domain the path continues along the boundary tangent.

use std::f64::consts::FRAC_PI_2;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::series::{Extrapolation, Series};

/// Segments with `|dx|` or `|dy|` under this size are drawn as lines.
const EPSILON: f64 = 0.001;
/// Angle samples used to measure the quarter ellipse.
const ANGLE_SAMPLES: usize = 91;
/// Entries in the time -> angle lookup table.
const LUT_SIZE: usize = 101;

/// Requested traversal for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArcMode {
    /// Leave the start point vertically.
    StartVertical,
    /// Leave the start point horizontally.
    StartHorizontal,
    /// Opposite orientation of the previous oriented segment.
    StartFlip,
    /// Straight line.
    StartLinear,
    /// Bulge upwards (vertical start when moving up the screen, `dy < 0`).
    ArcAbove,
    /// Bulge downwards (vertical start when `dy > 0`).
    ArcBelow,
}

/// Position and velocity of the path at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSample {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Vertical,
    Horizontal,
    Linear,
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Line {
        slope: [f64; 2],
    },
    Ellipse {
        vertical: bool,
        center: [f64; 2],
        axes: [f64; 2],
        lut: Box<[f64; LUT_SIZE]>,
    },
}

/// One segment of an [`ArcSpline`].
#[derive(Debug, Clone, PartialEq)]
struct Arc {
    t1: f64,
    t2: f64,
    inv_dt: f64,
    start: [f64; 2],
    end: [f64; 2],
    length: f64,
    /// Constant speed along the segment (`length / dt`).
    speed: f64,
    shape: Shape,
}

impl Arc {
    fn new(request: Request, t1: f64, t2: f64, start: [f64; 2], end: [f64; 2]) -> Self {
        let dx = end[0] - start[0];
        let dy = end[1] - start[1];
        let dt = t2 - t1;
        let inv_dt = 1.0 / dt;
        let vertical = match request {
            Request::Vertical => true,
            Request::Above => dy < 0.0,
            Request::Below => dy > 0.0,
            Request::Horizontal | Request::Linear => false,
        };

        let (shape, length) = if request == Request::Linear || dx.abs() < EPSILON || dy.abs() < EPSILON
        {
            if request != Request::Linear {
                trace!("arc segment [{t1}, {t2}] degenerates to a line (dx={dx}, dy={dy})");
            }
            let slope = [dx * inv_dt, dy * inv_dt];
            (Shape::Line { slope }, dx.hypot(dy))
        } else {
            let axes = if vertical { [-dx, dy] } else { [dx, -dy] };
            let center = if vertical {
                [end[0], start[1]]
            } else {
                [start[0], end[1]]
            };
            let (lut, length) = build_lut(dx, -dy);
            let shape = Shape::Ellipse {
                vertical,
                center,
                axes,
                lut,
            };
            (shape, length)
        };

        Self {
            t1,
            t2,
            inv_dt,
            start,
            end,
            length,
            speed: length * inv_dt,
            shape,
        }
    }

    /// Position and velocity at `t` (expected inside `[t1, t2]`).
    fn sample(&self, t: f64) -> ArcSample {
        match &self.shape {
            Shape::Line { slope } => {
                let u = (t - self.t1) * self.inv_dt;
                ArcSample {
                    pos: [
                        self.start[0] + u * (self.end[0] - self.start[0]),
                        self.start[1] + u * (self.end[1] - self.start[1]),
                    ],
                    vel: *slope,
                }
            }
            Shape::Ellipse {
                vertical,
                center,
                axes,
                lut,
            } => {
                let elapsed = if *vertical { self.t2 - t } else { t - self.t1 };
                let angle = FRAC_PI_2 * lookup(lut, elapsed * self.inv_dt);
                let (sin, cos) = angle.sin_cos();
                let vx = axes[0] * cos;
                let vy = -axes[1] * sin;
                let norm = self.speed / vx.hypot(vy);
                let dir = if *vertical { -norm } else { norm };
                ArcSample {
                    pos: [center[0] + axes[0] * sin, center[1] + axes[1] * cos],
                    vel: [vx * dir, vy * dir],
                }
            }
        }
    }

    fn is_line(&self) -> bool {
        matches!(self.shape, Shape::Line { .. })
    }
}

/// Measure the quarter ellipse `(a sin θ, b cos θ)` and invert arc length -> angle.
fn build_lut(a: f64, b: f64) -> (Box<[f64; LUT_SIZE]>, f64) {
    let mut percent = [0.0f64; ANGLE_SAMPLES];
    let last = (ANGLE_SAMPLES - 1) as f64;
    let (mut lx, mut ly) = (0.0, 0.0);
    let mut dist = 0.0;
    for (i, slot) in percent.iter_mut().enumerate() {
        let (sin, cos) = (FRAC_PI_2 * i as f64 / last).sin_cos();
        let (px, py) = (a * sin, b * cos);
        if i > 0 {
            dist += (px - lx).hypot(py - ly);
            *slot = dist;
        }
        lx = px;
        ly = py;
    }
    for p in percent.iter_mut() {
        *p /= dist;
    }

    let lut = std::array::from_fn(|i| {
        let pos = i as f64 / (LUT_SIZE - 1) as f64;
        let idx = percent.partition_point(|&p| p < pos);
        if idx >= ANGLE_SAMPLES {
            1.0
        } else if percent[idx] == pos {
            idx as f64 / last
        } else if idx == 0 {
            0.0
        } else {
            let (p1, p2) = (idx - 1, idx);
            (p1 as f64 + (pos - percent[p1]) / (percent[p2] - percent[p1])) / last
        }
    });
    (Box::new(lut), dist)
}

/// Normalized angle for a normalized elapsed time, linearly interpolated.
#[inline]
fn lookup(lut: &[f64; LUT_SIZE], v: f64) -> f64 {
    if v <= 0.0 {
        return 0.0;
    }
    if v >= 1.0 {
        return 1.0;
    }
    let pos = v * (LUT_SIZE - 1) as f64;
    let iv = pos as usize;
    let off = pos - iv as f64;
    lut[iv] + off * (lut[iv + 1] - lut[iv])
}

/// Piecewise path of quarter ellipses and lines through 2-D waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSpline {
    arcs: Vec<Arc>,
    extrapolation: Extrapolation,
}

impl ArcSpline {
    /// Build from one mode per segment, strictly increasing `times` and 2-D waypoints.
    pub fn new<P: AsRef<[f64]>>(
        modes: &[ArcMode],
        times: &[f64],
        points: &[P],
    ) -> Result<Self, CurveError> {
        let series = Series::new(times, points)?;
        if series.dims() != 2 {
            return Err(CurveError::DimensionMismatch {
                index: 0,
                expected: 2,
                actual: series.dims(),
            });
        }
        let segments = series.len() - 1;
        if modes.len() != segments {
            return Err(CurveError::ModeCountMismatch {
                expected: segments,
                actual: modes.len(),
            });
        }

        let mut last_vertical = true;
        let arcs = modes
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let request = match mode {
                    ArcMode::StartVertical => {
                        last_vertical = true;
                        Request::Vertical
                    }
                    ArcMode::StartHorizontal => {
                        last_vertical = false;
                        Request::Horizontal
                    }
                    ArcMode::StartFlip => {
                        last_vertical = !last_vertical;
                        if last_vertical {
                            Request::Vertical
                        } else {
                            Request::Horizontal
                        }
                    }
                    ArcMode::StartLinear => Request::Linear,
                    ArcMode::ArcAbove => Request::Above,
                    ArcMode::ArcBelow => Request::Below,
                };
                let start = [series.value(i, 0), series.value(i, 1)];
                let end = [series.value(i + 1, 0), series.value(i + 1, 1)];
                Arc::new(request, times[i], times[i + 1], start, end)
            })
            .collect();

        Ok(Self {
            arcs,
            extrapolation: Extrapolation::default(),
        })
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    #[inline]
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.arcs.len()
    }

    /// Whether segment `index` was drawn as a straight line.
    pub fn is_linear_segment(&self, index: usize) -> bool {
        self.arcs[index].is_line()
    }

    /// Total length of the path between the first and last waypoint.
    pub fn arc_length(&self) -> f64 {
        self.arcs.iter().map(|a| a.length).sum()
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.arcs[0].t1, self.arcs[self.arcs.len() - 1].t2)
    }

    /// Position and velocity together.
    pub fn sample(&self, t: f64) -> ArcSample {
        let first = &self.arcs[0];
        let last = &self.arcs[self.arcs.len() - 1];
        if t < first.t1 {
            return self.extend(first.sample(first.t1), t - first.t1);
        }
        if t > last.t2 {
            return self.extend(last.sample(last.t2), t - last.t2);
        }
        let arc = self
            .arcs
            .iter()
            .find(|arc| t <= arc.t2)
            .unwrap_or(last);
        arc.sample(t)
    }

    fn extend(&self, edge: ArcSample, dt: f64) -> ArcSample {
        match self.extrapolation {
            Extrapolation::Linear => ArcSample {
                pos: [edge.pos[0] + dt * edge.vel[0], edge.pos[1] + dt * edge.vel[1]],
                vel: edge.vel,
            },
            Extrapolation::Clamp => edge,
        }
    }

    #[inline]
    pub fn pos(&self, t: f64) -> [f64; 2] {
        self.sample(t).pos
    }

    /// Velocity at `t`; outside the domain this is the boundary velocity.
    #[inline]
    pub fn slope(&self, t: f64) -> [f64; 2] {
        self.sample(t).vel
    }

    /// # Panics
    /// If `axis > 1`.
    #[inline]
    pub fn pos_axis(&self, t: f64, axis: usize) -> f64 {
        self.pos(t)[axis]
    }

    /// # Panics
    /// If `axis > 1`.
    #[inline]
    pub fn slope_axis(&self, t: f64, axis: usize) -> f64 {
        self.slope(t)[axis]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circle_lut_is_the_identity() {
        // Equal axes: arc length is proportional to angle.
        let (lut, length) = build_lut(1.0, -1.0);
        for (i, v) in lut.iter().enumerate() {
            assert_abs_diff_eq!(*v, i as f64 / 100.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(length, FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn flat_ellipse_lut_is_monotone_and_pinned() {
        let (lut, _) = build_lut(4.0, -0.5);
        assert_eq!(lut[0], 0.0);
        assert_abs_diff_eq!(lut[LUT_SIZE - 1], 1.0, epsilon = 1e-12);
        assert!(lut.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn lookup_clamps_and_propagates_nan() {
        let (lut, _) = build_lut(1.0, -1.0);
        assert_eq!(lookup(&lut, -0.5), 0.0);
        assert_eq!(lookup(&lut, 1.5), 1.0);
        assert!(lookup(&lut, f64::NAN).is_nan());
    }

    #[test]
    fn near_flat_segments_fall_back_to_lines() {
        let spline = ArcSpline::new(
            &[ArcMode::StartVertical, ArcMode::StartHorizontal],
            &[0.0, 1.0, 2.0],
            &[[0.0, 0.0], [1.0, 0.0005], [2.0, 1.0]],
        )
        .unwrap();
        assert!(spline.is_linear_segment(0));
        assert!(!spline.is_linear_segment(1));
    }

    #[test]
    fn flip_alternates_from_the_previous_orientation() {
        let spline = ArcSpline::new(
            &[ArcMode::StartHorizontal, ArcMode::StartFlip, ArcMode::StartFlip],
            &[0.0, 1.0, 2.0, 3.0],
            &[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
        )
        .unwrap();
        let vertical: Vec<bool> = spline
            .arcs
            .iter()
            .map(|a| matches!(a.shape, Shape::Ellipse { vertical: true, .. }))
            .collect();
        assert_eq!(vertical, vec![false, true, false]);
    }
}
