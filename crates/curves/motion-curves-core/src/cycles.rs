//! Variable-frequency oscillator over normalized progress.
//!
//! Model:
//! - The schedule is a piecewise-linear "period" (cycles per unit progress) curve
//!   keyed by `(position, period)` pairs in `[0, 1]`.
//! - `normalize()` rescales the periods so the area under the curve equals the sum of
//!   the declared periods, and caches the cumulative area at every key.
//! - Phase is the integral of that curve, piecewise quadratic and continuous.
//! - A wave shape maps phase (in turns) to an output in roughly `[-1, 1]`.

use std::f64::consts::TAU;
use std::fmt;

use log::debug;

use crate::easing::parse_args;
use crate::error::{ConfigError, CurveError};
use crate::mono::MonoSpline;
use crate::wave::periodic_wave;

/// Waveform applied to the accumulated phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WaveShape {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
    ReverseSawtooth,
    Cosine,
    /// Repeating parabolic hops `1 - x²`.
    Bounce,
    /// Periodic monotone spline over one turn.
    Custom(MonoSpline),
}

impl WaveShape {
    /// Canonical names accepted by [`WaveShape::from_name`].
    pub const NAMES: [&'static str; 7] = [
        "sin",
        "square",
        "triangle",
        "sawtooth",
        "reverseSawtooth",
        "cos",
        "bounce",
    ];

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Ok(match name.trim() {
            "sin" | "sine" => WaveShape::Sine,
            "square" => WaveShape::Square,
            "triangle" => WaveShape::Triangle,
            "sawtooth" | "saw" => WaveShape::Sawtooth,
            "reverseSawtooth" | "reverseSaw" => WaveShape::ReverseSawtooth,
            "cos" | "cosine" => WaveShape::Cosine,
            "bounce" => WaveShape::Bounce,
            other => {
                return Err(ConfigError::UnknownWave {
                    name: other.to_string(),
                    known: Self::NAMES.join(", "),
                })
            }
        })
    }

    /// Custom wave from evenly spaced levels over one turn.
    pub fn custom(values: &[f64]) -> Result<Self, CurveError> {
        Ok(WaveShape::Custom(periodic_wave(values)?))
    }

    /// Custom wave from a `spline(v0, v1, ..)` string.
    pub fn parse_custom(spec: &str) -> Result<Self, CurveError> {
        let values = parse_args(spec, "spline")?;
        if values.len() < 2 {
            return Err(ConfigError::TooFewValues {
                spec: spec.to_string(),
                required: 2,
                actual: values.len(),
            }
            .into());
        }
        Self::custom(&values)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sin",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::ReverseSawtooth => "reverseSawtooth",
            WaveShape::Cosine => "cos",
            WaveShape::Bounce => "bounce",
            WaveShape::Custom(_) => "custom",
        }
    }
}

/// Sign with `sign(0) == 0`.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Oscillator schedule. Add points, call [`Cycles::normalize`], then query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cycles {
    positions: Vec<f64>,
    periods: Vec<f64>,
    /// Cumulative area under the period curve at each position.
    area: Vec<f64>,
    wave: WaveShape,
    normalized: bool,
}

impl Cycles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wave(wave: WaveShape) -> Self {
        Self {
            wave,
            ..Self::default()
        }
    }

    /// Insert a key, keeping positions sorted. Invalidates normalization.
    pub fn add_point(&mut self, position: f64, period: f64) {
        let j = self.positions.partition_point(|&p| p < position);
        self.positions.insert(j, position);
        self.periods.insert(j, period);
        self.area = vec![0.0; self.positions.len()];
        self.normalized = false;
    }

    pub fn set_wave(&mut self, wave: WaveShape) {
        self.wave = wave;
    }

    /// Replace the wave with a custom `spline(v0, v1, ..)` shape.
    pub fn set_custom_wave(&mut self, spec: &str) -> Result<(), CurveError> {
        self.wave = WaveShape::parse_custom(spec)?;
        Ok(())
    }

    #[inline]
    pub fn wave(&self) -> &WaveShape {
        &self.wave
    }

    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    #[inline]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Periods, rescaled once normalized.
    #[inline]
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Scale periods so the total phase over the schedule equals the sum of the
    /// declared periods, and rebuild the cumulative-area table.
    pub fn normalize(&mut self) -> Result<(), CurveError> {
        let n = self.periods.len();
        if n < 2 {
            return Err(CurveError::DegenerateSchedule {
                reason: format!("needs at least 2 points, got {n}"),
            });
        }
        let total_count: f64 = self.periods.iter().sum();
        let total_area = self.trapezoid_area();
        if !total_area.is_finite() || total_area == 0.0 {
            return Err(CurveError::DegenerateSchedule {
                reason: format!("area under the period curve is {total_area}"),
            });
        }
        let scale = total_count / total_area;
        for period in &mut self.periods {
            *period *= scale;
        }

        self.area = Vec::with_capacity(n);
        self.area.push(0.0);
        for i in 1..n {
            let h = (self.periods[i - 1] + self.periods[i]) * 0.5;
            let w = self.positions[i] - self.positions[i - 1];
            self.area.push(self.area[i - 1] + w * h);
        }
        self.normalized = true;
        debug!("normalized cycles: {} (scale {scale})", self);
        Ok(())
    }

    fn trapezoid_area(&self) -> f64 {
        self.positions
            .windows(2)
            .zip(self.periods.windows(2))
            .map(|(x, p)| (x[1] - x[0]) * (p[0] + p[1]) * 0.5)
            .sum()
    }

    /// Accumulated phase (in turns) at `time`, clamped to `[0, 1]`.
    ///
    /// Before the first key the phase is 0; after the last it holds the total.
    pub fn phase(&self, time: f64) -> f64 {
        let n = self.positions.len();
        if n == 0 {
            return 0.0;
        }
        let time = time.clamp(0.0, 1.0);
        let idx = self.positions.partition_point(|&p| p < time);
        if idx == 0 {
            return 0.0;
        }
        if idx == n {
            return self.area[n - 1];
        }
        if self.positions[idx] == time {
            return self.area[idx];
        }
        let (x0, x1) = (self.positions[idx - 1], self.positions[idx]);
        let (p0, p1) = (self.periods[idx - 1], self.periods[idx]);
        let m = (p1 - p0) / (x1 - x0);
        self.area[idx - 1] + (p0 - m * x0) * (time - x0) + m * (time * time - x0 * x0) * 0.5
    }

    /// `d phase / d time` at `time`, clamped to `[0, 1]`: the interpolated period.
    ///
    /// Zero outside the keyed range, where [`Cycles::phase`] is constant.
    pub fn phase_rate(&self, time: f64) -> f64 {
        let n = self.positions.len();
        if n == 0 {
            return 0.0;
        }
        let time = time.clamp(0.0, 1.0);
        let idx = self.positions.partition_point(|&p| p < time);
        if idx == n {
            return 0.0;
        }
        if self.positions[idx] == time {
            return self.periods[idx];
        }
        if idx == 0 {
            return 0.0;
        }
        let (x0, x1) = (self.positions[idx - 1], self.positions[idx]);
        let (p0, p1) = (self.periods[idx - 1], self.periods[idx]);
        p0 + (p1 - p0) * (time - x0) / (x1 - x0)
    }

    /// Wave output at `time` with a constant phase offset (in turns).
    pub fn value(&self, time: f64, phase: f64) -> f64 {
        let angle = phase + self.phase(time);
        match &self.wave {
            WaveShape::Sine => (TAU * angle).sin(),
            WaveShape::Square => sign(0.5 - angle.rem_euclid(1.0)),
            WaveShape::Triangle => 1.0 - ((angle * 4.0 + 1.0).rem_euclid(4.0) - 2.0).abs(),
            WaveShape::Sawtooth => (angle * 2.0 + 1.0).rem_euclid(2.0) - 1.0,
            WaveShape::ReverseSawtooth => 1.0 - (angle * 2.0 + 1.0).rem_euclid(2.0),
            WaveShape::Cosine => (TAU * angle).cos(),
            WaveShape::Bounce => {
                let x = 1.0 - ((angle * 4.0).rem_euclid(4.0) - 2.0).abs();
                1.0 - x * x
            }
            WaveShape::Custom(curve) => curve.pos_axis(angle.rem_euclid(1.0), 0),
        }
    }

    /// Derivative of [`Cycles::value`] with respect to `time`, where `dphase` is the
    /// rate of change of the caller's phase offset.
    pub fn slope(&self, time: f64, phase: f64, dphase: f64) -> f64 {
        let angle = phase + self.phase(time);
        let rate = self.phase_rate(time) + dphase;
        match &self.wave {
            WaveShape::Sine => TAU * rate * (TAU * angle).cos(),
            WaveShape::Square => 0.0,
            WaveShape::Triangle => {
                -4.0 * rate * sign((angle * 4.0 + 1.0).rem_euclid(4.0) - 2.0)
            }
            WaveShape::Sawtooth => 2.0 * rate,
            WaveShape::ReverseSawtooth => -2.0 * rate,
            WaveShape::Cosine => -TAU * rate * (TAU * angle).sin(),
            WaveShape::Bounce => {
                let u = (angle * 4.0).rem_euclid(4.0) - 2.0;
                let x = 1.0 - u.abs();
                8.0 * rate * x * sign(u)
            }
            WaveShape::Custom(curve) => rate * curve.slope_axis(angle.rem_euclid(1.0), 0),
        }
    }
}

impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos={:?} period={:?}", self.positions, self.periods)
    }
}
