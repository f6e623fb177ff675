//! JSON descriptors for curves, oscillators and easings.
//!
//! A motion document bundles named entries:
//!
//! ```json
//! {
//!   "curves": {
//!     "slide": { "kind": "monotone", "times": [0, 1], "points": [[0, 0], [100, 40]] },
//!     "hop":   { "kind": "arc", "modes": ["arcAbove"], "times": [0, 1], "points": [[0, 0], [1, -1]] }
//!   },
//!   "cycles": { "wobble": { "points": [{ "position": 0, "period": 1 }, { "position": 1, "period": 3 }], "wave": "sin" } },
//!   "easings": { "enter": "standard", "bias": { "s": 2, "t": 0.5 } }
//! }
//! ```
//!
//! Curve and oscillator entries fail the whole load with a descriptive error. Easing entries
//! fall back to identity and are reported in [`Motion::diagnostics`], so motion keeps playing.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::arc::{ArcMode, ArcSpline};
use crate::curve::{Curve, KeyCurve};
use crate::cycles::{Cycles, WaveShape};
use crate::easing::{parse_easing, Easing, StepCurve};
use crate::error::{ConfigError, CurveError};
use crate::linear::LinearCurve;
use crate::mono::MonoSpline;
use crate::natural::Spline;
use crate::series::Extrapolation;

/// One curve, tagged by interpolation kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CurveDescriptor {
    Monotone {
        times: Vec<f64>,
        points: Vec<Vec<f64>>,
        #[serde(default)]
        extrapolation: Extrapolation,
    },
    Linear {
        times: Vec<f64>,
        points: Vec<Vec<f64>>,
        #[serde(default)]
        extrapolation: Extrapolation,
    },
    Arc {
        modes: Vec<ArcMode>,
        times: Vec<f64>,
        points: Vec<Vec<f64>>,
        #[serde(default)]
        extrapolation: Extrapolation,
    },
    /// Natural cubic spline parametrized by arc length; no timestamps.
    Natural { points: Vec<Vec<f64>> },
}

/// A built curve: time-keyed, or a natural spline addressed by path fraction.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCurve {
    Keyed(KeyCurve),
    Natural(Spline),
}

impl MotionCurve {
    pub fn dims(&self) -> usize {
        match self {
            MotionCurve::Keyed(c) => c.dims(),
            MotionCurve::Natural(s) => s.dims(),
        }
    }

    /// Position at progress `t` (path fraction for natural splines).
    pub fn pos(&self, t: f64) -> Vec<f64> {
        match self {
            MotionCurve::Keyed(c) => c.pos(t),
            MotionCurve::Natural(s) => s.pos(t),
        }
    }

    /// # Panics
    /// If `axis >= self.dims()`.
    pub fn pos_axis(&self, t: f64, axis: usize) -> f64 {
        match self {
            MotionCurve::Keyed(c) => c.pos_axis(t, axis),
            MotionCurve::Natural(s) => s.pos_axis(t, axis),
        }
    }

    pub fn as_keyed(&self) -> Option<&KeyCurve> {
        match self {
            MotionCurve::Keyed(c) => Some(c),
            MotionCurve::Natural(_) => None,
        }
    }
}

impl CurveDescriptor {
    pub fn from_json(s: &str) -> Result<Self, CurveError> {
        serde_json::from_str(s).map_err(|e| CurveError::Descriptor {
            reason: format!("parse error: {e}"),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CurveDescriptor::Monotone { .. } => "monotone",
            CurveDescriptor::Linear { .. } => "linear",
            CurveDescriptor::Arc { .. } => "arc",
            CurveDescriptor::Natural { .. } => "natural",
        }
    }

    pub fn build(&self) -> Result<MotionCurve, CurveError> {
        let curve = match self {
            CurveDescriptor::Monotone {
                times,
                points,
                extrapolation,
            } => MotionCurve::Keyed(
                MonoSpline::new(times, points)?
                    .with_extrapolation(*extrapolation)
                    .into(),
            ),
            CurveDescriptor::Linear {
                times,
                points,
                extrapolation,
            } => MotionCurve::Keyed(
                LinearCurve::new(times, points)?
                    .with_extrapolation(*extrapolation)
                    .into(),
            ),
            CurveDescriptor::Arc {
                modes,
                times,
                points,
                extrapolation,
            } => MotionCurve::Keyed(
                ArcSpline::new(modes, times, points)?
                    .with_extrapolation(*extrapolation)
                    .into(),
            ),
            CurveDescriptor::Natural { points } => MotionCurve::Natural(Spline::new(points)?),
        };
        debug!("built {} curve with {} dims", self.kind(), curve.dims());
        Ok(curve)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclePoint {
    pub position: f64,
    pub period: f64,
}

/// Oscillator schedule plus wave shape (a name from [`WaveShape::NAMES`] or `spline(..)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclesDescriptor {
    pub points: Vec<CyclePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave: Option<String>,
}

impl CyclesDescriptor {
    /// Build and normalize the schedule.
    pub fn build(&self) -> Result<Cycles, CurveError> {
        let wave = match self.wave.as_deref().map(str::trim) {
            None => WaveShape::default(),
            Some(spec) if spec.starts_with("spline") => WaveShape::parse_custom(spec)?,
            Some(name) => WaveShape::from_name(name)?,
        };
        let mut cycles = Cycles::with_wave(wave);
        for p in &self.points {
            cycles.add_point(p.position, p.period);
        }
        cycles.normalize()?;
        Ok(cycles)
    }
}

/// Easing given as a spec string or as structured parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EasingDescriptor {
    Spec(String),
    // More specific shapes first.
    Cubic { x1: f64, y1: f64, x2: f64, y2: f64 },
    Schlick { s: f64, t: f64 },
    Steps { steps: Vec<f64> },
}

impl EasingDescriptor {
    pub fn build(&self) -> Result<Easing, ConfigError> {
        match self {
            EasingDescriptor::Spec(spec) => parse_easing(spec),
            EasingDescriptor::Cubic { x1, y1, x2, y2 } => Ok(Easing::cubic(*x1, *y1, *x2, *y2)),
            EasingDescriptor::Schlick { s, t } => Ok(Easing::schlick(*s, *t)),
            EasingDescriptor::Steps { steps } => {
                let too_few = || ConfigError::TooFewValues {
                    spec: format!("{steps:?}"),
                    required: 2,
                    actual: steps.len(),
                };
                if steps.len() < 2 {
                    return Err(too_few());
                }
                StepCurve::new(steps)
                    .map(Easing::Step)
                    .map_err(|_| too_few())
            }
        }
    }
}

/// Whole motion document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionDescriptor {
    #[serde(default)]
    pub curves: BTreeMap<String, CurveDescriptor>,
    #[serde(default)]
    pub cycles: BTreeMap<String, CyclesDescriptor>,
    #[serde(default)]
    pub easings: BTreeMap<String, EasingDescriptor>,
}

/// Built motion document.
#[derive(Debug, Clone, Default)]
pub struct Motion {
    pub curves: BTreeMap<String, MotionCurve>,
    pub cycles: BTreeMap<String, Cycles>,
    pub easings: BTreeMap<String, Easing>,
    /// Easing entries that fell back to identity, with the reason.
    pub diagnostics: Vec<ConfigError>,
}

impl Motion {
    pub fn from_json(s: &str) -> Result<Self, CurveError> {
        let desc: MotionDescriptor =
            serde_json::from_str(s).map_err(|e| CurveError::Descriptor {
                reason: format!("parse error: {e}"),
            })?;
        Self::build(&desc)
    }

    pub fn build(desc: &MotionDescriptor) -> Result<Self, CurveError> {
        let mut motion = Motion::default();
        for (name, entry) in &desc.curves {
            let curve = entry.build().map_err(|e| CurveError::Descriptor {
                reason: format!("curve '{name}': {e}"),
            })?;
            motion.curves.insert(name.clone(), curve);
        }
        for (name, entry) in &desc.cycles {
            let cycles = entry.build().map_err(|e| CurveError::Descriptor {
                reason: format!("cycles '{name}': {e}"),
            })?;
            motion.cycles.insert(name.clone(), cycles);
        }
        for (name, entry) in &desc.easings {
            let easing = match entry.build() {
                Ok(easing) => easing,
                Err(err) => {
                    warn!("easing '{name}' falls back to identity: {err}");
                    motion.diagnostics.push(err);
                    Easing::Identity
                }
            };
            motion.easings.insert(name.clone(), easing);
        }
        debug!(
            "built motion: {} curves, {} cycles, {} easings ({} diagnostics)",
            motion.curves.len(),
            motion.cycles.len(),
            motion.easings.len(),
            motion.diagnostics.len()
        );
        Ok(motion)
    }
}
