//! Motion Curves Core
//!
//! Numeric engine behind animated transitions: given a progress value it returns the
//! interpolated position, scalar value or velocity of one or more animated quantities.
//!
//! - [`ArcSpline`]: 2-D paths from quarter-ellipse arcs and lines, constant speed per arc.
//! - [`MonoSpline`]: monotone cubic Hermite interpolation in N dimensions.
//! - [`LinearCurve`]: piecewise-linear interpolation with the same query surface.
//! - [`Spline`]: natural cubic spline addressed by normalized arc length.
//! - [`Cycles`]: variable-frequency oscillator with continuous phase.
//! - [`Easing`]: cubic Bézier, Schlick bias/gain and level-step easings.
//!
//! All curves are immutable after construction and evaluate without allocation through
//! the `*_into` / `*_axis` queries. Time-keyed curves extrapolate past their last key
//! along the boundary slope unless built with [`Extrapolation::Clamp`].

pub mod arc;
pub mod curve;
pub mod cycles;
pub mod descriptor;
pub mod easing;
pub mod error;
pub mod linear;
pub mod mono;
pub mod natural;
mod series;
mod wave;

// Re-exports for consumers
pub use arc::{ArcMode, ArcSample, ArcSpline};
pub use curve::{Curve, KeyCurve};
pub use cycles::{Cycles, WaveShape};
pub use descriptor::{
    CurveDescriptor, CyclePoint, CyclesDescriptor, EasingDescriptor, Motion, MotionCurve,
    MotionDescriptor,
};
pub use easing::{parse_easing, CubicEasing, Easing, EasingPreset, Schlick, StepCurve};
pub use error::{ConfigError, CurveError};
pub use linear::{lerp, LinearCurve};
pub use mono::MonoSpline;
pub use natural::{natural_cubic, Cubic, Spline};
pub use series::Extrapolation;
