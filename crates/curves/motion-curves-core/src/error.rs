//! Error types for curve construction and easing configuration

use serde::{Deserialize, Serialize};

/// Errors raised while parsing easing spec strings such as `cubic(0.4, 0, 0.2, 1)`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    /// Neither a known family prefix nor a preset name
    #[error("Unknown easing '{spec}', expected cubic(x1,y1,x2,y2), Schlick(s,t), spline(v0,..) or one of [{known}]")]
    UnknownEasing { spec: String, known: String },

    /// Known family but the argument list could not be read
    #[error("Malformed {family} easing '{spec}': {reason}")]
    Malformed {
        family: String,
        spec: String,
        reason: String,
    },

    /// An argument was not a finite number
    #[error("Invalid number '{token}' in easing '{spec}'")]
    InvalidNumber { token: String, spec: String },

    /// Step/wave curves need at least two levels
    #[error("Easing '{spec}' needs at least {required} values, got {actual}")]
    TooFewValues {
        spec: String,
        required: usize,
        actual: usize,
    },

    /// Oscillator wave name not recognized
    #[error("Unknown wave shape '{name}', expected one of [{known}] or spline(v0,..)")]
    UnknownWave { name: String, known: String },
}

/// Errors raised by curve constructors when the caller contract is violated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CurveError {
    #[error("Curve needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("Length mismatch: {times} time points but {points} waypoints")]
    LengthMismatch { times: usize, points: usize },

    #[error("Time points must be strictly increasing: t[{index}] = {value} follows {previous}")]
    NonIncreasingTime {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("Waypoint {index} has {actual} components, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Axis {axis} out of range for a {dims}-dimensional curve")]
    AxisOutOfRange { axis: usize, dims: usize },

    #[error("Arc spline needs one mode per segment: expected {expected}, got {actual}")]
    ModeCountMismatch { expected: usize, actual: usize },

    #[error("Degenerate cycle schedule: {reason}")]
    DegenerateSchedule { reason: String },

    #[error("Descriptor error: {reason}")]
    Descriptor { reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CurveError {
    /// True when the error came from an easing spec rather than curve geometry.
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Short category name for log lines.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TooFewPoints { .. }
            | Self::LengthMismatch { .. }
            | Self::NonIncreasingTime { .. }
            | Self::DimensionMismatch { .. }
            | Self::ModeCountMismatch { .. } => "domain",
            Self::AxisOutOfRange { .. } => "query",
            Self::DegenerateSchedule { .. } => "schedule",
            Self::Descriptor { .. } => "descriptor",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_and_categorize() {
        let err: CurveError = ConfigError::UnknownEasing {
            spec: "wobble".into(),
            known: "standard".into(),
        }
        .into();
        assert!(err.is_config());
        assert_eq!(err.category(), "config");
        assert!(err.to_string().contains("wobble"));
    }

    #[test]
    fn domain_errors_describe_the_offending_point() {
        let err = CurveError::NonIncreasingTime {
            index: 2,
            previous: 1.0,
            value: 0.5,
        };
        assert_eq!(err.category(), "domain");
        assert_eq!(
            err.to_string(),
            "Time points must be strictly increasing: t[2] = 0.5 follows 1"
        );
    }
}
