//! Easing curves: cubic Bézier, Schlick bias/gain, and level-step splines.
//!
//! Every family is constructible from plain numbers. Spec strings such as
//! `cubic(0.4, 0, 0.2, 1)`, `Schlick(2, 0.5)`, `spline(0, 0.5, 1)` or a preset name
//! are parsed by [`parse_easing`]; [`Easing::parse_or_default`] keeps motion running on
//! a bad string by falling back to the identity easing and reporting the error.

mod cubic;
mod schlick;
mod step;

pub use cubic::CubicEasing;
pub use schlick::Schlick;
pub use step::StepCurve;

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named cubic-Bézier presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingPreset {
    Standard,
    Accelerate,
    Decelerate,
    Linear,
    Anticipate,
    Overshoot,
}

impl EasingPreset {
    pub const ALL: [EasingPreset; 6] = [
        EasingPreset::Standard,
        EasingPreset::Accelerate,
        EasingPreset::Decelerate,
        EasingPreset::Linear,
        EasingPreset::Anticipate,
        EasingPreset::Overshoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EasingPreset::Standard => "standard",
            EasingPreset::Accelerate => "accelerate",
            EasingPreset::Decelerate => "decelerate",
            EasingPreset::Linear => "linear",
            EasingPreset::Anticipate => "anticipate",
            EasingPreset::Overshoot => "overshoot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub const fn curve(self) -> CubicEasing {
        match self {
            EasingPreset::Standard => CubicEasing::new(0.4, 0.0, 0.2, 1.0),
            EasingPreset::Accelerate => CubicEasing::new(0.4, 0.05, 0.8, 0.7),
            EasingPreset::Decelerate => CubicEasing::new(0.0, 0.0, 0.2, 0.95),
            EasingPreset::Linear => CubicEasing::new(1.0, 1.0, 0.0, 0.0),
            EasingPreset::Anticipate => CubicEasing::new(0.36, 0.0, 0.66, -0.56),
            EasingPreset::Overshoot => CubicEasing::new(0.34, 1.56, 0.64, 1.0),
        }
    }
}

/// Any easing curve, dispatched by family.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Easing {
    #[default]
    Identity,
    Cubic(CubicEasing),
    Schlick(Schlick),
    Step(StepCurve),
}

impl Easing {
    /// Preset names accepted by [`parse_easing`].
    pub const NAMED: [&'static str; 6] = [
        "standard",
        "accelerate",
        "decelerate",
        "linear",
        "anticipate",
        "overshoot",
    ];

    pub const fn cubic(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::Cubic(CubicEasing::new(x1, y1, x2, y2))
    }

    pub const fn schlick(s: f64, t: f64) -> Self {
        Easing::Schlick(Schlick::new(s, t))
    }

    pub const fn preset(preset: EasingPreset) -> Self {
        Easing::Cubic(preset.curve())
    }

    /// Parse `spec`, falling back to [`Easing::Identity`] on error.
    ///
    /// The error is logged and returned alongside the fallback so callers can surface it.
    pub fn parse_or_default(spec: &str) -> (Easing, Option<ConfigError>) {
        match parse_easing(spec) {
            Ok(easing) => (easing, None),
            Err(err) => {
                warn!("easing fallback to identity: {err}");
                (Easing::Identity, Some(err))
            }
        }
    }

    #[inline]
    pub fn ease(&self, x: f64) -> f64 {
        match self {
            Easing::Identity => x,
            Easing::Cubic(c) => c.ease(x),
            Easing::Schlick(s) => s.ease(x),
            Easing::Step(s) => s.ease(x),
        }
    }

    #[inline]
    pub fn ease_diff(&self, x: f64) -> f64 {
        match self {
            Easing::Identity => 1.0,
            Easing::Cubic(c) => c.ease_diff(x),
            Easing::Schlick(s) => s.ease_diff(x),
            Easing::Step(s) => s.ease_diff(x),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Identity => f.write_str("identity"),
            Easing::Cubic(c) => write!(f, "{c}"),
            Easing::Schlick(s) => write!(f, "{s}"),
            Easing::Step(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_easing(s)
    }
}

/// Parse an easing spec string.
pub fn parse_easing(spec: &str) -> Result<Easing, ConfigError> {
    let trimmed = spec.trim();
    if trimmed.starts_with("cubic") {
        let args = parse_args(trimmed, "cubic")?;
        let [x1, y1, x2, y2] = fixed_args::<4>(trimmed, "cubic", &args)?;
        return Ok(Easing::cubic(x1, y1, x2, y2));
    }
    if trimmed.starts_with("spline") {
        let values = parse_args(trimmed, "spline")?;
        if values.len() < 2 {
            return Err(ConfigError::TooFewValues {
                spec: spec.to_string(),
                required: 2,
                actual: values.len(),
            });
        }
        let curve = StepCurve::new(&values).map_err(|err| ConfigError::Malformed {
            family: "spline".into(),
            spec: spec.to_string(),
            reason: err.to_string(),
        })?;
        return Ok(Easing::Step(curve));
    }
    if trimmed.starts_with("Schlick") || trimmed.starts_with("schlick") {
        let args = parse_args(trimmed, "Schlick")?;
        let [s, t] = fixed_args::<2>(trimmed, "Schlick", &args)?;
        return Ok(Easing::schlick(s, t));
    }
    if trimmed == "identity" {
        return Ok(Easing::Identity);
    }
    EasingPreset::from_name(trimmed)
        .map(Easing::preset)
        .ok_or_else(|| ConfigError::UnknownEasing {
            spec: spec.to_string(),
            known: Easing::NAMED.join(", "),
        })
}

/// Numbers between the parentheses of `family(a, b, ..)`.
pub(crate) fn parse_args(spec: &str, family: &str) -> Result<Vec<f64>, ConfigError> {
    let malformed = |reason: &str| ConfigError::Malformed {
        family: family.to_string(),
        spec: spec.to_string(),
        reason: reason.to_string(),
    };
    let spec = spec.trim();
    let open = spec.find('(').ok_or_else(|| malformed("missing '('"))?;
    let body = spec[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| malformed("missing closing ')'"))?;
    if body.trim().is_empty() {
        return Err(malformed("no arguments"));
    }
    body.split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(ConfigError::InvalidNumber {
                    token: token.to_string(),
                    spec: spec.to_string(),
                }),
            }
        })
        .collect()
}

fn fixed_args<const N: usize>(
    spec: &str,
    family: &str,
    args: &[f64],
) -> Result<[f64; N], ConfigError> {
    <[f64; N]>::try_from(args).map_err(|_| ConfigError::Malformed {
        family: family.to_string(),
        spec: spec.to_string(),
        reason: format!("expected {N} arguments, got {}", args.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        for name in Easing::NAMED {
            let easing = parse_easing(name).unwrap();
            assert!(matches!(easing, Easing::Cubic(_)), "{name}");
        }
        assert_eq!(
            parse_easing("standard").unwrap(),
            Easing::cubic(0.4, 0.0, 0.2, 1.0)
        );
    }

    #[test]
    fn families_parse_with_whitespace() {
        assert_eq!(
            parse_easing(" cubic( 0.1 , 0.2,0.3, 0.4 ) ").unwrap(),
            Easing::cubic(0.1, 0.2, 0.3, 0.4)
        );
        assert_eq!(
            parse_easing("Schlick(2, 0.5)").unwrap(),
            Easing::schlick(2.0, 0.5)
        );
        assert!(matches!(
            parse_easing("spline(0, 0.5, 1)").unwrap(),
            Easing::Step(_)
        ));
    }

    #[test]
    fn malformed_specs_report_structured_errors() {
        assert!(matches!(
            parse_easing("cubic(0.1, 0.2, 0.3)"),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            parse_easing("cubic(0.1, x, 0.3, 1"),
            Err(ConfigError::Malformed { .. })
        ));
        assert_eq!(
            parse_easing("cubic(0.1, x, 0.3, 1)").unwrap_err(),
            ConfigError::InvalidNumber {
                token: "x".into(),
                spec: "cubic(0.1, x, 0.3, 1)".into()
            }
        );
        assert!(matches!(
            parse_easing("spline(1)"),
            Err(ConfigError::TooFewValues { actual: 1, .. })
        ));
        assert!(matches!(
            parse_easing("wobbly"),
            Err(ConfigError::UnknownEasing { .. })
        ));
    }

    #[test]
    fn fallback_keeps_the_error() {
        let (easing, err) = Easing::parse_or_default("wobbly");
        assert_eq!(easing, Easing::Identity);
        assert!(err.is_some());
        assert_eq!(easing.ease(0.3), 0.3);
        assert_eq!(easing.ease_diff(0.3), 1.0);
    }

    #[test]
    fn display_round_trips_through_the_parser() {
        for spec in ["identity", "cubic(0.4, 0, 0.2, 1)", "Schlick(2, 0.5)", "spline(0, 0.5, 1)"] {
            let easing = parse_easing(spec).unwrap();
            assert_eq!(easing.to_string(), spec);
            assert_eq!(spec.parse::<Easing>().unwrap(), easing);
        }
    }
}
