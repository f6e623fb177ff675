use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    curves: HashMap<String, String>,
    motions: HashMap<String, MotionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MotionEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        diagnostics: usize,
    },
}

impl MotionEntry {
    fn as_path(&self) -> &str {
        match self {
            MotionEntry::Path(path) => path,
            MotionEntry::Detailed { path, .. } => path,
        }
    }

    fn diagnostics(&self) -> usize {
        match self {
            MotionEntry::Path(_) => 0,
            MotionEntry::Detailed { diagnostics, .. } => *diagnostics,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Single-curve fixtures: a curve descriptor plus expected samples.
pub mod curves {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.curves.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        Ok(resolve_path(rel))
    }
}

/// Whole motion documents.
pub mod motions {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.motions.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.motions, "motion", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.motions, "motion", name)?;
        super::load_json(entry.as_path())
    }

    /// Number of easing fallbacks the document is expected to report.
    pub fn expected_diagnostics(name: &str) -> Result<usize> {
        let entry = lookup(&MANIFEST.motions, "motion", name)?;
        Ok(entry.diagnostics())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.motions, "motion", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
