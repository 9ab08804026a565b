//! Analysis settings loaded from YAML.
//!
//! Command-line flags override the file, the file overrides the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calc::DetectionLimits;
use crate::error::{Error, Result};
use crate::gas::Gas;

/// Transformer and laboratory settings shared by every method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Per-gas detection limits in ppm, replacing the laboratory defaults.
    #[serde(default)]
    pub detection_limits: BTreeMap<Gas, f64>,

    /// Main tank oil volume in litres; zero keeps rates per litre.
    #[serde(default)]
    pub oil_volume_litres: f64,

    /// Whether the OLTC shares oil with the main tank.
    #[serde(default)]
    pub has_communicating_oltc: bool,

    /// Transformer age in years, if known.
    #[serde(default)]
    pub transformer_age_years: Option<f64>,
}

fn default_version() -> u32 {
    1
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            detection_limits: BTreeMap::new(),
            oil_volume_litres: 0.0,
            has_communicating_oltc: false,
            transformer_age_years: None,
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Default detection limits with this file's overrides applied.
    #[must_use]
    pub fn detection_limits(&self) -> DetectionLimits {
        DetectionLimits::default().with_overrides(self.detection_limits.iter().map(|(&gas, &ppm)| (gas, ppm)))
    }
}
