//! On-disk TOML representation of a [`RiskAssessmentConfig`].
//!
//! The file stores scale bounds, optional vocabularies, and only those point
//! labels that differ from the vocabulary default. Points are regenerated
//! from the bounds on load, so a file never needs to list every value.
//!
//! ```toml
//! [frequency]
//! min = 1
//! max = 4
//!
//! [[frequency.points]]
//! value = 2
//! label = "Monthly"
//!
//! [severity]
//! min = 1
//! max = 4
//!
//! [[risk_ranges]]
//! min = 1
//! max = 4
//! label = "Acceptable"
//! ```

use serde::{Deserialize, Serialize};

use super::RiskAssessmentConfig;
use crate::errors::RiskError;
use crate::range_table::RiskRange;
use crate::scale::{generate, Scale, ScaleKind, ScaleRange};

/// Root of the TOML configuration file. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<ScaleSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ScaleSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_ranges: Option<Vec<RangeEntry>>,
}

/// One scale as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleSection {
    #[serde(default = "default_scale_min")]
    pub min: i64,

    #[serde(default = "default_scale_max")]
    pub max: i64,

    /// Default labels by tier; the built-in vocabulary when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vec<String>>,

    /// Custom labels for individual values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<ScaleRange>,
}

impl Default for ScaleSection {
    fn default() -> Self {
        Self {
            min: default_scale_min(),
            max: default_scale_max(),
            vocabulary: None,
            points: Vec::new(),
        }
    }
}

fn default_scale_min() -> i64 {
    1
}

fn default_scale_max() -> i64 {
    4
}

/// One risk range as written in the file. Ids are not persisted; table
/// order is the identity on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeEntry {
    pub min: f64,
    pub max: f64,

    #[serde(default)]
    pub label: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl From<RangeEntry> for RiskRange {
    fn from(entry: RangeEntry) -> Self {
        let range = RiskRange::new(entry.min, entry.max, entry.label);
        if entry.enabled {
            range
        } else {
            range.disabled()
        }
    }
}

impl From<&RiskRange> for RangeEntry {
    fn from(range: &RiskRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
            label: range.label.clone(),
            enabled: range.enabled,
        }
    }
}

impl ScaleSection {
    /// Build the live scale, regenerating points from the bounds.
    pub fn to_scale(&self, kind: ScaleKind) -> Scale {
        let vocabulary = self.vocabulary.clone().unwrap_or_else(|| {
            kind.default_vocabulary()
                .iter()
                .map(|label| label.to_string())
                .collect()
        });
        generate(&Scale {
            kind,
            min: self.min,
            max: self.max,
            vocabulary,
            points: self.points.clone(),
        })
    }

    /// Describe a live scale, keeping only labels that differ from the default.
    pub fn from_scale(scale: &Scale) -> Self {
        let default_vocabulary: Vec<String> = scale
            .kind
            .default_vocabulary()
            .iter()
            .map(|label| label.to_string())
            .collect();
        let points = scale
            .points
            .iter()
            .enumerate()
            .filter(|(position, point)| point.label != scale.default_label(*position))
            .map(|(_, point)| point.clone())
            .collect();

        Self {
            min: scale.min,
            max: scale.max,
            vocabulary: (scale.vocabulary != default_vocabulary).then(|| scale.vocabulary.clone()),
            points,
        }
    }
}

impl ConfigFile {
    /// Parse TOML text without validating it.
    pub fn from_toml_str(contents: &str) -> Result<Self, RiskError> {
        toml::from_str(contents).map_err(|e| RiskError::ConfigParse {
            path: None,
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String, RiskError> {
        toml::to_string_pretty(self).map_err(|e| RiskError::ConfigParse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Convert into a live configuration, filling absent sections with defaults.
    pub fn into_config(self) -> RiskAssessmentConfig {
        let defaults = RiskAssessmentConfig::default();
        let frequency = self
            .frequency
            .map(|s| s.to_scale(ScaleKind::Frequency))
            .unwrap_or(defaults.frequency);
        let severity = self
            .severity
            .map(|s| s.to_scale(ScaleKind::Severity))
            .unwrap_or(defaults.severity);
        let risk_ranges = self
            .risk_ranges
            .map(|entries| entries.into_iter().map(RiskRange::from).collect())
            .unwrap_or(defaults.risk_ranges);

        RiskAssessmentConfig::new(frequency, severity, risk_ranges)
    }

    pub fn from_config(config: &RiskAssessmentConfig) -> Self {
        Self {
            frequency: Some(ScaleSection::from_scale(&config.frequency)),
            severity: Some(ScaleSection::from_scale(&config.severity)),
            risk_ranges: Some(config.risk_ranges.iter().map(RangeEntry::from).collect()),
        }
    }
}

impl From<&RiskAssessmentConfig> for ConfigFile {
    fn from(config: &RiskAssessmentConfig) -> Self {
        Self::from_config(config)
    }
}
