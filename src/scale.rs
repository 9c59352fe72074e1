//! Ordinal scales for frequency and severity.
//!
//! A [`Scale`] covers every integer in `[min, max]` with one labeled
//! [`ScaleRange`] point. Points are never deleted one at a time; when the
//! bounds change the whole point set is regenerated with [`generate`], which
//! keeps any label the user already wrote for a surviving value.
//!
//! # Examples
//!
//! ```rust
//! use riskmap::scale::{generate, Scale, ScaleKind};
//!
//! let mut scale = Scale::new(ScaleKind::Frequency, 1, 4);
//! scale.set_label(2, "Custom").unwrap();
//!
//! scale.max = 5;
//! let widened = generate(&scale);
//! assert_eq!(widened.len(), 5);
//! assert_eq!(widened.label_for(2), Some("Custom"));
//! assert_eq!(widened.label_for(5), Some("Very frequently"));
//! ```

use crate::errors::RiskError;
use serde::{Deserialize, Serialize};

/// Default frequency labels, one per tier.
pub const FREQUENCY_VOCABULARY: [&str; 4] = [
    "Almost never",
    "Occasionally",
    "Frequently",
    "Very frequently",
];

/// Default severity labels, one per tier.
pub const SEVERITY_VOCABULARY: [&str; 4] = ["Negligible", "Minor", "Serious", "Critical"];

/// Which axis of the risk matrix a scale describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Frequency,
    Severity,
}

impl ScaleKind {
    /// Built-in vocabulary used for points without a custom label.
    pub fn default_vocabulary(&self) -> &'static [&'static str] {
        match self {
            ScaleKind::Frequency => &FREQUENCY_VOCABULARY,
            ScaleKind::Severity => &SEVERITY_VOCABULARY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleKind::Frequency => "frequency",
            ScaleKind::Severity => "severity",
        }
    }
}

impl std::fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labeled point on an ordinal scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub value: i64,
    pub label: String,
}

impl ScaleRange {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// An ordinal scale with labeled integer points.
///
/// `min <= max` is the caller's responsibility. A reversed scale generates no
/// points; configuration validation reports it before a scale goes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub kind: ScaleKind,
    pub min: i64,
    pub max: i64,
    /// Default labels by tier. Positions past the last tier reuse its label.
    pub vocabulary: Vec<String>,
    pub points: Vec<ScaleRange>,
}

impl Scale {
    /// Create a scale over `[min, max]` labeled with the kind's default vocabulary.
    pub fn new(kind: ScaleKind, min: i64, max: i64) -> Self {
        let vocabulary = kind
            .default_vocabulary()
            .iter()
            .map(|label| label.to_string())
            .collect();
        Self::with_vocabulary(kind, min, max, vocabulary)
    }

    /// Create a scale over `[min, max]` labeled with a custom vocabulary.
    pub fn with_vocabulary(kind: ScaleKind, min: i64, max: i64, vocabulary: Vec<String>) -> Self {
        let scale = Self {
            kind,
            min,
            max,
            vocabulary,
            points: Vec::new(),
        };
        generate(&scale)
    }

    /// Regenerate points after `min`/`max` were edited, keeping custom labels.
    pub fn regenerate(&mut self) {
        self.points = generate_points(self.min, self.max, &self.points, &self.vocabulary);
    }

    /// Number of integer values in `[min, max]`, zero when reversed.
    pub fn span(&self) -> u64 {
        span(self.min, self.max)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.points.iter().any(|p| p.value == value)
    }

    pub fn label_for(&self, value: i64) -> Option<&str> {
        self.points
            .iter()
            .find(|p| p.value == value)
            .map(|p| p.label.as_str())
    }

    /// Point values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Replace the label of an existing point.
    pub fn set_label(&mut self, value: i64, label: impl Into<String>) -> Result<(), RiskError> {
        let kind = self.kind;
        let point = self
            .points
            .iter_mut()
            .find(|p| p.value == value)
            .ok_or(RiskError::ScaleValue { kind, value })?;
        point.label = label.into();
        Ok(())
    }

    /// Default label for the point at `position` (0-based) under this scale's vocabulary.
    pub fn default_label(&self, position: usize) -> &str {
        tier_label(&self.vocabulary, position)
    }
}

/// Number of integer values in `[min, max]`, zero when reversed.
/// Saturates at `u64::MAX` for the full `i64` range.
pub fn span(min: i64, max: i64) -> u64 {
    if min > max {
        0
    } else {
        max.abs_diff(min).saturating_add(1)
    }
}

/// Produce a scale with exactly one point per integer in `[scale.min, scale.max]`.
///
/// Existing points keep their label; new values get the vocabulary label for
/// their position. Never fails: reversed bounds yield an empty point set.
pub fn generate(scale: &Scale) -> Scale {
    Scale {
        kind: scale.kind,
        min: scale.min,
        max: scale.max,
        vocabulary: scale.vocabulary.clone(),
        points: generate_points(scale.min, scale.max, &scale.points, &scale.vocabulary),
    }
}

/// [`generate`] with an explicit vocabulary in place of the scale's own.
pub fn generate_with_vocabulary<S: AsRef<str>>(scale: &Scale, vocabulary: &[S]) -> Scale {
    let vocabulary: Vec<String> = vocabulary.iter().map(|s| s.as_ref().to_string()).collect();
    Scale {
        kind: scale.kind,
        min: scale.min,
        max: scale.max,
        points: generate_points(scale.min, scale.max, &scale.points, &vocabulary),
        vocabulary,
    }
}

fn generate_points(
    min: i64,
    max: i64,
    previous: &[ScaleRange],
    vocabulary: &[String],
) -> Vec<ScaleRange> {
    if min > max {
        return Vec::new();
    }

    (min..=max)
        .enumerate()
        .map(|(position, value)| {
            let label = previous
                .iter()
                .find(|p| p.value == value)
                .map(|p| p.label.clone())
                .unwrap_or_else(|| tier_label(vocabulary, position).to_string());
            ScaleRange { value, label }
        })
        .collect()
}

fn tier_label(vocabulary: &[String], position: usize) -> &str {
    match vocabulary.len() {
        0 => "",
        len => vocabulary[position.min(len - 1)].as_str(),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generation_covers_every_value_once(min in -50i64..50, width in 0i64..40) {
            let max = min + width;
            let scale = Scale::new(ScaleKind::Frequency, min, max);
            let values: Vec<i64> = scale.values().collect();
            let expected: Vec<i64> = (min..=max).collect();
            prop_assert_eq!(values, expected);
            prop_assert_eq!(scale.span(), (width + 1) as u64);
        }

        #[test]
        fn regeneration_is_idempotent(min in -20i64..20, width in 0i64..20, custom in 0i64..20) {
            let mut scale = Scale::new(ScaleKind::Severity, min, min + width);
            let _ = scale.set_label(min + custom, "edited");
            let once = generate(&scale);
            let twice = generate(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
