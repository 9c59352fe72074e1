//! Composite risk score computation.
//!
//! Every place that turns a frequency and a severity into a number for the
//! classifier goes through [`risk_score`], so the classifier's input is
//! produced the same way everywhere.

use crate::errors::RiskError;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Risk score for one frequency/severity pair: `frequency x severity`.
///
/// Computed in floating point so extreme scale values cannot overflow.
///
/// ```rust
/// use riskmap::scoring::risk_score;
///
/// assert_eq!(risk_score(3, 4), 12.0);
/// ```
pub fn risk_score(frequency: i64, severity: i64) -> f64 {
    frequency as f64 * severity as f64
}

/// [`risk_score`] that first checks both factors are points on their scales.
pub fn checked_risk_score(
    frequency_scale: &Scale,
    severity_scale: &Scale,
    frequency: i64,
    severity: i64,
) -> Result<f64, RiskError> {
    for (scale, value) in [(frequency_scale, frequency), (severity_scale, severity)] {
        if !scale.contains(value) {
            return Err(RiskError::ScaleValue {
                kind: scale.kind,
                value,
            });
        }
    }
    Ok(risk_score(frequency, severity))
}

/// Inclusive bounds of every score the two scales can produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDomain {
    pub min: f64,
    pub max: f64,
}

impl ScoreDomain {
    /// Domain spanned by the corner products of two scales, `None` if either is empty.
    pub fn of(frequency: &Scale, severity: &Scale) -> Option<Self> {
        if frequency.min > frequency.max || severity.min > severity.max {
            return None;
        }
        let corners = [
            risk_score(frequency.min, severity.min),
            risk_score(frequency.min, severity.max),
            risk_score(frequency.max, severity.min),
            risk_score(frequency.max, severity.max),
        ];
        let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Every distinct score reachable from a point on each scale, ascending.
pub fn achievable_scores(frequency: &Scale, severity: &Scale) -> Vec<f64> {
    let products: BTreeSet<i128> = frequency
        .values()
        .flat_map(|f| severity.values().map(move |s| i128::from(f) * i128::from(s)))
        .collect();
    products.into_iter().map(|p| p as f64).collect()
}
