use serde::{Deserialize, Serialize};

use crate::classifier::{classify, resolve, Resolution};
use crate::errors::RiskError;
use crate::range_table::{RiskRange, RiskRangeTable};
use crate::scale::{Scale, ScaleKind};
use crate::scoring::{checked_risk_score, ScoreDomain};

/// The shared risk assessment configuration: two scales and one range table.
///
/// A value of this type is inert data. Activating it for a set of stored rows
/// goes through [`crate::session::AssessmentSession::apply_config`], which
/// relabels every row before the configuration becomes active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentConfig {
    pub frequency: Scale,
    pub severity: Scale,
    pub risk_ranges: RiskRangeTable,
}

impl Default for RiskAssessmentConfig {
    fn default() -> Self {
        Self {
            frequency: Scale::new(ScaleKind::Frequency, 1, 4),
            severity: Scale::new(ScaleKind::Severity, 1, 4),
            risk_ranges: RiskRangeTable::from_ranges(default_risk_ranges()),
        }
    }
}

/// Ranges covering every score of the default 4 x 4 matrix.
pub fn default_risk_ranges() -> Vec<RiskRange> {
    vec![
        RiskRange::new(1.0, 4.0, "Acceptable"),
        RiskRange::new(5.0, 8.0, "Needs management"),
        RiskRange::new(9.0, 16.0, "Immediate improvement"),
    ]
}

impl RiskAssessmentConfig {
    pub fn new(frequency: Scale, severity: Scale, risk_ranges: RiskRangeTable) -> Self {
        Self {
            frequency,
            severity,
            risk_ranges,
        }
    }

    pub fn scale(&self, kind: ScaleKind) -> &Scale {
        match kind {
            ScaleKind::Frequency => &self.frequency,
            ScaleKind::Severity => &self.severity,
        }
    }

    pub fn scale_mut(&mut self, kind: ScaleKind) -> &mut Scale {
        match kind {
            ScaleKind::Frequency => &mut self.frequency,
            ScaleKind::Severity => &mut self.severity,
        }
    }

    /// Change the bounds of one scale and regenerate its points.
    pub fn set_scale_bounds(&mut self, kind: ScaleKind, min: i64, max: i64) {
        let scale = self.scale_mut(kind);
        scale.min = min;
        scale.max = max;
        scale.regenerate();
    }

    /// Label for `score` under this configuration's range table.
    pub fn classify(&self, score: f64) -> &str {
        classify(score, self.risk_ranges.as_slice())
    }

    pub fn resolve(&self, score: f64) -> Option<Resolution<'_>> {
        resolve(score, self.risk_ranges.as_slice())
    }

    /// Score for a frequency/severity pair, rejecting values off either scale.
    pub fn score(&self, frequency: i64, severity: i64) -> Result<f64, RiskError> {
        checked_risk_score(&self.frequency, &self.severity, frequency, severity)
    }

    pub fn score_domain(&self) -> Option<ScoreDomain> {
        ScoreDomain::of(&self.frequency, &self.severity)
    }
}
