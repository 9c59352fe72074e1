//! Re-labeling of stored assessment rows after a configuration change.
//!
//! A [`ScoredRow`] caches the label its score resolved to under the
//! configuration that was active when it was last labeled. Relabeling
//! recomputes that cache for every row with a usable score and never touches
//! the score itself, so running it twice with the same configuration changes
//! nothing the second time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::classify;
use crate::config::RiskAssessmentConfig;
use crate::scoring::risk_score;

/// One assessment line item: a score and the label last resolved for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub label: String,

    /// Frequency value the score was computed from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,

    /// Severity value the score was computed from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,
}

impl ScoredRow {
    /// An unlabeled row with a score.
    pub fn new(score: f64) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }

    /// An unlabeled row scored from a frequency/severity pair.
    pub fn from_factors(frequency: i64, severity: i64) -> Self {
        Self {
            score: Some(risk_score(frequency, severity)),
            label: String::new(),
            frequency: Some(frequency),
            severity: Some(severity),
        }
    }

    /// The score if it is present and finite. Zero is a usable score.
    pub fn usable_score(&self) -> Option<f64> {
        self.score.filter(|score| score.is_finite())
    }

    /// Fill a missing score from the row's factors, if both are present.
    ///
    /// Returns whether the score was filled.
    pub fn fill_score_from_factors(&mut self) -> bool {
        match (self.score, self.frequency, self.severity) {
            (None, Some(frequency), Some(severity)) => {
                self.score = Some(risk_score(frequency, severity));
                true
            }
            _ => false,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.label.is_empty()
    }
}

/// Counts from one relabeling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelabelSummary {
    /// Rows looked at.
    pub examined: usize,
    /// Rows with a usable score whose label was recomputed.
    pub relabeled: usize,
    /// Relabeled rows whose label differs from before.
    pub changed: usize,
    /// Rows passed through because they had no usable score.
    pub skipped: usize,
    /// Relabeled rows that no enabled range resolves.
    pub unresolved: usize,
}

/// Relabel a copy of `rows` under `config`.
pub fn relabel(rows: &[ScoredRow], config: &RiskAssessmentConfig) -> Vec<ScoredRow> {
    let mut relabeled = rows.to_vec();
    relabel_in_place(&mut relabeled, config);
    relabeled
}

/// Relabel `rows` under `config` in place and report what changed.
pub fn relabel_in_place(rows: &mut [ScoredRow], config: &RiskAssessmentConfig) -> RelabelSummary {
    let ranges = config.risk_ranges.as_slice();
    let mut summary = RelabelSummary {
        examined: rows.len(),
        ..RelabelSummary::default()
    };

    for row in rows.iter_mut() {
        let Some(score) = row.usable_score() else {
            summary.skipped += 1;
            continue;
        };

        let label = classify(score, ranges);
        summary.relabeled += 1;
        if label.is_empty() {
            summary.unresolved += 1;
        }
        if row.label != label {
            summary.changed += 1;
            row.label = label.to_string();
        }
    }

    debug!(
        examined = summary.examined,
        relabeled = summary.relabeled,
        changed = summary.changed,
        skipped = summary.skipped,
        unresolved = summary.unresolved,
        "Relabeled assessment rows"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_table::{RiskRange, RiskRangeTable};

    fn korean_config() -> RiskAssessmentConfig {
        RiskAssessmentConfig {
            risk_ranges: RiskRangeTable::from_ranges([
                RiskRange::new(1.0, 4.0, "허용 가능"),
                RiskRange::new(5.0, 8.0, "관리 필요"),
                RiskRange::new(9.0, 16.0, "즉시 개선"),
            ]),
            ..RiskAssessmentConfig::default()
        }
    }

    #[test]
    fn relabels_scenario_rows() {
        let rows = vec![ScoredRow::new(12.0), ScoredRow::new(3.0)];

        let relabeled = relabel(&rows, &korean_config());

        assert_eq!(relabeled[0].label, "즉시 개선");
        assert_eq!(relabeled[1].label, "허용 가능");
        assert_eq!(relabeled[0].score, Some(12.0));
    }

    #[test]
    fn rows_without_usable_score_pass_through() {
        let mut rows = vec![
            ScoredRow {
                score: None,
                label: "stale".into(),
                ..ScoredRow::default()
            },
            ScoredRow {
                score: Some(f64::NAN),
                label: "kept".into(),
                ..ScoredRow::default()
            },
        ];

        let summary = relabel_in_place(&mut rows, &korean_config());

        assert_eq!(rows[0].label, "stale");
        assert_eq!(rows[1].label, "kept");
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.relabeled, 0);
    }

    #[test]
    fn zero_is_a_usable_score() {
        let mut rows = vec![ScoredRow {
            score: Some(0.0),
            label: "old".into(),
            ..ScoredRow::default()
        }];

        let summary = relabel_in_place(&mut rows, &korean_config());

        assert_eq!(rows[0].label, "");
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.changed, 1);
    }

    #[test]
    fn removing_a_range_changes_labels_on_next_pass() {
        let mut config = korean_config();
        let mut rows = relabel(&[ScoredRow::new(6.0)], &config);
        assert_eq!(rows[0].label, "관리 필요");

        config.risk_ranges.remove(1).unwrap();
        let summary = relabel_in_place(&mut rows, &config);

        assert_eq!(rows[0].label, "");
        assert_eq!(summary.changed, 1);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let config = korean_config();
        let mut rows = vec![ScoredRow::new(12.0), ScoredRow::new(7.0), ScoredRow::new(20.0)];

        relabel_in_place(&mut rows, &config);
        let second = relabel_in_place(&mut rows, &config);

        assert_eq!(second.changed, 0);
        assert_eq!(second.relabeled, 3);
    }

    #[test]
    fn factors_fill_missing_score() {
        let mut row = ScoredRow {
            frequency: Some(3),
            severity: Some(4),
            ..ScoredRow::default()
        };
        assert!(row.fill_score_from_factors());
        assert_eq!(row.score, Some(12.0));
        assert!(!row.fill_score_from_factors());
        assert_eq!(ScoredRow::from_factors(2, 2).score, Some(4.0));
    }
}
