//! Assessment session: the single owner of the active configuration.
//!
//! The session holds one versioned [`RiskAssessmentConfig`] and the rows
//! labeled under it. A configuration only becomes active through
//! [`AssessmentSession::apply_config`], which validates it, relabels a copy
//! of every row, and then swaps both in together. A rejected configuration
//! leaves the session exactly as it was.
//!
//! Editors work on a [`draft`](AssessmentSession::draft) and save it back
//! with [`apply_config_if`](AssessmentSession::apply_config_if), passing the
//! version they started from. A save based on an older version is rejected
//! with [`RiskError::StaleConfig`].

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{validate_config_result, RiskAssessmentConfig};
use crate::errors::RiskError;
use crate::relabel::{relabel_in_place, RelabelSummary, ScoredRow};

/// Result of activating a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// Version of the configuration now active.
    pub version: u64,
    pub summary: RelabelSummary,
}

#[derive(Debug, Clone)]
pub struct AssessmentSession {
    config: RiskAssessmentConfig,
    version: u64,
    rows: Vec<ScoredRow>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self {
            config: RiskAssessmentConfig::default(),
            version: 1,
            rows: Vec::new(),
        }
    }
}

impl AssessmentSession {
    /// Start a session with no rows under a validated configuration.
    pub fn new(config: RiskAssessmentConfig) -> Result<Self, RiskError> {
        Self::with_rows(config, Vec::new())
    }

    /// Start a session, labeling `rows` under `config`.
    ///
    /// Rows that carry factors but no score are scored first.
    pub fn with_rows(
        config: RiskAssessmentConfig,
        mut rows: Vec<ScoredRow>,
    ) -> Result<Self, RiskError> {
        validate_config_result(&config)?;
        for row in rows.iter_mut() {
            row.fill_score_from_factors();
        }
        relabel_in_place(&mut rows, &config);
        Ok(Self {
            config,
            version: 1,
            rows,
        })
    }

    pub fn config(&self) -> &RiskAssessmentConfig {
        &self.config
    }

    /// Version of the active configuration. Starts at 1 and increases by one
    /// on every successful apply.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rows(&self) -> &[ScoredRow] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&ScoredRow> {
        self.rows.get(position)
    }

    /// An editable copy of the active configuration and the version it
    /// was taken from.
    pub fn draft(&self) -> (RiskAssessmentConfig, u64) {
        (self.config.clone(), self.version)
    }

    /// Validate, relabel, then activate `config`.
    pub fn apply_config(
        &mut self,
        config: RiskAssessmentConfig,
    ) -> Result<ApplyOutcome, RiskError> {
        if let Err(e) = validate_config_result(&config) {
            warn!(version = self.version, error = %e, "Rejected configuration");
            return Err(e);
        }

        let mut rows = self.rows.clone();
        let summary = relabel_in_place(&mut rows, &config);

        self.config = config;
        self.rows = rows;
        self.version += 1;

        info!(
            version = self.version,
            ranges = self.config.risk_ranges.len(),
            changed = summary.changed,
            unresolved = summary.unresolved,
            "Activated risk configuration"
        );

        Ok(ApplyOutcome {
            version: self.version,
            summary,
        })
    }

    /// Apply `config` only if the active version is still `expected_version`.
    pub fn apply_config_if(
        &mut self,
        expected_version: u64,
        config: RiskAssessmentConfig,
    ) -> Result<ApplyOutcome, RiskError> {
        if expected_version != self.version {
            warn!(
                expected = expected_version,
                actual = self.version,
                "Rejected stale configuration save"
            );
            return Err(RiskError::StaleConfig {
                expected: expected_version,
                actual: self.version,
            });
        }
        self.apply_config(config)
    }

    /// Append a row, labeling it under the active configuration.
    pub fn push_row(&mut self, mut row: ScoredRow) -> usize {
        row.fill_score_from_factors();
        label_row(&mut row, &self.config);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Replace a row's score and relabel it. Factors no longer describe the
    /// score, so they are cleared. A missing or non-finite score clears the
    /// label as well.
    pub fn set_row_score(&mut self, position: usize, score: Option<f64>) -> Result<(), RiskError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(position)
            .ok_or(RiskError::RowIndex { position, len })?;
        row.score = score;
        row.frequency = None;
        row.severity = None;
        if row.usable_score().is_some() {
            label_row(row, &self.config);
        } else {
            row.label.clear();
        }
        Ok(())
    }

    /// Rescore a row from scale values checked against the active scales.
    pub fn set_row_factors(
        &mut self,
        position: usize,
        frequency: i64,
        severity: i64,
    ) -> Result<f64, RiskError> {
        let len = self.rows.len();
        if position >= len {
            return Err(RiskError::RowIndex { position, len });
        }
        let score = self.config.score(frequency, severity)?;
        let row = &mut self.rows[position];
        row.score = Some(score);
        row.frequency = Some(frequency);
        row.severity = Some(severity);
        label_row(row, &self.config);
        Ok(score)
    }

    pub fn remove_row(&mut self, position: usize) -> Result<ScoredRow, RiskError> {
        let len = self.rows.len();
        if position >= len {
            return Err(RiskError::RowIndex { position, len });
        }
        Ok(self.rows.remove(position))
    }

    pub fn into_parts(self) -> (RiskAssessmentConfig, Vec<ScoredRow>) {
        (self.config, self.rows)
    }
}

fn label_row(row: &mut ScoredRow, config: &RiskAssessmentConfig) {
    relabel_in_place(std::slice::from_mut(row), config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_table::{RiskRange, RiskRangeTable};
    use crate::scale::ScaleKind;

    fn scenario_session() -> AssessmentSession {
        AssessmentSession::with_rows(
            RiskAssessmentConfig::default(),
            vec![ScoredRow::new(12.0), ScoredRow::new(3.0)],
        )
        .unwrap()
    }

    #[test]
    fn rows_are_labeled_on_creation() {
        let session = scenario_session();
        assert_eq!(session.rows()[0].label, "Immediate improvement");
        assert_eq!(session.rows()[1].label, "Acceptable");
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn apply_relabels_before_activation() {
        let mut session = scenario_session();
        let (mut draft, _) = session.draft();
        draft.risk_ranges = RiskRangeTable::from_ranges([
            RiskRange::new(1.0, 4.0, "허용 가능"),
            RiskRange::new(5.0, 8.0, "관리 필요"),
            RiskRange::new(9.0, 16.0, "즉시 개선"),
        ]);

        let outcome = session.apply_config(draft).unwrap();

        assert_eq!(outcome.version, 2);
        assert_eq!(outcome.summary.changed, 2);
        assert_eq!(session.rows()[0].label, "즉시 개선");
        assert_eq!(session.rows()[1].label, "허용 가능");
    }

    #[test]
    fn invalid_config_leaves_session_untouched() {
        let mut session = scenario_session();
        let before_rows = session.rows().to_vec();
        let (mut draft, _) = session.draft();
        draft.risk_ranges.set_min(0, 99.0).unwrap();
        draft.risk_ranges.set_label(1, "changed").unwrap();

        let err = session.apply_config(draft).unwrap_err();

        assert!(matches!(err, RiskError::Validation(_)));
        assert_eq!(session.version(), 1);
        assert_eq!(session.rows(), before_rows.as_slice());
        assert_eq!(session.config(), &RiskAssessmentConfig::default());
    }

    #[test]
    fn stale_save_is_rejected() {
        let mut session = scenario_session();
        let (first, first_version) = session.draft();
        let (second, second_version) = session.draft();

        session.apply_config_if(first_version, first).unwrap();
        let err = session.apply_config_if(second_version, second).unwrap_err();

        assert!(matches!(
            err,
            RiskError::StaleConfig {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn pushed_rows_are_scored_and_labeled() {
        let mut session = AssessmentSession::default();
        let position = session.push_row(ScoredRow {
            frequency: Some(2),
            severity: Some(3),
            ..ScoredRow::default()
        });

        let row = session.row(position).unwrap();
        assert_eq!(row.score, Some(6.0));
        assert_eq!(row.label, "Needs management");
    }

    #[test]
    fn row_edits_check_positions_and_scales() {
        let mut session = scenario_session();

        assert!(matches!(
            session.set_row_score(5, Some(1.0)),
            Err(RiskError::RowIndex { position: 5, len: 2 })
        ));
        assert!(matches!(
            session.set_row_factors(0, 9, 1),
            Err(RiskError::ScaleValue {
                kind: ScaleKind::Frequency,
                value: 9
            })
        ));

        assert_eq!(session.set_row_factors(1, 4, 4).unwrap(), 16.0);
        assert_eq!(session.rows()[1].label, "Immediate improvement");

        session.set_row_score(1, Some(6.0)).unwrap();
        assert_eq!(session.rows()[1].label, "Needs management");
        assert_eq!(session.rows()[1].frequency, None);

        let removed = session.remove_row(0).unwrap();
        assert_eq!(removed.score, Some(12.0));
        assert_eq!(session.rows().len(), 1);
    }

    #[test]
    fn clearing_a_score_clears_its_label() {
        let mut session = scenario_session();

        session.set_row_score(0, None).unwrap();
        session.set_row_score(1, Some(f64::NAN)).unwrap();

        assert_eq!(session.rows()[0].score, None);
        assert!(session.rows()[0].is_unresolved());
        assert!(session.rows()[1].is_unresolved());
    }
}
