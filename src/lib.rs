//! Frequency x severity risk classification.
//!
//! A [`RiskAssessmentConfig`] holds two ordinal [`Scale`]s and an ordered
//! [`RiskRangeTable`]. Scores are classified by the first enabled range that
//! contains them, and stored rows are relabeled whenever the active
//! configuration changes through an [`AssessmentSession`].
//!
//! ```rust
//! use riskmap::{relabel, risk_score, RiskAssessmentConfig, ScoredRow};
//!
//! let config = RiskAssessmentConfig::default();
//! let rows = relabel(&[ScoredRow::new(risk_score(3, 4))], &config);
//! assert_eq!(rows[0].label, "Immediate improvement");
//! ```

// Export modules for library usage
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod range_table;
pub mod relabel;
pub mod scale;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use crate::classifier::{
    classify, diagnose, resolve, Resolution, TableDiagnostics, TableFinding, UNRESOLVED,
};
pub use crate::config::{load_config, RiskAssessmentConfig};
pub use crate::errors::{ErrorCode, RiskError};
pub use crate::range_table::{RangeId, RiskRange, RiskRangeTable};
pub use crate::relabel::{relabel, relabel_in_place, RelabelSummary, ScoredRow};
pub use crate::scale::{generate, generate_with_vocabulary, Scale, ScaleKind, ScaleRange};
pub use crate::scoring::{achievable_scores, checked_risk_score, risk_score, ScoreDomain};
pub use crate::session::{ApplyOutcome, AssessmentSession};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
