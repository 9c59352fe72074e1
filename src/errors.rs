//! Error types for riskmap.
//!
//! The classification core (scale generation, classification, relabeling) is
//! total and never fails. Errors only appear at the boundaries: loading and
//! validating configuration, addressing ranges or rows by position, and
//! applying a configuration to a session.
//!
//! # Error Codes
//!
//! Error codes are assigned by category:
//! - E001-E009: I/O and filesystem errors
//! - E020-E029: Configuration errors
//! - E050-E059: Validation errors
//! - E060-E069: Editing errors (positions, scale values, stale versions)
//!
//! # Example
//!
//! ```rust
//! use riskmap::errors::{ErrorCode, RiskError};
//!
//! let err = RiskError::RangeIndex { position: 4, len: 3 };
//! assert_eq!(err.code(), ErrorCode::EDIT_RANGE_INDEX);
//! assert!(err.is_user_fixable());
//! ```

use crate::config::validation::ConfigIssue;
use crate::scale::ScaleKind;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - file not found
    pub const IO_FILE_NOT_FOUND: ErrorCode = ErrorCode("E001");
    /// I/O error - permission denied
    pub const IO_PERMISSION_DENIED: ErrorCode = ErrorCode("E002");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Config error - file could not be parsed
    pub const CONFIG_PARSE: ErrorCode = ErrorCode("E020");
    /// Config error - rows file could not be parsed
    pub const CONFIG_ROWS_PARSE: ErrorCode = ErrorCode("E021");

    /// Validation error - one or more configuration issues
    pub const VALIDATION_CONFIG: ErrorCode = ErrorCode("E050");

    /// Editing error - no risk range at position
    pub const EDIT_RANGE_INDEX: ErrorCode = ErrorCode("E060");
    /// Editing error - no row at position
    pub const EDIT_ROW_INDEX: ErrorCode = ErrorCode("E061");
    /// Editing error - value is not a point on the scale
    pub const EDIT_SCALE_VALUE: ErrorCode = ErrorCode("E062");
    /// Editing error - configuration was saved against a superseded version
    pub const EDIT_STALE_CONFIG: ErrorCode = ErrorCode("E063");
    /// Editing error - the table has no range ids left to hand out
    pub const EDIT_RANGE_IDS_EXHAUSTED: ErrorCode = ErrorCode("E064");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised at the configuration and editing boundaries.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML or does not match the schema.
    #[error("failed to parse configuration{}: {message}", display_path(path))]
    ConfigParse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A rows file is not valid JSON or does not match the row schema.
    #[error("failed to parse rows{}: {message}", display_path(path))]
    RowsParse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The configuration was rejected; every issue found is listed.
    #[error("invalid configuration ({} issue(s)): {}", .0.len(), join_issues(.0))]
    Validation(Vec<ConfigIssue>),

    /// A positional range edit referenced a position past the end of the table.
    #[error("no risk range at position {position} (table has {len})")]
    RangeIndex { position: usize, len: usize },

    /// A positional row edit referenced a position past the end of the rows.
    #[error("no row at position {position} (session has {len})")]
    RowIndex { position: usize, len: usize },

    /// A label edit or factor referenced a value that is not on the scale.
    #[error("{kind} scale has no point with value {value}")]
    ScaleValue { kind: ScaleKind, value: i64 },

    /// A configuration save was based on a version that is no longer active.
    #[error("configuration version {expected} is stale (active version is {actual})")]
    StaleConfig { expected: u64, actual: u64 },

    /// Every range id up to the largest one in use has been handed out.
    #[error("risk range table has no ids left after {last}")]
    RangeIdsExhausted { last: u32 },
}

impl RiskError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IO_FILE_NOT_FOUND,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IO_PERMISSION_DENIED,
                _ => ErrorCode::IO_GENERIC,
            },
            Self::ConfigParse { .. } => ErrorCode::CONFIG_PARSE,
            Self::RowsParse { .. } => ErrorCode::CONFIG_ROWS_PARSE,
            Self::Validation(_) => ErrorCode::VALIDATION_CONFIG,
            Self::RangeIndex { .. } => ErrorCode::EDIT_RANGE_INDEX,
            Self::RowIndex { .. } => ErrorCode::EDIT_ROW_INDEX,
            Self::ScaleValue { .. } => ErrorCode::EDIT_SCALE_VALUE,
            Self::StaleConfig { .. } => ErrorCode::EDIT_STALE_CONFIG,
            Self::RangeIdsExhausted { .. } => ErrorCode::EDIT_RANGE_IDS_EXHAUSTED,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::ConfigParse { .. } | Self::RowsParse { .. } => "Config",
            Self::Validation(_) => "Validation",
            Self::RangeIndex { .. }
            | Self::RowIndex { .. }
            | Self::ScaleValue { .. }
            | Self::StaleConfig { .. }
            | Self::RangeIdsExhausted { .. } => "Editing",
        }
    }

    /// Whether the person editing the configuration can resolve this error
    /// by changing their input.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            // A stale save needs a reload, not an input change.
            Self::StaleConfig { .. } | Self::RangeIdsExhausted { .. } => false,
            _ => true,
        }
    }

    /// Issues carried by a validation error, empty for every other variant.
    #[must_use]
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
