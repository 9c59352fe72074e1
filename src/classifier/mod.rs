//! Score-to-label classification.
//!
//! Among the enabled ranges, the first one in stored order whose closed
//! interval contains the score wins. Disabled ranges are inert: they neither
//! match nor stop a later range from matching. A score no enabled range
//! contains is unresolved, which is a normal outcome reported as the empty
//! label rather than an error.
//!
//! ```rust
//! use riskmap::classifier::classify;
//! use riskmap::range_table::RiskRange;
//!
//! let ranges = vec![
//!     RiskRange::new(1.0, 10.0, "A"),
//!     RiskRange::new(5.0, 15.0, "B"),
//! ];
//! assert_eq!(classify(7.0, &ranges), "A");
//! assert_eq!(classify(12.0, &ranges), "B");
//! assert_eq!(classify(20.0, &ranges), "");
//! ```

pub mod diagnostics;

use crate::range_table::{RangeId, RiskRange};
use serde::Serialize;

pub use diagnostics::{diagnose, TableDiagnostics, TableFinding};

/// Label returned when no enabled range contains the score.
pub const UNRESOLVED: &str = "";

/// The range a score resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution<'a> {
    /// Position of the matching range in the table.
    pub position: usize,
    pub id: RangeId,
    pub label: &'a str,
}

/// Resolve `score` to the first enabled range containing it.
///
/// NaN never matches.
pub fn resolve(score: f64, ranges: &[RiskRange]) -> Option<Resolution<'_>> {
    ranges
        .iter()
        .enumerate()
        .find(|(_, range)| range.matches(score))
        .map(|(position, range)| Resolution {
            position,
            id: range.id(),
            label: range.label.as_str(),
        })
}

/// Label for `score`, or [`UNRESOLVED`] when no enabled range contains it.
pub fn classify(score: f64, ranges: &[RiskRange]) -> &str {
    resolve(score, ranges).map_or(UNRESOLVED, |resolution| resolution.label)
}
