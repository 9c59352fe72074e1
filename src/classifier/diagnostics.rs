//! Editor-facing analysis of a range table.
//!
//! Overlaps and gaps are legal, so nothing here is an error. The findings
//! point the person editing the table at ranges that behave differently
//! from how the table reads top to bottom.

use super::resolve;
use crate::config::RiskAssessmentConfig;
use crate::range_table::{RangeId, RiskRange};
use crate::scoring::{achievable_scores, ScoreDomain};
use serde::Serialize;

/// One observation about a range table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableFinding {
    /// An enabled range whose bounds are reversed or not numbers.
    EmptyRange { position: usize, id: RangeId },
    /// An enabled range with a blank label; its matches look unresolved.
    BlankLabel { position: usize, id: RangeId },
    /// Two enabled ranges share `[low, high]`; the earlier one wins there.
    Overlap {
        first: usize,
        second: usize,
        low: f64,
        high: f64,
    },
    /// Earlier enabled ranges cover this range completely, so it never wins.
    Shadowed { position: usize, id: RangeId },
    /// An enabled range lying entirely outside the scores the scales can produce.
    OutsideDomain { position: usize, id: RangeId },
    /// Scores the scales can produce that no enabled range resolves.
    Uncovered { scores: Vec<f64> },
}

impl TableFinding {
    pub fn message(&self) -> String {
        match self {
            Self::EmptyRange { position, .. } => {
                format!("range {} has reversed or invalid bounds and never matches", position + 1)
            }
            Self::BlankLabel { position, .. } => {
                format!("range {} is enabled but has no label", position + 1)
            }
            Self::Overlap {
                first,
                second,
                low,
                high,
            } => format!(
                "ranges {} and {} overlap on [{}, {}]; range {} wins there",
                first + 1,
                second + 1,
                low,
                high,
                first + 1
            ),
            Self::Shadowed { position, .. } => format!(
                "range {} is fully covered by earlier ranges and never wins",
                position + 1
            ),
            Self::OutsideDomain { position, .. } => format!(
                "range {} lies outside every score the scales can produce",
                position + 1
            ),
            Self::Uncovered { scores } => format!(
                "scores without a category: {}",
                scores
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl std::fmt::Display for TableFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// All findings for one configuration, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableDiagnostics {
    pub findings: Vec<TableFinding>,
}

impl TableDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Scores reported as uncovered, empty if every achievable score resolves.
    pub fn uncovered_scores(&self) -> &[f64] {
        self.findings
            .iter()
            .find_map(|f| match f {
                TableFinding::Uncovered { scores } => Some(scores.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

/// Analyze the range table of `config` against the scores its scales produce.
pub fn diagnose(config: &RiskAssessmentConfig) -> TableDiagnostics {
    let ranges = config.risk_ranges.as_slice();
    let domain = ScoreDomain::of(&config.frequency, &config.severity);
    let mut findings = Vec::new();

    for (position, range) in ranges.iter().enumerate() {
        if !range.enabled {
            continue;
        }
        let id = range.id();
        if range.is_empty() {
            findings.push(TableFinding::EmptyRange { position, id });
            continue;
        }
        if range.label.trim().is_empty() {
            findings.push(TableFinding::BlankLabel { position, id });
        }
        findings.extend(overlaps_with_earlier(ranges, position));
        if is_shadowed(ranges, position) {
            findings.push(TableFinding::Shadowed { position, id });
        }
        if let Some(domain) = domain {
            if range.max < domain.min || range.min > domain.max {
                findings.push(TableFinding::OutsideDomain { position, id });
            }
        }
    }

    let uncovered: Vec<f64> = achievable_scores(&config.frequency, &config.severity)
        .into_iter()
        .filter(|score| resolve(*score, ranges).is_none())
        .collect();
    if !uncovered.is_empty() {
        findings.push(TableFinding::Uncovered { scores: uncovered });
    }

    TableDiagnostics { findings }
}

fn live(range: &RiskRange) -> bool {
    range.enabled && !range.is_empty()
}

fn overlaps_with_earlier(ranges: &[RiskRange], position: usize) -> Vec<TableFinding> {
    let current = &ranges[position];
    ranges[..position]
        .iter()
        .enumerate()
        .filter(|(_, earlier)| live(earlier))
        .filter_map(|(first, earlier)| {
            let low = earlier.min.max(current.min);
            let high = earlier.max.min(current.max);
            (low <= high).then_some(TableFinding::Overlap {
                first,
                second: position,
                low,
                high,
            })
        })
        .collect()
}

fn is_shadowed(ranges: &[RiskRange], position: usize) -> bool {
    let current = &ranges[position];
    let mut earlier: Vec<(f64, f64)> = ranges[..position]
        .iter()
        .filter(|r| live(r))
        .map(|r| (r.min, r.max))
        .collect();
    earlier.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Closed intervals that touch merge into one covered span.
    let mut merged: Vec<(f64, f64)> = Vec::new();
    for (min, max) in earlier {
        match merged.last_mut() {
            Some(last) if min <= last.1 => last.1 = last.1.max(max),
            _ => merged.push((min, max)),
        }
    }

    merged
        .iter()
        .any(|(min, max)| *min <= current.min && current.max <= *max)
}
