//! Validation with error accumulation for risk configuration.
//!
//! Every check runs and every issue is reported, so the person editing the
//! configuration sees all problems from a single save attempt. Issues carry a
//! dotted field path such as `risk_ranges[2].min`.
//!
//! Validation belongs to the editing boundary. The classification core stays
//! total over anything these checks reject: a reversed scale generates no
//! points and a reversed range never matches.
//!
//! # Example
//!
//! ```rust
//! use riskmap::config::{validate_config, RiskAssessmentConfig};
//!
//! let config = RiskAssessmentConfig::default();
//! assert!(validate_config(&config).is_success());
//! ```

use std::collections::HashSet;

use serde::Serialize;
use stillwater::{NonEmptyVec, Validation};

use super::file::{ConfigFile, ScaleSection};
use super::RiskAssessmentConfig;
use crate::errors::RiskError;
use crate::range_table::RiskRange;
use crate::scale::{span, Scale, ScaleKind};

/// Largest number of points a scale may span.
pub const MAX_SCALE_POINTS: u64 = 1000;

/// A single problem with a configuration, located by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result accumulating every [`ConfigIssue`].
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

/// Validate a live configuration, accumulating ALL issues.
pub fn validate_config(config: &RiskAssessmentConfig) -> ConfigValidation<()> {
    combine(vec![
        validate_scale(&config.frequency),
        validate_scale(&config.severity),
        validate_ranges(config.risk_ranges.as_slice()),
    ])
}

/// Validate config with a fail-fast `Result` API for callers that apply it.
pub fn validate_config_result(config: &RiskAssessmentConfig) -> Result<(), RiskError> {
    into_result(validate_config(config))
}

/// Validate a config file before it is converted.
///
/// Scale bounds are checked here because conversion generates one point per
/// value. Custom labels for values outside the scale do not survive
/// conversion, so they are checked here too.
pub fn validate_file(file: &ConfigFile) -> ConfigValidation<()> {
    let sections = [
        (ScaleKind::Frequency, file.frequency.as_ref()),
        (ScaleKind::Severity, file.severity.as_ref()),
    ];
    let mut validations: Vec<ConfigValidation<()>> = sections
        .into_iter()
        .filter_map(|(kind, section)| section.map(|s| validate_section(kind, s)))
        .collect();
    if let Some(entries) = &file.risk_ranges {
        validations.push(issues_to_validation(
            entries
                .iter()
                .enumerate()
                .flat_map(|(index, entry)| bound_issues(index, entry.min, entry.max))
                .collect(),
        ));
    }
    combine(validations)
}

/// Convert a validation into a `Result`, listing every issue on failure.
pub fn into_result(validation: ConfigValidation<()>) -> Result<(), RiskError> {
    match validation {
        Validation::Success(()) => Ok(()),
        Validation::Failure(issues) => Err(RiskError::Validation(issues.into_vec())),
    }
}

/// Issues with a scale's bounds; empty when `[min, max]` may be generated.
fn scale_bound_issues(kind: ScaleKind, min: i64, max: i64) -> Vec<ConfigIssue> {
    let field = kind.as_str();
    let width = span(min, max);

    if min > max {
        vec![ConfigIssue::new(
            field,
            format!("min {min} is greater than max {max}"),
        )]
    } else if width > MAX_SCALE_POINTS {
        vec![ConfigIssue::new(
            field,
            format!("scale spans {width} values (at most {MAX_SCALE_POINTS} allowed)"),
        )]
    } else {
        Vec::new()
    }
}

fn validate_scale(scale: &Scale) -> ConfigValidation<()> {
    let mut issues = scale_bound_issues(scale.kind, scale.min, scale.max);

    if issues.is_empty() {
        let expected: Vec<i64> = (scale.min..=scale.max).collect();
        let actual: Vec<i64> = scale.values().collect();
        if expected != actual {
            issues.push(ConfigIssue::new(
                format!("{}.points", scale.kind.as_str()),
                "points do not match [min, max]; regenerate the scale",
            ));
        }
    }

    issues_to_validation(issues)
}

fn validate_section(kind: ScaleKind, section: &ScaleSection) -> ConfigValidation<()> {
    let field = kind.as_str();
    let mut issues = scale_bound_issues(kind, section.min, section.max);
    let bounds_ok = issues.is_empty();
    let mut seen = HashSet::new();

    for (index, point) in section.points.iter().enumerate() {
        if !seen.insert(point.value) {
            issues.push(ConfigIssue::new(
                format!("{field}.points[{index}].value"),
                format!("value {} is labeled more than once", point.value),
            ));
        }
        if bounds_ok && (point.value < section.min || point.value > section.max) {
            issues.push(ConfigIssue::new(
                format!("{field}.points[{index}].value"),
                format!(
                    "value {} is outside [{}, {}]",
                    point.value, section.min, section.max
                ),
            ));
        }
    }

    if let Some(vocabulary) = &section.vocabulary {
        if vocabulary.is_empty() {
            issues.push(ConfigIssue::new(
                format!("{field}.vocabulary"),
                "vocabulary must have at least one label",
            ));
        }
    }

    issues_to_validation(issues)
}

fn validate_ranges(ranges: &[RiskRange]) -> ConfigValidation<()> {
    let issues = ranges
        .iter()
        .enumerate()
        .flat_map(|(index, range)| bound_issues(index, range.min, range.max))
        .collect();
    issues_to_validation(issues)
}

fn bound_issues(index: usize, min: f64, max: f64) -> Vec<ConfigIssue> {
    let field = format!("risk_ranges[{index}]");
    let mut issues = Vec::new();

    for (name, bound) in [("min", min), ("max", max)] {
        if !bound.is_finite() {
            issues.push(ConfigIssue::new(
                format!("{field}.{name}"),
                format!("bound must be a finite number, got {bound}"),
            ));
        }
    }

    if min.is_finite() && max.is_finite() && min > max {
        issues.push(ConfigIssue::new(
            field,
            format!("min {min} is greater than max {max}"),
        ));
    }

    issues
}

fn issues_to_validation(mut issues: Vec<ConfigIssue>) -> ConfigValidation<()> {
    if issues.is_empty() {
        return Validation::Success(());
    }
    let head = issues.remove(0);
    Validation::Failure(NonEmptyVec::new(head, issues))
}

fn combine(validations: Vec<ConfigValidation<()>>) -> ConfigValidation<()> {
    let mut issues = Vec::new();
    for validation in validations {
        if let Validation::Failure(errors) = validation {
            issues.extend(errors);
        }
    }
    issues_to_validation(issues)
}
