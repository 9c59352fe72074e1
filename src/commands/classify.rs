use super::emit;
use crate::cli;
use crate::config::{load_config, RiskAssessmentConfig};
use crate::formatting::FormattingConfig;
use crate::io::output::Classification;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ClassifyConfig {
    pub score: Option<f64>,
    pub frequency: Option<i64>,
    pub severity: Option<i64>,
    pub config: Option<PathBuf>,
    pub format: cli::OutputFormat,
}

pub fn classify_score(request: ClassifyConfig, formatting: FormattingConfig) -> Result<()> {
    let config = load_config(request.config.as_deref()).context("Failed to load configuration")?;
    let classification = build_classification(&config, &request)?;
    tracing::debug!(
        score = classification.score,
        label = %classification.label,
        "Classified score"
    );
    emit(request.format, formatting, None, |writer| {
        writer.write_classification(&classification)
    })
}

fn build_classification(
    config: &RiskAssessmentConfig,
    request: &ClassifyConfig,
) -> Result<Classification> {
    match (request.score, request.frequency, request.severity) {
        (Some(score), _, _) => Ok(Classification::of(config, score)),
        (None, Some(frequency), Some(severity)) => {
            let score = config.score(frequency, severity)?;
            Ok(Classification::of(config, score).with_factors(frequency, severity))
        }
        _ => anyhow::bail!("Provide a score or both --frequency and --severity"),
    }
}
