use super::emit;
use crate::classifier::diagnose;
use crate::cli;
use crate::config::load_config;
use crate::formatting::FormattingConfig;
use crate::io::output::ConfigOverview;
use anyhow::{Context, Result};
use std::path::Path;

/// Print both generated scales, the range table, and its diagnostics.
pub fn show_scales(
    config: Option<&Path>,
    format: cli::OutputFormat,
    formatting: FormattingConfig,
) -> Result<()> {
    let config = load_config(config).context("Failed to load configuration")?;
    let diagnostics = diagnose(&config);
    let overview = ConfigOverview {
        config: &config,
        score_domain: config.score_domain(),
        diagnostics: &diagnostics,
    };

    emit(format, formatting, None, |writer| writer.write_overview(&overview))
}
