use super::emit;
use crate::cli;
use crate::config::load_config;
use crate::formatting::FormattingConfig;
use crate::io::read_rows;
use crate::relabel::{relabel_in_place, RelabelSummary};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct RelabelConfig {
    pub rows: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: cli::OutputFormat,
}

/// Relabel a rows file under the active configuration and write the result.
pub fn relabel_rows(
    request: RelabelConfig,
    formatting: FormattingConfig,
) -> Result<RelabelSummary> {
    let config = load_config(request.config.as_deref()).context("Failed to load configuration")?;
    let mut rows = read_rows(&request.rows)
        .with_context(|| format!("Failed to read rows from {}", request.rows.display()))?;

    let summary = relabel_in_place(&mut rows, &config);
    tracing::info!(
        rows = summary.examined,
        changed = summary.changed,
        unresolved = summary.unresolved,
        "Relabeled {}",
        request.rows.display()
    );

    emit(
        request.format,
        formatting,
        request.output.as_deref(),
        |writer| writer.write_relabel(&rows, &summary),
    )?;
    Ok(summary)
}
