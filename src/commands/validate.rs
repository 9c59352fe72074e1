use crate::classifier::diagnose;
use crate::config::load_config;
use crate::errors::RiskError;
use crate::formatting::{formatter_for, FormattingConfig, Marker, OutputFormatter};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Load and validate a configuration, printing every issue found.
///
/// Validation issues fail the command; table diagnostics are only warnings.
pub fn validate_config_file(config: Option<&Path>, formatting: FormattingConfig) -> Result<()> {
    let formatter = formatter_for(formatting);
    let mut stdout = std::io::stdout().lock();
    let issue_count = report(config, formatter.as_ref(), &mut stdout)?;
    stdout.flush()?;

    if issue_count > 0 {
        anyhow::bail!("configuration has {} issue(s)", issue_count);
    }
    Ok(())
}

/// Write the validation report, returning how many blocking issues it lists.
pub(crate) fn report(
    config: Option<&Path>,
    formatter: &dyn OutputFormatter,
    out: &mut dyn Write,
) -> Result<usize> {
    let loaded = match load_config(config) {
        Ok(loaded) => loaded,
        Err(RiskError::Validation(issues)) => {
            for issue in &issues {
                writeln!(
                    out,
                    "{} {} {}",
                    formatter.marker(Marker::Fail),
                    formatter.bold(&issue.field),
                    formatter.error(&issue.message)
                )?;
            }
            return Ok(issues.len());
        }
        Err(e) => {
            let code = e.code();
            return Err(e).with_context(|| format!("Failed to load configuration [{code}]"));
        }
    };

    writeln!(
        out,
        "{} {}",
        formatter.marker(Marker::Ok),
        formatter.success("Configuration is valid")
    )?;
    for finding in &diagnose(&loaded).findings {
        writeln!(
            out,
            "{} {}",
            formatter.marker(Marker::Warn),
            formatter.warning(&finding.message())
        )?;
    }
    Ok(0)
}
