//! CLI command implementations for riskmap.
//!
//! Available commands:
//! - **init**: write a default `riskmap.toml`
//! - **validate**: report every configuration problem at once
//! - **classify**: classify one score or frequency/severity pair
//! - **relabel**: recompute the labels of a JSON rows file
//! - **scales**: show the generated scales, range table, and diagnostics

pub mod classify;
pub mod init;
pub mod relabel;
pub mod scales;
pub mod validate;

pub use classify::{classify_score, ClassifyConfig};
pub use init::init_config;
pub use relabel::{relabel_rows, RelabelConfig};
pub use scales::show_scales;
pub use validate::validate_config_file;

use crate::cli;
use crate::formatting::{formatter_for, ColorMode, FormattingConfig};
use crate::io::{self, create_writer, OutputWriter};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Render through an [`OutputWriter`] and send the result to `output`, or
/// stdout when no path is given. Files never get color codes.
pub(crate) fn emit<F>(
    format: cli::OutputFormat,
    formatting: FormattingConfig,
    output: Option<&Path>,
    render: F,
) -> Result<()>
where
    F: FnOnce(&mut dyn OutputWriter) -> Result<()>,
{
    let formatting = match output {
        Some(_) => FormattingConfig::new(ColorMode::Never, formatting.unicode),
        None => formatting,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = create_writer(
            format.into(),
            Box::new(&mut buffer),
            formatter_for(formatting),
        );
        render(writer.as_mut())?;
    }

    match output {
        Some(path) => {
            io::write_file(path, &String::from_utf8_lossy(&buffer))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&buffer)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
