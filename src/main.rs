use anyhow::Result;
use clap::Parser;
use riskmap::cli::{Cli, Commands};
use riskmap::commands::{self, ClassifyConfig, RelabelConfig};
use riskmap::formatting::FormattingConfig;
use riskmap::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatting = if cli.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };

    match cli.command {
        Commands::Init { force, path } => commands::init_config(&path, force),
        Commands::Validate { config } => {
            commands::validate_config_file(config.as_deref(), formatting)
        }
        Commands::Classify {
            score,
            frequency,
            severity,
            config,
            format,
        } => commands::classify_score(
            ClassifyConfig {
                score,
                frequency,
                severity,
                config,
                format,
            },
            formatting,
        ),
        Commands::Relabel {
            rows,
            config,
            output,
            format,
        } => commands::relabel_rows(
            RelabelConfig {
                rows,
                config,
                output,
                format,
            },
            formatting,
        )
        .map(|_| ()),
        Commands::Scales { config, format } => {
            commands::show_scales(config.as_deref(), format, formatting)
        }
    }
}
