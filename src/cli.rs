use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(about = "Frequency x severity risk classification", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Plain output: no colors, ASCII markers and borders
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default riskmap.toml
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Where to write the config file
        #[arg(long, default_value = "riskmap.toml")]
        path: PathBuf,
    },

    /// Report every problem in a configuration at once
    Validate {
        /// Configuration file (discovered from the current directory if omitted)
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Classify a score, or a frequency/severity pair
    Classify {
        /// Score to classify
        #[arg(
            allow_negative_numbers = true,
            required_unless_present_all = ["frequency", "severity"],
            conflicts_with_all = ["frequency", "severity"]
        )]
        score: Option<f64>,

        /// Frequency scale value
        #[arg(long, requires = "severity", allow_negative_numbers = true)]
        frequency: Option<i64>,

        /// Severity scale value
        #[arg(long, requires = "frequency", allow_negative_numbers = true)]
        severity: Option<i64>,

        /// Configuration file
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Recompute the labels of a JSON rows file
    Relabel {
        /// JSON array of {score, label} rows
        rows: PathBuf,

        /// Configuration file
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Show both scales, the range table, and table diagnostics
    Scales {
        /// Configuration file
        #[arg(short, long, env = "RISKMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
