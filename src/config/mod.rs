// Sub-modules
mod core;
pub mod file;
mod loader;
pub mod validation;

// Re-export core types
pub use self::core::{default_risk_ranges, RiskAssessmentConfig};

// Re-export file format types
pub use file::{ConfigFile, RangeEntry, ScaleSection};

// Re-export loader functions
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

// Re-export validation entry points
pub use validation::{validate_config, validate_config_result, ConfigIssue, ConfigValidation};
