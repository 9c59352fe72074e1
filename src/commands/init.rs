use crate::config::{ConfigFile, RiskAssessmentConfig};
use crate::io;
use anyhow::Result;
use std::path::Path;

const HEADER: &str = "# riskmap configuration
#
# Scales are regenerated from min/max on load; [[<scale>.points]] entries
# override individual labels. Risk ranges are checked top to bottom and the
# first enabled range containing a score wins.

";

/// Default configuration file text.
pub fn default_config_text() -> Result<String> {
    let body = ConfigFile::from_config(&RiskAssessmentConfig::default()).to_toml_string()?;
    Ok(format!("{HEADER}{body}"))
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    io::write_file(path, &default_config_text()?)?;
    println!("Created {} configuration file", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use tempfile::TempDir;

    #[test]
    fn default_text_loads_as_default_config() {
        let text = default_config_text().unwrap();
        let config = parse_and_validate_config(&text).unwrap();
        assert_eq!(config, RiskAssessmentConfig::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("riskmap.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(init_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        init_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[[risk_ranges]]"));
    }
}
