use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::file::ConfigFile;
use super::validation::{into_result, validate_config_result, validate_file};
use super::RiskAssessmentConfig;
use crate::errors::RiskError;

/// File name searched for when no explicit config path is given.
pub const CONFIG_FILE_NAME: &str = "riskmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<RiskAssessmentConfig, RiskError> {
    let file = ConfigFile::from_toml_str(contents)?;
    into_result(validate_file(&file))?;

    let config = file.into_config();
    validate_config_result(&config)?;
    Ok(config)
}

/// Load and validate the config at an explicit path; every failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<RiskAssessmentConfig, RiskError> {
    let contents = read_config_file(path).map_err(|e| RiskError::io(path, e))?;
    let config = parse_and_validate_config(&contents).map_err(|e| with_path(e, path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a candidate path during discovery.
///
/// A missing file means "keep looking" (`Ok(None)`); a file that exists but
/// cannot be read or is invalid stops discovery with an error, so a broken
/// config is never silently replaced by defaults.
pub(crate) fn try_load_config_from_path(
    config_path: &Path,
) -> Result<Option<RiskAssessmentConfig>, RiskError> {
    match read_config_file(config_path) {
        Ok(contents) => parse_and_validate_config(&contents)
            .map(|config| {
                log::debug!("Loaded config from {}", config_path.display());
                Some(config)
            })
            .map_err(|e| with_path(e, config_path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            log::warn!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            );
            Err(RiskError::io(config_path, e))
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `riskmap.toml`, falling back to defaults.
pub fn load_config_from(start: PathBuf) -> Result<RiskAssessmentConfig, RiskError> {
    for dir in directory_ancestors(start, MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            return Ok(config);
        }
    }

    log::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    Ok(RiskAssessmentConfig::default())
}

/// Load the config from an explicit path, or discover it from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<RiskAssessmentConfig, RiskError> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(RiskAssessmentConfig::default())
        }
    }
}

fn with_path(error: RiskError, path: &Path) -> RiskError {
    match error {
        RiskError::ConfigParse { message, .. } => RiskError::ConfigParse {
            path: Some(path.to_path_buf()),
            message,
        },
        other => other,
    }
}
