//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::VanityConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::vcs::VcsError;

/// Error type for configuration loading and server construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Missing or invalid base value")]
    MissingBase,

    #[error("Missing or invalid root value")]
    MissingRoot,

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error("Web root {path} is not usable: {reason}", path = .path.display())]
    WebRoot { path: PathBuf, reason: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML configuration file without semantic checks.
///
/// Command line overrides are applied on top before [`validate_config`] runs.
pub fn read_config(path: &Path) -> Result<VanityConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: VanityConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<VanityConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
