//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required values present (base, root)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting listeners
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VanityConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::VanityConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing base URL")]
    MissingBase,

    #[error("missing root URL")]
    MissingRoot,

    #[error("conflicting listeners: both tcp and unix are set")]
    ConflictingListeners,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("file template {0:?} does not contain {{file}}")]
    InvalidFileTemplate(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &VanityConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.base.trim_end_matches('/').is_empty() {
        errors.push(ValidationError::MissingBase);
    }
    if config.server.root.trim_end_matches('/').is_empty() {
        errors.push(ValidationError::MissingRoot);
    }

    if config.listener.tcp.is_some() && config.listener.unix.is_some() {
        errors.push(ValidationError::ConflictingListeners);
    }

    if config.probe.enabled && config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("probe.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if let Some(file) = &config.vcs.file_template {
        if !file.is_empty() && !file.contains("{file}") {
            errors.push(ValidationError::InvalidFileTemplate(file.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> VanityConfig {
        let mut config = VanityConfig::default();
        config.server.base = "acme.dev".into();
        config.server.root = "https://github.com/acme/".into();
        config
    }

    #[test]
    fn test_minimal_config_is_valid() {
        assert!(validate_config(&minimal()).is_ok());
    }

    #[test]
    fn test_empty_config_reports_all_missing() {
        let errors = validate_config(&VanityConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingBase, ValidationError::MissingRoot]);
    }

    #[test]
    fn test_conflicting_listeners() {
        let mut config = minimal();
        config.listener.tcp = Some("127.0.0.1:2369".into());
        config.listener.unix = Some("/run/vanity.sock".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ConflictingListeners));
    }

    #[test]
    fn test_zero_probe_timeout_only_matters_when_enabled() {
        let mut config = minimal();
        config.probe.timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        config.probe.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_file_template_without_token() {
        let mut config = minimal();
        config.vcs.file_template = Some("blob/master".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidFileTemplate("blob/master".into())]);
    }

    #[test]
    fn test_bad_metrics_address() {
        let mut config = minimal();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidMetricsAddress(_)));
    }
}
