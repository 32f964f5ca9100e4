//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration structure for the vanity server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VanityConfig {
    /// Vanity domain and redirect targets.
    pub server: ServerSection,

    /// Repository host settings.
    pub vcs: VcsSection,

    /// Upstream existence probe.
    pub probe: ProbeConfig,

    /// Listener configuration (TCP address or Unix socket).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Vanity domain and redirect targets.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerSection {
    /// Vanity domain, e.g. `acme.dev`. Required.
    pub base: String,

    /// Root URL of the repository host, e.g. `https://github.com/acme/`. Required.
    pub root: String,

    /// Where browsers are sent. Defaults to `root`.
    pub redirect: String,

    /// Where requests for `/` are sent. Defaults to `root`; an empty string
    /// makes `/` answer 404.
    pub root_redirect: Option<String>,

    /// Directory containing the `.well-known` folder.
    pub web_root: Option<String>,
}

/// Repository host settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VcsSection {
    /// Hosting provider (github, gitlab, bitbucket, gogs, gitea).
    pub provider: Option<String>,

    /// VCS kind (git, mercurial, subversion, bazaar, fossil). Applied after `provider`.
    pub kind: Option<String>,

    /// Directory URL template. Applied after `provider`.
    pub dir_template: Option<String>,

    /// File URL template, must contain `{file}`. Applied after `provider`.
    pub file_template: Option<String>,
}

/// Upstream probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Query the repository host before answering. When false every module exists.
    pub enabled: bool,

    /// Overall probe timeout in seconds, redirects included.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 5,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ListenerConfig {
    /// TCP bind address (e.g., "127.0.0.1:2369").
    pub tcp: Option<String>,

    /// Unix socket path. Mutually exclusive with `tcp`.
    pub unix: Option<String>,
}

impl ListenerConfig {
    /// Address used when neither a TCP address nor a socket is configured.
    pub const DEFAULT_TCP: &'static str = "127.0.0.1:2369";
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
