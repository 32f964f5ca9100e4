//! HTTP implementation of the upstream probe.
//!
//! # Responsibilities
//! - Issue a HEAD request to the candidate repository URL
//! - Follow up to ten redirects
//! - Enforce the overall probe deadline
//! - Translate transport failures into an unavailable outcome

use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{redirect, Client};
use thiserror::Error;

use crate::observability::metrics;
use crate::probe::{ProbeOutcome, UpstreamProbe};

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Failures while talking to the upstream host.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP client could not be constructed.
    #[error("failed to build probe client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network failure, timeout, or too many redirects.
    #[error("upstream unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),
}

/// Probe backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Create a probe whose checks, redirects included, finish within `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .user_agent(concat!("vanity-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self { client })
    }

    /// Final status code for `candidate`, after redirects.
    pub async fn check(&self, candidate: &str) -> Result<StatusCode, ProbeError> {
        let response = self
            .client
            .head(candidate)
            .send()
            .await
            .map_err(ProbeError::Unavailable)?;

        Ok(response.status())
    }
}

#[async_trait]
impl UpstreamProbe for HttpProbe {
    async fn exists(&self, candidate: &str) -> ProbeOutcome {
        let start = Instant::now();

        match self.check(candidate).await {
            Ok(status) => {
                let outcome = ProbeOutcome::from_status(status);
                tracing::debug!(upstream = %candidate, status = %status, "Upstream probed");
                metrics::record_probe(if outcome.exists { "present" } else { "absent" }, start);
                outcome
            }
            Err(e) => {
                tracing::warn!(upstream = %candidate, error = %e, "Upstream probe failed");
                metrics::record_probe("unavailable", start);
                ProbeOutcome::unavailable()
            }
        }
    }
}
