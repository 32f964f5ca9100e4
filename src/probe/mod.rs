//! Upstream existence probe.
//!
//! # Data Flow
//! ```text
//! candidate URL (root + module)
//!     → http.rs (HEAD, follow redirects, bounded by timeout)
//!     → ProbeOutcome { exists, status }
//! ```
//!
//! # Design Decisions
//! - The probe never returns an error; unreachable hosts read as absent with 503
//! - Only the final status after redirects matters; 200 means present
//! - No caching, no retries: one attempt per request
//! - Dropping the future abandons the in-flight request

pub mod http;

use async_trait::async_trait;
use axum::http::StatusCode;

pub use self::http::{HttpProbe, ProbeError};

/// Result of an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// True only when the final response was 200.
    pub exists: bool,
    /// Final status code, or 503 when the host could not be reached.
    pub status: StatusCode,
}

impl ProbeOutcome {
    /// Outcome for a reachable host answering with `status`.
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            exists: status == StatusCode::OK,
            status,
        }
    }

    /// Outcome when the host could not be reached at all.
    pub fn unavailable() -> Self {
        Self {
            exists: false,
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Outcome used when probing is disabled.
    pub fn assumed() -> Self {
        Self {
            exists: true,
            status: StatusCode::OK,
        }
    }
}

/// Checks whether a repository exists on the upstream host.
#[async_trait]
pub trait UpstreamProbe: Send + Sync {
    async fn exists(&self, candidate: &str) -> ProbeOutcome;
}
