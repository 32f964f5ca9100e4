//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Engine, probe and HTTP layers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout/stderr, collected by the service manager
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Probe failures are logged, never shown to clients

pub mod logging;
pub mod metrics;
