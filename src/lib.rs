//! Vanity import path server.
//!
//! Answers package import requests for a vanity domain either with a page of
//! `go-import`/`go-source` meta tags or with a redirect to a browsable location,
//! after checking that the backing repository exists upstream.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net (listener) ──▶ http (router, middleware)
//!                                            │
//!                                            ▼
//!                                     resolve (engine) ──▶ probe ──▶ repository host
//!                                            │                 (HEAD, redirects, timeout)
//!                                            ▼
//!     Client Response ◀──────────── 200 meta | 302 redirect | 404
//!
//!     Cross-cutting: config (+ vcs), lifecycle, observability
//! ```
//!
//! The server speaks plain HTTP and is meant to sit behind a reverse proxy that
//! terminates TLS.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod probe;
pub mod resolve;
pub mod vcs;

pub use config::{ServerConfig, VanityConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolve::{ResolutionEngine, ResolutionOutcome, ResolutionRequest};
pub use vcs::{VcsConfig, VcsKind};
