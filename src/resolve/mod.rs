//! Request resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, query)
//!     → mod.rs (module id, go-get detection)
//!     → engine.rs (root redirect, upstream probe, response shape)
//!     → template.rs (meta tag document, compiled once)
//!     → Return: NotFound | Redirect | Meta
//! ```
//!
//! # Design Decisions
//! - The module id is the first path segment; sub-paths never change it
//! - The probe gates both response shapes and runs once per request
//! - Malformed or absent `go-get` values mean "redirect", never an error

pub mod engine;
pub mod template;

use std::collections::HashMap;

pub use engine::ResolutionEngine;
pub use template::MetaTemplate;

/// Query parameter sent by the go tool when it wants meta tags.
pub const GO_GET: &str = "go-get";

/// First segment of `path` after stripping one leading `/`.
///
/// `"/widget/sub"`, `"/widget"` and `"widget"` all yield `"widget"`; `"/"` yields `""`.
pub fn module_id(path: &str) -> &str {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').next().unwrap_or("")
}

/// Parse a raw query string into a multi-valued map.
///
/// Invalid percent-encoding is decoded lossily; nothing here fails.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(raw) = raw {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }
    params
}

/// A single resolution request.
#[derive(Debug, Clone, Default)]
pub struct ResolutionRequest {
    /// Raw request path, beginning with `/`.
    pub path: String,
    /// Query parameters, each with every value in order.
    pub query: HashMap<String, Vec<String>>,
}

impl ResolutionRequest {
    pub fn new(path: impl Into<String>, query: HashMap<String, Vec<String>>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Build a request from a path and an optional raw query string.
    pub fn from_parts(path: &str, raw_query: Option<&str>) -> Self {
        Self::new(path, parse_query(raw_query))
    }

    pub fn module_id(&self) -> &str {
        module_id(&self.path)
    }

    /// True when any `go-get` value is exactly `"1"`.
    pub fn wants_meta(&self) -> bool {
        self.query
            .get(GO_GET)
            .map(|values| values.iter().any(|v| v == "1"))
            .unwrap_or(false)
    }
}

/// What the HTTP layer should answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The repository does not exist (or could not be reached).
    NotFound,
    /// Send the client elsewhere with 302 Found.
    Redirect(String),
    /// Serve the meta tag document with 200 OK.
    Meta(String),
}

impl ResolutionOutcome {
    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::NotFound => "not_found",
            ResolutionOutcome::Redirect(_) => "redirect",
            ResolutionOutcome::Meta(_) => "meta",
        }
    }
}
