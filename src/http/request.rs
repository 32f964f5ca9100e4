//! Request identification and extraction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Turn the request URI into a `ResolutionRequest`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An incoming `x-request-id` from the fronting proxy is kept
//! - The escaped path is used as-is; the engine never decodes it

use axum::http::{HeaderName, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::resolve::ResolutionRequest;

/// Header carrying the request ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID of `request`, or `"unknown"` before the ID layer ran.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Build the resolution request for `uri`.
pub fn resolution_request(uri: &Uri) -> ResolutionRequest {
    ResolutionRequest::from_parts(uri.path(), uri.query())
}
