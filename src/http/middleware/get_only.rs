//! Method restriction middleware.
//! Every endpoint of the vanity server is GET-only.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::response::error_page;

/// Answer anything but GET with 405 Method Not Allowed.
///
/// HEAD is rejected as well.
pub async fn get_only_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::GET {
        return next.run(req).await;
    }

    tracing::debug!(method = %req.method(), path = %req.uri().path(), "Method not allowed");
    let mut response = error_page(StatusCode::METHOD_NOT_ALLOWED);
    response
        .headers_mut()
        .insert(axum::http::header::ALLOW, axum::http::HeaderValue::from_static("GET"));
    response
}
