//! Response construction.
//!
//! # Responsibilities
//! - Map resolution outcomes to HTTP responses
//! - Render the plain HTML error page for 404 and 405
//!
//! # Design Decisions
//! - Error bodies carry only the status line; probe codes and causes are logged
//! - Redirects use 302 Found

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::resolve::ResolutionOutcome;

const HTML: &str = "text/html; charset=utf-8";

/// Body served for `/robots.txt`.
pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /\n";

/// Small HTML page naming the status.
pub fn error_page(status: StatusCode) -> Response {
    let line = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "<html>\n<head>\n<title>{line}</title>\n</head>\n<body>\n\
         <center><h1>{line}</h1></center>\n<hr><center>vanity-server</center>\n\
         </body>\n</html>\n"
    );

    (status, [(header::CONTENT_TYPE, HTML)], body).into_response()
}

/// 302 Found pointing at `target`.
pub fn found(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, location)
            .body(Body::empty())
            .unwrap_or_else(|_| error_page(StatusCode::INTERNAL_SERVER_ERROR)),
        Err(_) => {
            tracing::error!(target = %target, "Redirect target is not a valid header value");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

impl IntoResponse for ResolutionOutcome {
    fn into_response(self) -> Response {
        match self {
            ResolutionOutcome::NotFound => error_page(StatusCode::NOT_FOUND),
            ResolutionOutcome::Redirect(target) => found(&target),
            ResolutionOutcome::Meta(body) => {
                (StatusCode::OK, [(header::CONTENT_TYPE, HTML)], body).into_response()
            }
        }
    }
}
