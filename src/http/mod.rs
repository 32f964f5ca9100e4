//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/Unix connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/get_only.rs (405 for anything but GET)
//!     → request.rs (request ID, path and query extraction)
//!     → resolution engine / .well-known files / robots.txt
//!     → response.rs (outcome → 200 | 302 | 404)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, DEFAULT_REQUEST_TIMEOUT};
