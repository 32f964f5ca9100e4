//! HTTP middleware.

pub mod get_only;

pub use get_only::get_only_middleware;
