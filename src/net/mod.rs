//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (tcp address | unix socket path)
//!     → listener.rs (bind)
//!     → BoundListener handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Exactly one listener per server
//! - No TLS: the server always sits behind a reverse proxy

pub mod listener;

pub use listener::{bind, BoundListener, ListenerError};
