//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            command line flags
//!     → loader.rs (parse)            │
//!     → overrides applied ◀──────────┘
//!     → validation.rs (semantic checks)
//!     → server.rs ServerConfig (VCS setters applied)
//!     → frozen in Arc, shared with the resolution engine
//! ```
//!
//! # Design Decisions
//! - Config is immutable once serving starts; there is no hot reload
//! - All file fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod server;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ProbeConfig, TimeoutConfig, VanityConfig};
pub use server::ServerConfig;
pub use validation::{validate_config, ValidationError};
