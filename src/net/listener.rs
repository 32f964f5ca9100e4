//! Listener setup.
//!
//! # Responsibilities
//! - Bind the configured TCP address or Unix socket
//! - Report the bound address for logging
//! - Remove the socket file when serving ends
//!
//! # Design Decisions
//! - Plain HTTP only; TLS is terminated by the fronting proxy
//! - TCP defaults to IPv4 localhost:2369 when nothing is configured

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to resolve or bind the address, or to bind the socket path.
    #[error("Failed to bind {target}: {source}")]
    Bind {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Unix sockets requested on a platform without them.
    #[error("Unix sockets are not supported on this platform")]
    UnixUnsupported,
}

/// A bound listener ready to be served.
#[derive(Debug)]
pub enum BoundListener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix { listener: UnixListener, path: PathBuf },
}

impl BoundListener {
    /// Human readable description of where the server listens.
    pub fn describe(&self) -> String {
        match self {
            BoundListener::Tcp(l) => l
                .local_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "tcp".to_string()),
            #[cfg(unix)]
            BoundListener::Unix { path, .. } => format!("unix:{}", path.display()),
        }
    }

    /// Local TCP address, if listening on TCP.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match self {
            BoundListener::Tcp(l) => l.local_addr().ok(),
            #[cfg(unix)]
            BoundListener::Unix { .. } => None,
        }
    }
}

/// Bind according to `config`, defaulting to [`ListenerConfig::DEFAULT_TCP`].
pub async fn bind(config: &ListenerConfig) -> Result<BoundListener, ListenerError> {
    if let Some(path) = &config.unix {
        return bind_unix(PathBuf::from(path));
    }

    let address = config
        .tcp
        .clone()
        .unwrap_or_else(|| ListenerConfig::DEFAULT_TCP.to_string());
    bind_tcp(&address).await
}

/// Bind a TCP listener on `address`, a `host:port` pair. Host names are resolved.
pub async fn bind_tcp(address: &str) -> Result<BoundListener, ListenerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind {
            target: address.to_string(),
            source,
        })?;

    match listener.local_addr() {
        Ok(addr) => tracing::info!(address = %address, bound = %addr, "Listener bound"),
        Err(_) => tracing::info!(address = %address, "Listener bound"),
    }
    Ok(BoundListener::Tcp(listener))
}

#[cfg(unix)]
fn bind_unix(path: PathBuf) -> Result<BoundListener, ListenerError> {
    let listener = UnixListener::bind(&path).map_err(|source| ListenerError::Bind {
        target: path.display().to_string(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Listener bound");
    Ok(BoundListener::Unix { listener, path })
}

#[cfg(not(unix))]
fn bind_unix(_path: PathBuf) -> Result<BoundListener, ListenerError> {
    Err(ListenerError::UnixUnsupported)
}
