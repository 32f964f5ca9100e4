//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (GET-only, timeout, request ID, tracing)
//! - Serve `/.well-known/` files and `/robots.txt`
//! - Dispatch everything else to the resolution engine
//! - Serve on a TCP or Unix listener with graceful shutdown
//!
//! # Design Decisions
//! - Resolution runs under its own deadline; expiry is answered like a failed
//!   probe (404), never 408
//! - The tower timeout only guards the static routes
//! - One access line per request at INFO, 405s included

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ServerConfig;
use crate::http::middleware::get_only_middleware;
use crate::http::request::{request_id, resolution_request, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::{error_page, ROBOTS_TXT};
use crate::net::BoundListener;
use crate::probe::{HttpProbe, ProbeError, UpstreamProbe};
use crate::resolve::{ResolutionEngine, ResolutionOutcome};

/// Default time allowed for a whole request, probe included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResolutionEngine>,
    pub request_timeout: Duration,
}

/// HTTP server for the vanity domain.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server around an existing engine.
    pub fn new(engine: Arc<ResolutionEngine>, request_timeout: Duration) -> Self {
        let router = Self::build_router(engine, request_timeout);
        Self { router }
    }

    /// Create a server probing upstream over HTTP.
    pub fn from_config(config: Arc<ServerConfig>, request_timeout: Duration) -> Result<Self, ProbeError> {
        let probe: Arc<dyn UpstreamProbe> = Arc::new(HttpProbe::new(config.probe_timeout())?);
        let engine = Arc::new(ResolutionEngine::new(config, probe));
        Ok(Self::new(engine, request_timeout))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(engine: Arc<ResolutionEngine>, request_timeout: Duration) -> Router {
        let well_known = ServeDir::new(engine.config().web_root().join(".well-known"))
            .append_index_html_on_directories(false);
        let state = AppState {
            engine,
            request_timeout,
        };

        let trace = TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO));

        Router::new()
            .route("/robots.txt", any(robots_handler))
            .route("/robots.txt/{*rest}", any(not_found_handler))
            .nest_service("/.well-known", well_known)
            .route_layer(TimeoutLayer::new(request_timeout))
            .route("/", any(resolve_handler))
            .route("/{*path}", any(resolve_handler))
            .with_state(state)
            .layer(middleware::from_fn(get_only_middleware))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
                    .layer(trace)
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone())),
            )
    }

    /// The router, for serving through a custom transport or in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: BoundListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %listener.describe(), "HTTP server starting");

        let signal = async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
        };

        match listener {
            BoundListener::Tcp(l) => {
                axum::serve(l, self.router)
                    .with_graceful_shutdown(signal)
                    .await?;
            }
            #[cfg(unix)]
            BoundListener::Unix { listener, path } => {
                let served = axum::serve(listener, self.router)
                    .with_graceful_shutdown(signal)
                    .await;
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove socket");
                }
                served?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: resolve the requested module.
async fn resolve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request);
    let resolution = resolution_request(request.uri());

    let outcome = match tokio::time::timeout(state.request_timeout, state.engine.resolve(&resolution)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(
                request_id = %request_id,
                module = %resolution.module_id(),
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Resolution timed out"
            );
            ResolutionOutcome::NotFound
        }
    };

    tracing::debug!(
        request_id = %request_id,
        path = %resolution.path,
        module = %resolution.module_id(),
        outcome = outcome.label(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Resolved"
    );

    outcome.into_response()
}

async fn robots_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        ROBOTS_TXT,
    )
        .into_response()
}

async fn not_found_handler() -> Response {
    error_page(StatusCode::NOT_FOUND)
}
