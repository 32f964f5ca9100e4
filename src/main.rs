use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use vanity_server::config::{read_config, validate_config, ConfigError, VanityConfig};
use vanity_server::observability::{logging, metrics};
use vanity_server::{net, HttpServer, ServerConfig, Shutdown};

/// Vanity import path server.
#[derive(Parser, Debug)]
#[command(name = "vanity", version, about)]
struct Args {
    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL for vanity server (required)
    #[arg(long)]
    base: Option<String>,

    /// Root URL for VCS host (required)
    #[arg(long)]
    root: Option<String>,

    /// Redirect URL for browsers
    #[arg(long)]
    redirect: Option<String>,

    /// VCS provider (github, gitlab, bitbucket, gogs, gitea)
    #[arg(long)]
    provider: Option<String>,

    /// VCS type (git, mercurial, subversion, bazaar, fossil)
    #[arg(long)]
    vcs: Option<String>,

    /// Redirect for requests to the base URL; empty disables it
    #[arg(long)]
    root_redirect: Option<String>,

    /// Directory containing the .well-known folder
    #[arg(long)]
    web_root: Option<String>,

    /// Address to listen on for HTTP
    #[arg(long, conflicts_with = "listen_unix")]
    listen_tcp: Option<String>,

    /// Unix socket to listen on for HTTP
    #[arg(long)]
    listen_unix: Option<String>,

    /// Don't query the remote server for repo presence
    #[arg(long)]
    no_query_remote: bool,

    /// Upstream probe timeout in seconds
    #[arg(long)]
    probe_timeout: Option<u64>,
}

impl Args {
    /// Overlay command line values on the file configuration.
    fn apply(self, config: &mut VanityConfig) {
        let server = &mut config.server;
        if let Some(v) = self.base {
            server.base = v;
        }
        if let Some(v) = self.root {
            server.root = v;
        }
        if let Some(v) = self.redirect {
            server.redirect = v;
        }
        if self.root_redirect.is_some() {
            server.root_redirect = self.root_redirect;
        }
        if self.web_root.is_some() {
            server.web_root = self.web_root;
        }

        // A provider on the command line replaces the file's whole VCS layout.
        if self.provider.is_some() {
            config.vcs.provider = self.provider;
            config.vcs.dir_template = None;
            config.vcs.file_template = None;
        }
        if self.vcs.is_some() {
            config.vcs.kind = self.vcs;
        }

        if self.listen_tcp.is_some() || self.listen_unix.is_some() {
            config.listener.tcp = self.listen_tcp;
            config.listener.unix = self.listen_unix;
        }
        if self.no_query_remote {
            config.probe.enabled = false;
        }
        if let Some(secs) = self.probe_timeout {
            config.probe.timeout_secs = secs;
        }
    }
}

fn load(args: Args) -> Result<VanityConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => VanityConfig::default(),
    };
    args.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load(args) {
        Ok(c) => c,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vanity server starting");

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: VanityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server_config = Arc::new(ServerConfig::from_file(&config)?);

    tracing::info!(
        base = %server_config.base(),
        root = %server_config.repo().root(),
        vcs = %server_config.repo().kind(),
        redirect = %server_config.redirect(),
        probe_enabled = server_config.probe_enabled(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::from_config(
        server_config,
        Duration::from_secs(config.timeouts.request_secs),
    )?;

    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        vanity_server::lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
