//! Resolution engine.
//!
//! # Responsibilities
//! - Redirect `/` to the configured root redirect
//! - Gate every module on the upstream probe (unless disabled)
//! - Choose between browser redirect and meta tag document
//!
//! # Design Decisions
//! - Configuration is a shared immutable snapshot; no locks on the hot path
//! - The engine holds no per-request state and is safe to call concurrently
//! - A cancelled request drops the probe future with it

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::observability::metrics;
use crate::probe::{ProbeOutcome, UpstreamProbe};
use crate::resolve::{module_id, MetaTemplate, ResolutionOutcome, ResolutionRequest};

/// Decides how to answer a vanity import request.
pub struct ResolutionEngine {
    config: Arc<ServerConfig>,
    probe: Arc<dyn UpstreamProbe>,
    template: MetaTemplate,
}

impl ResolutionEngine {
    pub fn new(config: Arc<ServerConfig>, probe: Arc<dyn UpstreamProbe>) -> Self {
        let template = MetaTemplate::new(&config);
        Self {
            config,
            probe,
            template,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Resolve one request.
    pub async fn resolve(&self, request: &ResolutionRequest) -> ResolutionOutcome {
        let outcome = self.resolve_inner(request).await;
        metrics::record_resolution(outcome.label());
        outcome
    }

    async fn resolve_inner(&self, request: &ResolutionRequest) -> ResolutionOutcome {
        if request.path == "/" {
            return match self.config.root_redirect() {
                Some(target) => ResolutionOutcome::Redirect(target.to_string()),
                None => ResolutionOutcome::NotFound,
            };
        }

        let module = request.module_id();
        let probe = self.check_upstream(module).await;
        if !probe.exists {
            tracing::info!(
                module = %module,
                upstream_status = probe.status.as_u16(),
                "Module not found upstream"
            );
            return ResolutionOutcome::NotFound;
        }

        let target = self.redirect_target(&request.path);
        if request.wants_meta() {
            ResolutionOutcome::Meta(self.template.render(module, &target))
        } else {
            ResolutionOutcome::Redirect(target)
        }
    }

    async fn check_upstream(&self, module: &str) -> ProbeOutcome {
        if !self.config.probe_enabled() {
            return ProbeOutcome::assumed();
        }
        self.probe.exists(&self.config.repo().upstream_url(module)).await
    }

    /// Where a browser asking for `path` is sent.
    ///
    /// When browsers go to the repository host, only the module's repository is
    /// meaningful there, so the sub-path is dropped. Any other destination (a
    /// documentation site, say) receives the full requested path.
    pub fn redirect_target(&self, path: &str) -> String {
        if self.config.redirects_to_root() {
            self.config.repo().upstream_url(module_id(path))
        } else {
            format!("{}{}", self.config.redirect(), path)
        }
    }
}
