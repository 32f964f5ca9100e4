//! Runtime server configuration.
//!
//! `ServerConfig` is assembled and mutated during startup, then frozen behind an
//! `Arc` and shared read-only with every request handler.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::loader::ConfigError;
use crate::config::schema::VanityConfig;
use crate::vcs::VcsConfig;

/// Default overall timeout for the upstream probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything the resolution engine needs to answer a request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    base: String,
    repo: VcsConfig,
    redirect: String,
    root_redirect: Option<String>,
    web_root: PathBuf,
    probe_enabled: bool,
    probe_timeout: Duration,
}

impl ServerConfig {
    /// Bind the vanity domain `base` to the repositories under `root`.
    ///
    /// Browsers are sent to `redirect`, or to the repository itself when it is empty.
    pub fn new(base: &str, root: &str, redirect: &str) -> Result<Self, ConfigError> {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingBase);
        }

        let repo = VcsConfig::new(root);
        if repo.root().is_empty() {
            return Err(ConfigError::MissingRoot);
        }

        let redirect = match redirect.trim_end_matches('/') {
            "" => repo.root().to_string(),
            r => r.to_string(),
        };

        Ok(Self {
            base: base.to_string(),
            root_redirect: Some(repo.root().to_string()),
            repo,
            redirect,
            web_root: PathBuf::from("./"),
            probe_enabled: true,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        })
    }

    /// Build the runtime configuration from a validated configuration file.
    ///
    /// The provider is applied first so an explicit kind or template overrides it.
    pub fn from_file(config: &VanityConfig) -> Result<Self, ConfigError> {
        let server = &config.server;
        let mut cfg = Self::new(&server.base, &server.root, &server.redirect)?;

        if let Some(target) = &server.root_redirect {
            cfg.set_root_redirect(target);
        }
        if let Some(web_root) = &server.web_root {
            cfg.set_web_root(Path::new(web_root))?;
        }

        let vcs = &config.vcs;
        if let Some(provider) = &vcs.provider {
            cfg.repo_mut().set_provider(provider)?;
        }
        if let Some(kind) = &vcs.kind {
            cfg.repo_mut().set_type(kind)?;
        }
        if vcs.dir_template.is_some() || vcs.file_template.is_some() {
            let dir = vcs
                .dir_template
                .as_deref()
                .unwrap_or_else(|| cfg.repo.dir_template())
                .to_string();
            let file = vcs
                .file_template
                .as_deref()
                .unwrap_or_else(|| cfg.repo.file_template())
                .to_string();
            cfg.repo_mut().set_templates(&dir, &file)?;
        }

        cfg.set_probe_enabled(config.probe.enabled);
        cfg.set_probe_timeout(Duration::from_secs(config.probe.timeout_secs));

        Ok(cfg)
    }

    /// Mutable access to the VCS configuration during startup.
    pub fn repo_mut(&mut self) -> &mut VcsConfig {
        &mut self.repo
    }

    /// Change where requests for `/` are sent. An empty value disables the redirect.
    pub fn set_root_redirect(&mut self, target: &str) {
        self.root_redirect = if target.is_empty() {
            None
        } else {
            Some(target.to_string())
        };
    }

    /// Change the directory holding the `.well-known` folder.
    pub fn set_web_root(&mut self, path: &Path) -> Result<(), ConfigError> {
        let meta = std::fs::metadata(path).map_err(|e| ConfigError::WebRoot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !meta.is_dir() {
            return Err(ConfigError::WebRoot {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        self.web_root = path.to_path_buf();
        Ok(())
    }

    /// Enable or disable the upstream probe. Disabled means every module exists.
    pub fn set_probe_enabled(&mut self, enabled: bool) {
        self.probe_enabled = enabled;
    }

    pub fn set_probe_timeout(&mut self, timeout: Duration) {
        self.probe_timeout = timeout;
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn repo(&self) -> &VcsConfig {
        &self.repo
    }

    pub fn redirect(&self) -> &str {
        &self.redirect
    }

    pub fn root_redirect(&self) -> Option<&str> {
        self.root_redirect.as_deref()
    }

    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    pub fn probe_enabled(&self) -> bool {
        self.probe_enabled
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// True when browsers go to the repository host itself.
    ///
    /// Trailing slashes are ignored so an explicit redirect equal to the root behaves
    /// like the default.
    pub fn redirects_to_root(&self) -> bool {
        self.redirect.trim_end_matches('/') == self.repo.root().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::VanityConfig;
    use crate::vcs::VcsKind;

    #[test]
    fn test_new_requires_base_and_root() {
        assert!(matches!(ServerConfig::new("", "", ""), Err(ConfigError::MissingBase)));
        assert!(matches!(ServerConfig::new("", "root", ""), Err(ConfigError::MissingBase)));
        assert!(matches!(ServerConfig::new("base", "", ""), Err(ConfigError::MissingRoot)));
        assert!(matches!(ServerConfig::new("base", "///", ""), Err(ConfigError::MissingRoot)));
    }

    #[test]
    fn test_new_defaults() {
        let cfg = ServerConfig::new("acme.dev/", "https://github.com/acme", "").unwrap();

        assert_eq!(cfg.base(), "acme.dev");
        assert_eq!(cfg.repo().root(), "https://github.com/acme/");
        assert_eq!(cfg.redirect(), "https://github.com/acme/");
        assert_eq!(cfg.root_redirect(), Some("https://github.com/acme/"));
        assert_eq!(cfg.repo().kind(), VcsKind::Git);
        assert!(cfg.probe_enabled());
        assert_eq!(cfg.probe_timeout(), DEFAULT_PROBE_TIMEOUT);
        assert!(cfg.redirects_to_root());
    }

    #[test]
    fn test_redirect_trailing_slash_trimmed() {
        let cfg = ServerConfig::new("acme.dev", "https://github.com/acme/", "https://pkg.go.dev/acme.dev/")
            .unwrap();
        assert_eq!(cfg.redirect(), "https://pkg.go.dev/acme.dev");
        assert!(!cfg.redirects_to_root());
    }

    #[test]
    fn test_explicit_redirect_to_root() {
        let cfg = ServerConfig::new("acme.dev", "https://github.com/acme/", "https://github.com/acme/")
            .unwrap();
        assert!(cfg.redirects_to_root());
    }

    #[test]
    fn test_root_redirect_can_be_cleared() {
        let mut cfg = ServerConfig::new("acme.dev", "https://github.com/acme/", "").unwrap();
        cfg.set_root_redirect("https://acme.dev/about");
        assert_eq!(cfg.root_redirect(), Some("https://acme.dev/about"));

        cfg.set_root_redirect("");
        assert_eq!(cfg.root_redirect(), None);
    }

    #[test]
    fn test_from_file_root_redirect() {
        let mut file = VanityConfig::default();
        file.server.base = "acme.dev".into();
        file.server.root = "https://github.com/acme/".into();

        let cfg = ServerConfig::from_file(&file).unwrap();
        assert_eq!(cfg.root_redirect(), Some("https://github.com/acme/"));

        file.server.root_redirect = Some("https://acme.dev/about".into());
        let cfg = ServerConfig::from_file(&file).unwrap();
        assert_eq!(cfg.root_redirect(), Some("https://acme.dev/about"));

        file.server.root_redirect = Some(String::new());
        let cfg = ServerConfig::from_file(&file).unwrap();
        assert_eq!(cfg.root_redirect(), None);
    }

    #[test]
    fn test_web_root_must_be_directory() {
        let mut cfg = ServerConfig::new("base", "root", "").unwrap();

        assert!(cfg.set_web_root(Path::new("/non-existent")).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            cfg.set_web_root(file.path()),
            Err(ConfigError::WebRoot { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        cfg.set_web_root(dir.path()).unwrap();
        assert_eq!(cfg.web_root(), dir.path());
    }

    #[test]
    fn test_from_file_explicit_kind_overrides_provider() {
        let mut file = VanityConfig::default();
        file.server.base = "acme.dev".into();
        file.server.root = "https://hg.example.com/acme/".into();
        file.vcs.provider = Some("bitbucket".into());
        file.vcs.kind = Some("Mercurial".into());
        file.probe.enabled = false;
        file.probe.timeout_secs = 3;

        let cfg = ServerConfig::from_file(&file).unwrap();
        assert_eq!(cfg.repo().kind(), VcsKind::Mercurial);
        assert_eq!(cfg.repo().dir_template(), "src/master{/dir}");
        assert!(!cfg.probe_enabled());
        assert_eq!(cfg.probe_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_from_file_partial_template_override() {
        let mut file = VanityConfig::default();
        file.server.base = "acme.dev".into();
        file.server.root = "https://github.com/acme/".into();
        file.vcs.provider = Some("github".into());
        file.vcs.dir_template = Some("tree/main{/dir}".into());

        let cfg = ServerConfig::from_file(&file).unwrap();
        assert_eq!(cfg.repo().dir_template(), "tree/main{/dir}");
        assert_eq!(cfg.repo().file_template(), "blob/master{/dir}/{file}#L{line}");
    }

    #[test]
    fn test_from_file_unknown_provider() {
        let mut file = VanityConfig::default();
        file.server.base = "acme.dev".into();
        file.server.root = "https://github.com/acme/".into();
        file.vcs.provider = Some("launchpad".into());

        assert!(matches!(ServerConfig::from_file(&file), Err(ConfigError::Vcs(_))));
    }
}
