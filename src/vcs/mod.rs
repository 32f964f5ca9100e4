//! Version control provider configuration.
//!
//! # Responsibilities
//! - Hold the repository root under which every module lives
//! - Track the VCS kind advertised in the `go-import` tag
//! - Hold the optional directory/file URL templates for `go-source`
//!
//! # Design Decisions
//! - `set_provider` and `set_type`/`set_templates` write the same fields; last call wins
//! - Failed setters leave the previous state untouched
//! - Root always carries exactly one trailing slash so `root + module` is well formed

pub mod provider;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use provider::Provider;

/// Errors raised while configuring the VCS provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
    /// The VCS kind is not one of the supported systems.
    #[error("Unknown VCS type {0}")]
    UnknownVcsKind(String),

    /// The hosting provider has no built-in URL layout.
    #[error("Unknown provider {0}")]
    UnknownProvider(String),

    /// A non-empty file template without a `{file}` token.
    #[error("Invalid file template {0}")]
    InvalidTemplate(String),
}

/// Supported version control systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VcsKind {
    #[default]
    Git,
    Mercurial,
    Subversion,
    Bazaar,
    Fossil,
}

impl VcsKind {
    /// Identifier written into the `go-import` meta tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
            VcsKind::Subversion => "svn",
            VcsKind::Bazaar => "bzr",
            VcsKind::Fossil => "fossil",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VcsKind {
    type Err = VcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "git" => Ok(VcsKind::Git),
            "mercurial" => Ok(VcsKind::Mercurial),
            "subversion" => Ok(VcsKind::Subversion),
            "bazaar" => Ok(VcsKind::Bazaar),
            "fossil" => Ok(VcsKind::Fossil),
            _ => Err(VcsError::UnknownVcsKind(s.to_string())),
        }
    }
}

/// Location and layout of the repositories backing the vanity domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsConfig {
    root: String,
    kind: VcsKind,
    dir_template: String,
    file_template: String,
}

impl VcsConfig {
    /// Create a configuration rooted at `root` using git and no templates.
    pub fn new(root: &str) -> Self {
        let mut vcs = Self::default();
        vcs.set_root(root);
        vcs
    }

    /// Set the root under which the repositories are hosted, e.g.
    /// `https://github.com/acme/`.
    ///
    /// Trailing slashes collapse to exactly one. An empty root stays empty and is
    /// rejected when the server configuration is built.
    pub fn set_root(&mut self, root: &str) {
        self.root = normalize_root(root);
    }

    /// Set the VCS kind from its name (`git`, `mercurial`, `subversion`, `bazaar`,
    /// `fossil`), ignoring case and surrounding whitespace.
    pub fn set_type(&mut self, kind: &str) -> Result<(), VcsError> {
        self.kind = kind.parse()?;
        Ok(())
    }

    /// Apply the kind and templates of a well-known hosting provider.
    ///
    /// Overwrites any templates previously set with [`VcsConfig::set_templates`].
    pub fn set_provider(&mut self, name: &str) -> Result<(), VcsError> {
        let provider: Provider = name.parse()?;
        let (dir, file) = provider.templates();

        self.kind = provider.kind();
        self.dir_template = dir.to_string();
        self.file_template = file.to_string();
        Ok(())
    }

    /// Set raw directory and file templates for providers without a built-in layout.
    pub fn set_templates(&mut self, dir: &str, file: &str) -> Result<(), VcsError> {
        if !file.is_empty() && !file.contains("{file}") {
            return Err(VcsError::InvalidTemplate(file.to_string()));
        }

        self.dir_template = dir.to_string();
        self.file_template = file.to_string();
        Ok(())
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn kind(&self) -> VcsKind {
        self.kind
    }

    pub fn dir_template(&self) -> &str {
        &self.dir_template
    }

    pub fn file_template(&self) -> &str {
        &self.file_template
    }

    /// True when both templates are set and a `go-source` tag can be rendered.
    pub fn has_source_templates(&self) -> bool {
        !self.dir_template.is_empty() && !self.file_template.is_empty()
    }

    /// Upstream URL of the repository holding `module`.
    pub fn upstream_url(&self, module: &str) -> String {
        format!("{}{}", self.root, module)
    }
}

fn normalize_root(root: &str) -> String {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{}/", trimmed)
}
