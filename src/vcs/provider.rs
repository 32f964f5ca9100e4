//! Well-known hosting providers and their source browsing layout.

use std::str::FromStr;

use super::{VcsError, VcsKind};

/// A hosting platform with a conventional URL layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
    Gogs,
    Gitea,
}

impl Provider {
    /// VCS kind served by the provider.
    ///
    /// Bitbucket is git-only since its mercurial hosting was retired.
    pub fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    /// Directory and file templates, relative to the repository URL.
    pub fn templates(&self) -> (&'static str, &'static str) {
        match self {
            Provider::GitHub | Provider::GitLab => {
                ("tree/master{/dir}", "blob/master{/dir}/{file}#L{line}")
            }
            Provider::Bitbucket | Provider::Gogs | Provider::Gitea => {
                ("src/master{/dir}", "src/master{/dir}/{file}#L{line}")
            }
        }
    }
}

impl FromStr for Provider {
    type Err = VcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(Provider::GitHub),
            "gitlab" => Ok(Provider::GitLab),
            "bitbucket" => Ok(Provider::Bitbucket),
            "gogs" => Ok(Provider::Gogs),
            "gitea" => Ok(Provider::Gitea),
            _ => Err(VcsError::UnknownProvider(s.to_string())),
        }
    }
}
