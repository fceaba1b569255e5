//! Remote repository operations.
//!
//! "Do X": Fork a repository and hand it to a new owner.
//!
//! [`RepoHost`] is the seam between the pipeline and the hosting service.
//! [`github::GitHubClient`] talks to a GitHub-compatible REST API; tests
//! substitute their own implementations.
//!
//! # Example
//!
//! ```ignore
//! use forkstrap::forge::{github::GitHubClient, Credentials, RepoHost};
//!
//! let host = GitHubClient::new("https://api.github.com", Credentials::new(user, token), None)?;
//! let fork = host.fork("rust-lang", "rustlings")?;
//! host.reassign_owner(&fork.full_name, "my-org")?;
//! ```

pub mod github;

use zeroize::Zeroizing;

use crate::error::RemoteError;
use crate::request::ForkResult;

/// Write operations on a repository host.
pub trait RepoHost {
    /// Ask the host to fork `owner/repo` into the authenticated account.
    ///
    /// Hosts usually create forks asynchronously: the returned name may not
    /// be usable by follow-up calls for a short while.
    fn fork(&self, owner: &str, repo: &str) -> Result<ForkResult, RemoteError>;

    /// Change the owner of `full_name` to `target_owner`.
    fn reassign_owner(&self, full_name: &str, target_owner: &str) -> Result<(), RemoteError>;

    /// Delete `full_name`. Only used for failure cleanup.
    fn delete_repository(&self, full_name: &str) -> Result<(), RemoteError>;
}

/// Basic-auth credentials, passed through unchanged.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    token: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: Zeroizing::new(token.into()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// HTTPS clone URL for a repository: `https://<host>/<owner>/<repo>.git`
pub fn clone_url(host: &str, full_name: &str) -> String {
    format!("https://{}/{}.git", host.trim_end_matches('/'), full_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_url() {
        assert_eq!(
            clone_url("github.com", "octocat/hello-world"),
            "https://github.com/octocat/hello-world.git"
        );
        assert_eq!(
            clone_url("git.example.com/", "team/app"),
            "https://git.example.com/team/app.git"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new("octocat", "ghp_secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("ghp_secret"));
        assert_eq!(creds.token(), "ghp_secret");
    }
}
