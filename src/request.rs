//! Provisioning request and the builder that accumulates it.
//!
//! The request is assembled one prompt at a time through [`RequestBuilder`]
//! and frozen into a [`ProvisioningRequest`] once every answer is in. After
//! that handoff nothing mutates it.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

/// Ordered `KEY=VALUE` pairs destined for the cloned project's `.env`.
///
/// Keys keep the position of their first insertion. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    entries: Vec<(String, String)>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = EnvVars::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// Everything the pipeline needs, collected before any side effect happens.
///
/// Holds the access token, so it is never serialized and its `Debug` output
/// redacts the token. The token buffer is zeroed on drop.
#[derive(Clone)]
pub struct ProvisioningRequest {
    pub username: String,
    access_token: Zeroizing<String>,
    pub source_owner: String,
    pub source_repo: String,
    pub target_owner: String,
    pub target_repo: String,
    pub clone_path: PathBuf,
    pub env_variables: EnvVars,
}

impl ProvisioningRequest {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn clone_path(&self) -> &Path {
        &self.clone_path
    }

    /// `owner/repo` of the repository being forked.
    pub fn source_full_name(&self) -> String {
        format!("{}/{}", self.source_owner, self.source_repo)
    }
}

impl fmt::Debug for ProvisioningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningRequest")
            .field("username", &self.username)
            .field("access_token", &"<redacted>")
            .field("source_owner", &self.source_owner)
            .field("source_repo", &self.source_repo)
            .field("target_owner", &self.target_owner)
            .field("target_repo", &self.target_repo)
            .field("clone_path", &self.clone_path)
            .field("env_variables", &self.env_variables.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Accumulates answers one at a time.
///
/// Unset fields finalize as empty strings; no validation happens here.
#[derive(Default)]
pub struct RequestBuilder {
    username: String,
    access_token: Zeroizing<String>,
    source_owner: String,
    source_repo: String,
    target_owner: String,
    target_repo: String,
    clone_path: String,
    env_variables: EnvVars,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = value.into();
        self
    }

    pub fn access_token(mut self, value: impl Into<String>) -> Self {
        self.access_token = Zeroizing::new(value.into());
        self
    }

    pub fn source_owner(mut self, value: impl Into<String>) -> Self {
        self.source_owner = value.into();
        self
    }

    pub fn source_repo(mut self, value: impl Into<String>) -> Self {
        self.source_repo = value.into();
        self
    }

    pub fn target_owner(mut self, value: impl Into<String>) -> Self {
        self.target_owner = value.into();
        self
    }

    pub fn target_repo(mut self, value: impl Into<String>) -> Self {
        self.target_repo = value.into();
        self
    }

    pub fn clone_path(mut self, value: impl Into<String>) -> Self {
        self.clone_path = value.into();
        self
    }

    pub fn env_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_variables.insert(key, value);
        self
    }

    /// Freeze the collected answers.
    ///
    /// The clone path goes through shell-style expansion (`~`, `$VAR`). An
    /// expansion error (unknown variable) leaves the path as typed.
    pub fn build(self) -> ProvisioningRequest {
        let clone_path = match shellexpand::full(&self.clone_path) {
            Ok(expanded) => PathBuf::from(expanded.into_owned()),
            Err(e) => {
                log::debug!("clone path left unexpanded: {}", e);
                PathBuf::from(&self.clone_path)
            }
        };

        ProvisioningRequest {
            username: self.username,
            access_token: self.access_token,
            source_owner: self.source_owner,
            source_repo: self.source_repo,
            target_owner: self.target_owner,
            target_repo: self.target_repo,
            clone_path,
            env_variables: self.env_variables,
        }
    }
}

/// What the fork step hands to the next steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkResult {
    /// `owner/repo` of the newly created fork.
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_vars_preserve_insertion_order() {
        let mut vars = EnvVars::new();
        vars.insert("PORT", "8080");
        vars.insert("API_KEY", "abc123");
        vars.insert("DEBUG", "1");

        let keys: Vec<_> = vars.keys().collect();
        assert_eq!(keys, vec!["PORT", "API_KEY", "DEBUG"]);
    }

    #[test]
    fn test_env_vars_reinsert_keeps_position() {
        let mut vars = EnvVars::new();
        vars.insert("A", "1");
        vars.insert("B", "2");
        vars.insert("A", "3");

        let pairs: Vec<_> = vars.iter().collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_debug_redacts_token() {
        let request = RequestBuilder::new()
            .username("octocat")
            .access_token("ghp_supersecret")
            .env_variable("API_KEY", "value-not-shown")
            .build();

        let debug = format!("{:?}", request);
        assert!(!debug.contains("ghp_supersecret"));
        assert!(!debug.contains("value-not-shown"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("API_KEY"));
        assert_eq!(request.access_token(), "ghp_supersecret");
    }

    #[test]
    fn test_build_keeps_plain_path() {
        let request = RequestBuilder::new().clone_path("/tmp/demo").build();
        assert_eq!(request.clone_path(), Path::new("/tmp/demo"));
    }

    #[test]
    fn test_build_expands_home() {
        let request = RequestBuilder::new().clone_path("~/demo").build();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(request.clone_path(), home.join("demo"));
        }
    }

    #[test]
    fn test_build_unknown_variable_left_as_typed() {
        let request = RequestBuilder::new()
            .clone_path("$FORKSTRAP_TEST_SURELY_UNSET_VAR/demo")
            .build();
        assert_eq!(
            request.clone_path(),
            Path::new("$FORKSTRAP_TEST_SURELY_UNSET_VAR/demo")
        );
    }

    #[test]
    fn test_source_full_name() {
        let request = RequestBuilder::new()
            .source_owner("rust-lang")
            .source_repo("rustlings")
            .build();
        assert_eq!(request.source_full_name(), "rust-lang/rustlings");
    }
}
