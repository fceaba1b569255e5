//! User configuration stored in `~/.forkstrap/config.toml`.
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! `FORKSTRAP_*` environment variables. Command-line flags are applied on top
//! by the binary.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::paths;

pub const ENV_API_URL: &str = "FORKSTRAP_API_URL";
pub const ENV_CLONE_HOST: &str = "FORKSTRAP_CLONE_HOST";
pub const ENV_INSTALL_COMMAND: &str = "FORKSTRAP_INSTALL_COMMAND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// REST API base, e.g. `https://api.github.com`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Host used to build the clone URL `https://<host>/<owner>/<repo>.git`
    #[serde(default = "default_clone_host")]
    pub clone_host: String,
    /// Program and arguments run inside the clone to install dependencies
    #[serde(default = "default_install_command")]
    pub install_command: Vec<String>,
    /// Delete the fork when a later step fails
    #[serde(default)]
    pub cleanup_on_failure: bool,
    /// HTTP request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub reassign: ReassignSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReassignSection {
    /// Total tries for the owner change, including the first
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Pause between tries
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_clone_host() -> String {
    "github.com".to_string()
}
fn default_install_command() -> Vec<String> {
    vec!["npm".to_string(), "install".to_string()]
}
fn default_attempts() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            clone_host: default_clone_host(),
            install_command: default_install_command(),
            cleanup_on_failure: false,
            timeout_secs: None,
            reassign: ReassignSection::default(),
        }
    }
}

impl Default for ReassignSection {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            delay_ms: 0,
        }
    }
}

impl Config {
    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FORKSTRAP_*` overrides, looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(host) = lookup(ENV_CLONE_HOST).filter(|v| !v.trim().is_empty()) {
            self.clone_host = host.trim().to_string();
        }
        if let Some(cmd) = lookup(ENV_INSTALL_COMMAND) {
            self.install_command = parse_command(&cmd)
                .with_context(|| format!("Invalid {}", ENV_INSTALL_COMMAND))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.install_command.is_empty() || self.install_command[0].trim().is_empty() {
            bail!("install_command must name a program");
        }
        if self.reassign.attempts == 0 {
            bail!("reassign.attempts must be at least 1");
        }
        if self.clone_host.trim().is_empty() {
            bail!("clone_host must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn reassign_delay(&self) -> Duration {
        Duration::from_millis(self.reassign.delay_ms)
    }

    /// Program name of the install command, for PATH checks.
    pub fn install_program(&self) -> &str {
        self.install_command
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Split a command line on whitespace. No quoting support.
pub fn parse_command(raw: &str) -> Result<Vec<String>> {
    let parts: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        bail!("command is empty");
    }
    Ok(parts)
}
