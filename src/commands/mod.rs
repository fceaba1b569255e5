pub mod config;
pub mod doctor;
pub mod run;

use anyhow::{Context, Result};
use clap::Args;

use forkstrap::config::{parse_command, Config};

/// Overrides for values from `~/.forkstrap/config.toml`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// REST API base URL (default https://api.github.com)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Host used in the clone URL (default github.com)
    #[arg(long, value_name = "HOST")]
    pub clone_host: Option<String>,

    /// Command run inside the clone to install dependencies (default "npm install")
    #[arg(long, value_name = "CMD")]
    pub install_command: Option<String>,

    /// Delete the fork if a later step fails
    #[arg(long, conflicts_with = "no_cleanup_on_failure")]
    pub cleanup_on_failure: bool,

    /// Keep the fork when a later step fails, even if the config enables cleanup
    #[arg(long)]
    pub no_cleanup_on_failure: bool,

    /// Total tries for the owner change
    #[arg(long, value_name = "N")]
    pub reassign_attempts: Option<u32>,

    /// Pause between owner-change tries, in milliseconds
    #[arg(long, value_name = "MS")]
    pub reassign_delay_ms: Option<u64>,

    /// HTTP request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConfigArgs {
    /// Load file + environment config, then apply these flags on top.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = Config::load()?;
        self.apply(&mut config)?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(host) = &self.clone_host {
            config.clone_host = host.clone();
        }
        if let Some(cmd) = &self.install_command {
            config.install_command = parse_command(cmd).context("Invalid --install-command")?;
        }
        if self.cleanup_on_failure {
            config.cleanup_on_failure = true;
        }
        if self.no_cleanup_on_failure {
            config.cleanup_on_failure = false;
        }
        if let Some(attempts) = self.reassign_attempts {
            config.reassign.attempts = attempts;
        }
        if let Some(delay) = self.reassign_delay_ms {
            config.reassign.delay_ms = delay;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = Some(secs);
        }
        config.validate()
    }
}
