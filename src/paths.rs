//! Single source of truth for forkstrap's filesystem layout.
//!
//! No I/O here, just where things live.
//!
//! ```text
//! ~/.forkstrap/
//! └── config.toml              # User config
//!
//! <clone path>/
//! └── .env                     # Written for the cloned project
//! ```

use std::path::{Path, PathBuf};

/// Name of the environment file written into the clone.
pub const ENV_FILE_NAME: &str = ".env";

/// User's forkstrap home directory: `~/.forkstrap/`
pub fn forkstrap_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".forkstrap")
}

/// User config file: `~/.forkstrap/config.toml`
pub fn config_path() -> PathBuf {
    forkstrap_home().join("config.toml")
}

/// Environment file for a cloned project: `{clone}/.env`
pub fn env_file(clone_path: &Path) -> PathBuf {
    clone_path.join(ENV_FILE_NAME)
}
