//! Preflight checks - make sure the external tools the pipeline shells out
//! to are on PATH.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCheck {
    pub name: String,
    /// Why the pipeline needs it
    pub purpose: &'static str,
    /// Resolved location, `None` when not found
    pub path: Option<PathBuf>,
}

impl ToolCheck {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Look up git and the configured install program.
pub fn check_tools(config: &Config) -> Vec<ToolCheck> {
    vec![
        locate("git", "clone the fork"),
        locate(config.install_program(), "install dependencies"),
    ]
}

pub fn all_found(checks: &[ToolCheck]) -> bool {
    checks.iter().all(ToolCheck::found)
}

fn locate(name: &str, purpose: &'static str) -> ToolCheck {
    ToolCheck {
        name: name.to_string(),
        purpose,
        path: which::which(name).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reported() {
        let config = Config {
            install_command: vec!["forkstrap-no-such-installer".to_string()],
            ..Default::default()
        };
        let checks = check_tools(&config);

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].name, "git");
        assert_eq!(checks[1].name, "forkstrap-no-such-installer");
        assert!(!checks[1].found());
        assert!(!all_found(&checks));
    }

    #[cfg(unix)]
    #[test]
    fn test_present_tool_resolves() {
        let config = Config {
            install_command: vec!["sh".to_string()],
            ..Default::default()
        };
        let checks = check_tools(&config);
        assert!(checks[1].found());
    }
}
