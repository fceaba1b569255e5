//! Local side effects: git clone, `.env` write, dependency install.
//!
//! Every call blocks until the child process or filesystem call finishes.
//! Nothing here can be cancelled mid-flight.

use std::path::Path;
use std::process::{Command, Output};

use crate::envfile;
use crate::error::{ProcessError, StepError};
use crate::request::EnvVars;

/// Local operations the pipeline drives.
pub trait LocalRunner {
    /// Clone `remote_url` into `destination`.
    fn clone_repository(&self, remote_url: &str, destination: &Path) -> Result<(), StepError>;

    /// Write `variables` to `<destination>/.env`, replacing any existing file.
    fn write_env_file(&self, destination: &Path, variables: &EnvVars) -> Result<(), StepError>;

    /// Run the install command with `destination` as working directory.
    fn install_dependencies(&self, destination: &Path) -> Result<(), StepError>;
}

/// Runs real processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    git_program: String,
    install_command: Vec<String>,
}

impl SystemRunner {
    /// `install_command` is program followed by arguments, e.g. `["npm", "install"]`.
    pub fn new(install_command: Vec<String>) -> Self {
        Self {
            git_program: "git".to_string(),
            install_command,
        }
    }

    /// Use a different git executable.
    pub fn with_git(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(vec!["npm".to_string(), "install".to_string()])
    }
}

impl LocalRunner for SystemRunner {
    fn clone_repository(&self, remote_url: &str, destination: &Path) -> Result<(), StepError> {
        let mut cmd = Command::new(&self.git_program);
        cmd.arg("clone").arg(remote_url).arg(destination);
        run(cmd)
    }

    fn write_env_file(&self, destination: &Path, variables: &EnvVars) -> Result<(), StepError> {
        envfile::write(destination, variables)?;
        Ok(())
    }

    fn install_dependencies(&self, destination: &Path) -> Result<(), StepError> {
        let Some((program, args)) = self.install_command.split_first() else {
            return Err(ProcessError {
                exit_code: None,
                output: "no install command configured".to_string(),
            }
            .into());
        };

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(destination);
        run(cmd)
    }
}

fn run(mut cmd: Command) -> Result<(), StepError> {
    log::debug!("running {:?}", cmd);

    let output = cmd.output().map_err(|e| ProcessError {
        exit_code: None,
        output: format!("failed to start {:?}: {}", cmd.get_program(), e),
    })?;

    check_status(output)
}

fn check_status(output: Output) -> Result<(), StepError> {
    if output.status.success() {
        return Ok(());
    }

    // git and npm report failures on stderr; fall back to stdout for tools that don't
    let text = if output.stderr.iter().all(u8::is_ascii_whitespace) {
        String::from_utf8_lossy(&output.stdout)
    } else {
        String::from_utf8_lossy(&output.stderr)
    };

    Err(ProcessError {
        exit_code: output.status.code(),
        output: text.trim().to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn shell(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_write_env_file() {
        let dir = TempDir::new().unwrap();
        let vars: EnvVars = [("API_KEY", "abc123"), ("PORT", "8080")]
            .into_iter()
            .collect();

        SystemRunner::default()
            .write_env_file(dir.path(), &vars)
            .unwrap();

        let content = fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(content, "API_KEY=abc123\nPORT=8080\n");
    }

    #[test]
    fn test_write_env_file_io_error() {
        let dir = TempDir::new().unwrap();
        let err = SystemRunner::default()
            .write_env_file(&dir.path().join("missing"), &EnvVars::new())
            .unwrap_err();
        assert!(matches!(err, StepError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_runs_in_destination() {
        let dir = TempDir::new().unwrap();
        let runner = SystemRunner::new(shell("touch installed.marker"));

        runner.install_dependencies(dir.path()).unwrap();
        assert!(dir.path().join("installed.marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_failure_captures_exit_code_and_stderr() {
        let dir = TempDir::new().unwrap();
        let runner = SystemRunner::new(shell("echo 'npm ERR! missing script' >&2; exit 3"));

        match runner.install_dependencies(dir.path()).unwrap_err() {
            StepError::Process(err) => {
                assert_eq!(err.exit_code, Some(3));
                assert_eq!(err.output, "npm ERR! missing script");
            }
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_falls_back_to_stdout() {
        let dir = TempDir::new().unwrap();
        let runner = SystemRunner::new(shell("echo only-stdout; exit 1"));

        match runner.install_dependencies(dir.path()).unwrap_err() {
            StepError::Process(err) => assert_eq!(err.output, "only-stdout"),
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_process_error() {
        let dir = TempDir::new().unwrap();
        let runner = SystemRunner::new(vec!["forkstrap-no-such-installer".to_string()]);

        match runner.install_dependencies(dir.path()).unwrap_err() {
            StepError::Process(err) => {
                assert_eq!(err.exit_code, None);
                assert!(err.output.contains("forkstrap-no-such-installer"));
            }
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_clone_failure_reports_exit_code() {
        let runner = SystemRunner::default().with_git("false");
        let err = runner
            .clone_repository("https://github.com/a/b.git", Path::new("demo"))
            .unwrap_err();

        match err {
            StepError::Process(err) => assert_eq!(err.exit_code, Some(1)),
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_install_command() {
        let dir = TempDir::new().unwrap();
        let err = SystemRunner::new(vec![])
            .install_dependencies(dir.path())
            .unwrap_err();
        assert!(matches!(err, StepError::Process(_)));
    }
}
