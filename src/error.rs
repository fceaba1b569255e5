//! Failures a pipeline step can report.

use thiserror::Error;

/// The hosting service rejected a call, or no response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An external process exited non-zero, or could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct ProcessError {
    /// `None` when the process never ran or was killed by a signal.
    pub exit_code: Option<i32>,
    pub output: String,
}

impl ProcessError {
    fn describe(&self) -> String {
        let output = self.output.trim();
        match self.exit_code {
            Some(code) if output.is_empty() => format!("process exited with status {}", code),
            Some(code) => format!("process exited with status {}: {}", code, output),
            None if output.is_empty() => "process did not complete".to_string(),
            None => output.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_display() {
        let err = ProcessError {
            exit_code: Some(128),
            output: "fatal: destination path 'demo' already exists\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "process exited with status 128: fatal: destination path 'demo' already exists"
        );

        let err = ProcessError {
            exit_code: Some(1),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "process exited with status 1");
    }

    #[test]
    fn test_process_error_without_exit_code() {
        let err = ProcessError {
            exit_code: None,
            output: "  No such file or directory (os error 2)\n".to_string(),
        };
        assert_eq!(err.to_string(), "No such file or directory (os error 2)");

        let err = ProcessError {
            exit_code: None,
            output: String::new(),
        };
        assert_eq!(err.to_string(), "process did not complete");

        // Boxes like any other std error
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), "process did not complete");
    }

    #[test]
    fn test_step_error_is_transparent() {
        let err: StepError = RemoteError::new("Not Found").into();
        assert_eq!(err.to_string(), "Not Found");
    }
}
