//! The provisioning pipeline.
//!
//! Five steps, strictly in order, stopping at the first failure:
//!
//! ```text
//! Forking → Reassigning → Cloning → WritingEnv → Installing → Done
//!    └──────────┴────────────┴──────────┴────────────┴──→ Failed
//! ```
//!
//! Nothing is rolled back unless `cleanup_on_failure` is set, in which case
//! the fork is deleted once a later step fails.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::error::StepError;
use crate::forge::{self, RepoHost};
use crate::local::LocalRunner;
use crate::report::Reporter;
use crate::request::{ForkResult, ProvisioningRequest};

/// A pipeline step; the unit of failure attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Forking,
    Reassigning,
    Cloning,
    WritingEnv,
    Installing,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 5] = [
        Step::Forking,
        Step::Reassigning,
        Step::Cloning,
        Step::WritingEnv,
        Step::Installing,
    ];

    /// Lowercase phrase used in error lines: "Error <description>: ..."
    pub fn description(&self) -> &'static str {
        match self {
            Step::Forking => "forking repository",
            Step::Reassigning => "transferring repository ownership",
            Step::Cloning => "cloning repository",
            Step::WritingEnv => "writing .env file",
            Step::Installing => "installing dependencies",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Forking => "Forking",
            Step::Reassigning => "Reassigning",
            Step::Cloning => "Cloning",
            Step::WritingEnv => "WritingEnv",
            Step::Installing => "Installing",
        };
        f.write_str(name)
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success,
    Failed { step: Step, message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success)
    }

    pub fn failed_step(&self) -> Option<Step> {
        match self {
            PipelineOutcome::Success => None,
            PipelineOutcome::Failed { step, .. } => Some(*step),
        }
    }

    /// Process exit status: 0 on success, 1 on failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineOutcome::Success => 0,
            PipelineOutcome::Failed { .. } => 1,
        }
    }
}

/// Bounded retry for a single step.
///
/// The default is one attempt with no delay, i.e. no retry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `attempts` counts the first try; values below 1 are treated as 1.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Call `op` until it succeeds or attempts run out, sleeping `delay`
    /// between tries. Returns the last error.
    pub fn run<T, E, F>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts => {
                    log::debug!("attempt {}/{} failed: {}", attempt, self.attempts, e);
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// Knobs that shape a run without changing its step order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Host in the clone URL `https://<clone_host>/<owner>/<repo>.git`
    pub clone_host: String,
    pub reassign_retry: RetryPolicy,
    pub cleanup_on_failure: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            clone_host: "github.com".to_string(),
            reassign_retry: RetryPolicy::once(),
            cleanup_on_failure: false,
        }
    }
}

/// Drives a [`RepoHost`] and a [`LocalRunner`] through the five steps.
pub struct Pipeline<'a, H: RepoHost, L: LocalRunner> {
    host: &'a H,
    local: &'a L,
    options: PipelineOptions,
}

impl<'a, H: RepoHost, L: LocalRunner> Pipeline<'a, H, L> {
    pub fn new(host: &'a H, local: &'a L, options: PipelineOptions) -> Self {
        Self {
            host,
            local,
            options,
        }
    }

    /// Execute every step, reporting as it goes.
    pub fn run(&self, request: &ProvisioningRequest, reporter: &mut dyn Reporter) -> PipelineOutcome {
        let mut created: Option<String> = None;

        match self.execute(request, reporter, &mut created) {
            Ok(()) => PipelineOutcome::Success,
            Err((step, err)) => {
                let message = err.to_string();
                log::debug!("step {} failed: {:?}", step, err);
                reporter.step_failed(step, &message);

                if let Some(full_name) = created.filter(|_| self.options.cleanup_on_failure) {
                    self.cleanup(&full_name, reporter);
                }

                PipelineOutcome::Failed { step, message }
            }
        }
    }

    /// Change the fork's owner, honouring the retry policy.
    ///
    /// Exposed on its own so callers can drive the owner change separately
    /// from the rest of the run.
    pub fn reassign(&self, fork: &ForkResult, target_owner: &str) -> Result<(), StepError> {
        self.options
            .reassign_retry
            .run(|attempt| {
                if attempt > 1 {
                    log::info!(
                        "retrying owner change for {} (attempt {})",
                        fork.full_name,
                        attempt
                    );
                }
                self.host.reassign_owner(&fork.full_name, target_owner)
            })
            .map_err(StepError::from)
    }

    fn execute(
        &self,
        request: &ProvisioningRequest,
        reporter: &mut dyn Reporter,
        created: &mut Option<String>,
    ) -> Result<(), (Step, StepError)> {
        let fork = self
            .host
            .fork(&request.source_owner, &request.source_repo)
            .map_err(|e| (Step::Forking, e.into()))?;
        *created = Some(fork.full_name.clone());
        reporter.step_succeeded(Step::Forking, "Forked repository created successfully.");

        self.reassign(&fork, &request.target_owner)
            .map_err(|e| (Step::Reassigning, e))?;
        *created = Some(transferred_name(&fork.full_name, &request.target_owner));
        reporter.step_succeeded(
            Step::Reassigning,
            &format!("Repository ownership transferred to {}.", request.target_owner),
        );

        let url = forge::clone_url(&self.options.clone_host, &fork.full_name);
        self.local
            .clone_repository(&url, request.clone_path())
            .map_err(|e| (Step::Cloning, e))?;
        reporter.step_succeeded(Step::Cloning, "Repository cloned successfully.");

        self.local
            .write_env_file(request.clone_path(), &request.env_variables)
            .map_err(|e| (Step::WritingEnv, e))?;
        reporter.step_succeeded(Step::WritingEnv, ".env file created successfully.");

        self.local
            .install_dependencies(request.clone_path())
            .map_err(|e| (Step::Installing, e))?;
        reporter.step_succeeded(Step::Installing, "Dependencies installed successfully.");

        Ok(())
    }

    fn cleanup(&self, full_name: &str, reporter: &mut dyn Reporter) {
        match self.host.delete_repository(full_name) {
            Ok(()) => reporter.notice(&format!("Deleted fork {} after failure.", full_name)),
            Err(e) => reporter.notice(&format!(
                "Could not delete fork {}: {}. Remove it manually.",
                full_name, e
            )),
        }
    }
}

/// Name of the fork once it belongs to `target_owner`.
fn transferred_name(full_name: &str, target_owner: &str) -> String {
    let repo = full_name.rsplit('/').next().unwrap_or(full_name);
    format!("{}/{}", target_owner, repo)
}
