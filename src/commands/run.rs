//! Interactive provisioning: collect answers, then run the pipeline.

use anyhow::Result;
use colored::Colorize;

use forkstrap::forge::github::GitHubClient;
use forkstrap::forge::{Credentials, RepoHost};
use forkstrap::local::{LocalRunner, SystemRunner};
use forkstrap::prompt::{InputCollector, LineSource, PromptError, PromptIo};
use forkstrap::report::{ConsoleReporter, Reporter};
use forkstrap::{Config, Pipeline, PipelineOptions, ProvisioningRequest, RetryPolicy};

use super::ConfigArgs;

/// Exit status when input ends before every question is answered.
pub const INPUT_CLOSED_EXIT: i32 = 2;

pub fn execute(args: ConfigArgs) -> Result<i32> {
    let config = args.resolve()?;
    let local = SystemRunner::new(config.install_command.clone());

    provision(
        PromptIo::stdio(),
        |request| {
            GitHubClient::new(
                config.api_url.as_str(),
                Credentials::new(request.username.as_str(), request.access_token()),
                config.timeout(),
            )
        },
        &local,
        options(&config),
        &mut ConsoleReporter,
    )
}

/// Collect a request from `source`, then run the pipeline against the host
/// `connect` builds from it.
///
/// `connect` is only called once every answer is in, so closed input never
/// reaches the host.
fn provision<S, H, L, F>(
    source: S,
    connect: F,
    local: &L,
    options: PipelineOptions,
    reporter: &mut dyn Reporter,
) -> Result<i32>
where
    S: LineSource,
    H: RepoHost,
    L: LocalRunner,
    F: FnOnce(&ProvisioningRequest) -> Result<H>,
{
    let mut collector = InputCollector::new(source);
    let request = match collector.collect() {
        Ok(request) => request,
        Err(PromptError::InputClosed) => {
            eprintln!("\n{}", "Input closed; nothing was changed.".red());
            return Ok(INPUT_CLOSED_EXIT);
        }
        Err(e) => return Err(e.into()),
    };
    println!();

    let host = connect(&request)?;
    let pipeline = Pipeline::new(&host, local, options);
    let outcome = pipeline.run(&request, reporter);

    Ok(outcome.exit_code())
}

fn options(config: &Config) -> PipelineOptions {
    PipelineOptions {
        clone_host: config.clone_host.clone(),
        reassign_retry: RetryPolicy::new(config.reassign.attempts, config.reassign_delay()),
        cleanup_on_failure: config.cleanup_on_failure,
    }
}
