pub mod config;
pub mod envfile;
pub mod error;
pub mod forge;
pub mod local;
pub mod paths;
pub mod pipeline;
pub mod preflight;
pub mod prompt;
pub mod report;
pub mod request;

// Re-export commonly used types
pub use config::Config;
pub use error::{ProcessError, RemoteError, StepError};
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutcome, RetryPolicy, Step};
pub use request::{EnvVars, ForkResult, ProvisioningRequest, RequestBuilder};
