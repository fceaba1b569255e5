//! Human-readable status output.

use colored::Colorize;

use crate::pipeline::Step;

/// Where pipeline progress goes.
pub trait Reporter {
    /// A step finished; `message` is the confirmation line.
    fn step_succeeded(&mut self, step: Step, message: &str);

    /// A step failed and the run is halting.
    fn step_failed(&mut self, step: Step, message: &str);

    /// Anything else worth telling the user (cleanup, retries).
    fn notice(&mut self, message: &str);
}

/// Colored stdout/stderr output.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn step_succeeded(&mut self, _step: Step, message: &str) {
        println!("{}", message.green());
    }

    fn step_failed(&mut self, step: Step, message: &str) {
        eprintln!(
            "{} {}",
            format!("Error {}:", step.description()).red().bold(),
            message
        );
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message.yellow());
    }
}

/// Keeps every line in memory. Useful for tests and for embedding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Succeeded(Step, String),
    Failed(Step, String),
    Notice(String),
}

impl Reporter for RecordingReporter {
    fn step_succeeded(&mut self, step: Step, message: &str) {
        self.events
            .push(ReportEvent::Succeeded(step, message.to_string()));
    }

    fn step_failed(&mut self, step: Step, message: &str) {
        self.events.push(ReportEvent::Failed(step, message.to_string()));
    }

    fn notice(&mut self, message: &str) {
        self.events.push(ReportEvent::Notice(message.to_string()));
    }
}
