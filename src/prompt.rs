//! Interactive collection of a [`ProvisioningRequest`].
//!
//! Prompts run strictly in order and every answer is trimmed. Nothing is
//! validated: empty answers flow through to the pipeline as-is. The only
//! empty answer with meaning is an empty variable key, which ends the
//! variable loop.

use std::io::{self, BufRead, BufReader, IsTerminal, Stdin, Stdout, Write};

use colored::Colorize;
use console::Term;
use thiserror::Error;

use crate::request::{ProvisioningRequest, RequestBuilder};

pub const BANNER: &str = "=== Repository Fork and Setup CLI ===\n";
pub const USERNAME: &str = "Enter your GitHub username: ";
pub const ACCESS_TOKEN: &str = "Enter your GitHub access token: ";
pub const SOURCE_OWNER: &str = "Enter the source repository owner: ";
pub const SOURCE_REPO: &str = "Enter the source repository name: ";
pub const TARGET_OWNER: &str = "Enter the target repository owner: ";
pub const TARGET_REPO: &str = "Enter the target repository name: ";
pub const CLONE_PATH: &str = "Enter the path to clone the repository to: ";
pub const ENV_HEADER: &str = "\nEnter the environment variables:";
pub const ENV_KEY: &str = "Variable key (leave empty to finish): ";

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before every question was answered.
    #[error("input closed before all answers were collected")]
    InputClosed,

    #[error("failed to read answer: {0}")]
    Io(#[from] io::Error),
}

/// A line-oriented question/answer channel.
pub trait LineSource {
    /// Show `text` as a heading. No answer expected.
    fn heading(&mut self, text: &str) -> io::Result<()>;

    /// Ask and return the raw answer, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Like [`read_line`](Self::read_line), without echoing when possible.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }
}

/// Reads answers from any `BufRead`, writes prompts to any `Write`.
pub struct PromptIo<R, W> {
    reader: R,
    writer: W,
    secure: Option<Term>,
}

impl<R: BufRead, W: Write> PromptIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            secure: None,
        }
    }
}

impl PromptIo<BufReader<Stdin>, Stdout> {
    /// Standard input/output. Secrets are read without echo only when both
    /// stdin and stdout are terminals; piped answers are always read in order
    /// from stdin.
    ///
    /// Stdin is not locked for the session: the masked read goes through
    /// `console`, which reads stdin itself.
    pub fn stdio() -> Self {
        let term = Term::stdout();
        let masked = masked_input(io::stdin().is_terminal(), term.is_term());
        Self {
            reader: BufReader::new(io::stdin()),
            writer: io::stdout(),
            secure: masked.then_some(term),
        }
    }
}

/// `console` reads masked input from the controlling tty when stdin is not a
/// terminal, which would skip the piped answer.
fn masked_input(stdin_is_term: bool, stdout_is_term: bool) -> bool {
    stdin_is_term && stdout_is_term
}

/// Map a masked read to the `read_line` contract. `console` reports an
/// interrupted read as `UnexpectedEof`; that ends the input like EOF does.
fn masked_answer(result: io::Result<String>) -> io::Result<Option<String>> {
    match result {
        Ok(line) => Ok(Some(line)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

impl<R: BufRead, W: Write> LineSource for PromptIo<R, W> {
    fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text.blue())?;
        self.writer.flush()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt.cyan())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match &self.secure {
            Some(term) => {
                term.write_str(&prompt.cyan().to_string())?;
                masked_answer(term.read_secure_line())
            }
            None => self.read_line(prompt),
        }
    }
}

/// Runs the question sequence against a [`LineSource`].
pub struct InputCollector<S: LineSource> {
    source: S,
}

impl<S: LineSource> InputCollector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Ask every question and freeze the answers.
    pub fn collect(&mut self) -> Result<ProvisioningRequest, PromptError> {
        self.source.heading(BANNER)?;

        let builder = RequestBuilder::new()
            .username(self.ask(USERNAME)?)
            .access_token(self.ask_secret(ACCESS_TOKEN)?)
            .source_owner(self.ask(SOURCE_OWNER)?)
            .source_repo(self.ask(SOURCE_REPO)?)
            .target_owner(self.ask(TARGET_OWNER)?)
            .target_repo(self.ask(TARGET_REPO)?)
            .clone_path(self.ask(CLONE_PATH)?);

        self.source.heading(ENV_HEADER)?;
        let builder = self.collect_env(builder)?;

        Ok(builder.build())
    }

    /// Key/value pairs until an empty key.
    fn collect_env(&mut self, mut builder: RequestBuilder) -> Result<RequestBuilder, PromptError> {
        loop {
            let key = self.ask(ENV_KEY)?;
            if key.is_empty() {
                return Ok(builder);
            }
            let value = self.ask(&format!("Value for {}: ", key))?;
            builder = builder.env_variable(key, value);
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        answer(self.source.read_line(prompt)?)
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<String, PromptError> {
        answer(self.source.read_secret(prompt)?)
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

fn answer(line: Option<String>) -> Result<String, PromptError> {
    line.map(|l| l.trim().to_string())
        .ok_or(PromptError::InputClosed)
}
