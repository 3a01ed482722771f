//! shell
//!
//! Line-oriented interpreter over a [`Workspace`].
//!
//! # Responsibilities
//!
//! - Parse each input line into a [`ShellCommand`]
//! - Apply it to the workspace and write the result
//! - Decide whether an error ends the session
//!
//! Output goes to caller-supplied writers so sessions can be driven from
//! stdin, a script file, or a test buffer alike.
//!
//! # Example
//!
//! ```
//! use minigit::shell::{RunOptions, Session};
//! use minigit::core::workspace::Workspace;
//! use minigit::ui::output::Verbosity;
//!
//! let mut session = Session::new(Workspace::new(), 5, Verbosity::Normal);
//! let script = "create main\ncommit main first\nsize main\n";
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! session
//!     .run(script.as_bytes(), &mut out, &mut err, &RunOptions::script())
//!     .unwrap();
//!
//! assert!(String::from_utf8(out).unwrap().ends_with("1\n"));
//! ```

pub mod command;

pub use command::ShellCommand;

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::core::repository::RepoError;
use crate::core::workspace::{Workspace, WorkspaceError};
use crate::ui::output::{self, Verbosity};

/// Errors from executing shell commands.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<ShellError>,
    },
}

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// How a session reads and reacts to input.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Prompt written before each line (interactive terminals only)
    pub prompt: Option<String>,
    /// Echo each command to the output before running it
    pub echo: bool,
    /// Abort on the first failing line
    pub stop_on_error: bool,
}

impl RunOptions {
    /// Interactive terminal: prompt, keep going after errors.
    pub fn interactive(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            echo: false,
            stop_on_error: false,
        }
    }

    /// Piped input: no prompt, keep going after errors.
    pub fn piped() -> Self {
        Self::default()
    }

    /// Script file: no prompt, stop at the first error.
    pub fn script() -> Self {
        Self {
            prompt: None,
            echo: false,
            stop_on_error: true,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

/// An interpreter session over one workspace.
#[derive(Debug)]
pub struct Session {
    workspace: Workspace,
    history_count: usize,
    verbosity: Verbosity,
}

impl Session {
    /// Start a session.
    ///
    /// `history_count` is the count used by `history` and `log` when the
    /// line gives none.
    pub fn new(workspace: Workspace, history_count: usize, verbosity: Verbosity) -> Self {
        Self {
            workspace,
            history_count,
            verbosity,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Read lines from `input` until EOF or `quit`.
    ///
    /// Command output goes to `out`; error reports go to `err`.
    ///
    /// # Errors
    ///
    /// I/O failures always end the session. Command failures end it only
    /// when `options.stop_on_error` is set, wrapped in
    /// `ShellError::Script` with the 1-based line number.
    pub fn run<R, W, E>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
        options: &RunOptions,
    ) -> Result<(), ShellError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut lines = input.lines();
        let mut number = 0usize;

        loop {
            if let Some(prompt) = &options.prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            number += 1;

            if options.echo && !line.trim().is_empty() {
                writeln!(out, "{}{}", options.prompt.as_deref().unwrap_or("> "), line.trim())?;
            }

            match self.execute(&line, out) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue) => {}
                Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
                Err(e) if options.stop_on_error => {
                    return Err(ShellError::Script {
                        line: number,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::debug!(line = number, error = %e, "command failed");
                    output::error(err, &e)?;
                }
            }
        }

        tracing::debug!(lines = number, "session finished");
        Ok(())
    }

    /// Parse and run one line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Outcome, ShellError> {
        match ShellCommand::parse(line)? {
            Some(command) => self.apply(command, out),
            None => Ok(Outcome::Continue),
        }
    }

    /// Run one parsed command.
    pub fn apply<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> Result<Outcome, ShellError> {
        tracing::debug!(?command, "executing");

        match command {
            ShellCommand::Create { repo } => {
                self.workspace.create(&repo)?;
                output::success(out, format!("Created repository '{repo}'"), self.verbosity)?;
            }
            ShellCommand::Remove { repo } => {
                let removed = self.workspace.remove(&repo)?;
                output::success(
                    out,
                    format!("Removed repository '{repo}' ({} commits)", removed.size()),
                    self.verbosity,
                )?;
            }
            ShellCommand::List => {
                if self.workspace.is_empty() {
                    output::success(out, "No repositories", self.verbosity)?;
                }
                for repo in self.workspace.repositories() {
                    output::line(out, repo)?;
                }
            }
            ShellCommand::Show { repo } => {
                output::line(out, self.workspace.get(&repo)?)?;
            }
            ShellCommand::Head { repo } => match self.workspace.get(&repo)?.head() {
                Some(id) => output::line(out, id)?,
                None => output::line(out, "No commits")?,
            },
            ShellCommand::Size { repo } => {
                output::line(out, self.workspace.get(&repo)?.size())?;
            }
            ShellCommand::Commit { repo, message, .. } => {
                let id = self.workspace.get_mut(&repo)?.commit(message);
                output::line(out, format!("New commit: {id}"))?;
            }
            ShellCommand::Contains { repo, id } => {
                output::line(out, self.workspace.get(&repo)?.contains(&id))?;
            }
            ShellCommand::Drop { repo, id } => {
                if self.workspace.get_mut(&repo)?.drop_commit(&id) {
                    output::success(out, format!("Dropped commit {id}"), self.verbosity)?;
                } else {
                    output::line(out, format!("No commit {id} in '{repo}'"))?;
                }
            }
            ShellCommand::History { repo, count } => {
                let count = self.count(count)?;
                let history = self.workspace.get(&repo)?.get_history(count)?;
                if history.is_empty() {
                    output::line(out, "No commits")?;
                } else {
                    output::line(out, history)?;
                }
            }
            ShellCommand::Log { repo, count, json } => {
                let count = self.count(count)?;
                let records = self.workspace.get(&repo)?.log(count);
                if json {
                    output::line(out, serde_json::to_string_pretty(&records)?)?;
                } else {
                    for record in &records {
                        output::line(
                            out,
                            format!("{}\t{}\t{}", record.id, record.timestamp, record.message),
                        )?;
                    }
                }
            }
            ShellCommand::Sync { repo, other } => {
                let moved = self.workspace.get(&other)?.size();
                self.workspace.synchronize(&repo, &other)?;
                output::success(
                    out,
                    format!("Synchronized '{other}' into '{repo}' ({moved} commits)"),
                    self.verbosity,
                )?;
            }
            ShellCommand::Help => {
                output::line(out, ShellCommand::help().trim_end())?;
            }
            ShellCommand::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Continue)
    }

    /// Resolve a `history`/`log` count, rejecting zero and negatives.
    fn count(&self, requested: Option<i64>) -> Result<usize, ShellError> {
        match requested {
            None => Ok(self.history_count),
            Some(n) if n <= 0 => Err(RepoError::InvalidHistoryCount(n).into()),
            Some(n) => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }
}
