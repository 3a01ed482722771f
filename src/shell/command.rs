//! shell::command
//!
//! Grammar of a single shell line, parsed with clap.
//!
//! Lines are split on whitespace, except for the commit message: it is the
//! raw text after the separator that follows the repository name, kept
//! byte for byte.

use clap::{CommandFactory, Parser, Subcommand};

use super::ShellError;

/// One parsed shell line.
#[derive(Parser, Debug)]
#[command(
    name = "mgit",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands understood by the shell.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Create an empty repository
    Create {
        /// Repository name
        repo: String,
    },

    /// Forget a repository and all of its commits
    Remove {
        /// Repository name
        repo: String,
    },

    /// List repositories and their heads
    List,

    /// Show a repository and its current head
    Show {
        /// Repository name
        repo: String,
    },

    /// Print the id of the head commit
    Head {
        /// Repository name
        repo: String,
    },

    /// Print the number of commits
    Size {
        /// Repository name
        repo: String,
    },

    /// Record a commit
    Commit {
        /// Repository name
        repo: String,

        /// Commit message (may be empty)
        #[arg(
            value_name = "MESSAGE",
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 0..
        )]
        words: Vec<String>,

        /// Message text as typed; filled in by [`ShellCommand::parse`]
        #[arg(skip)]
        message: String,
    },

    /// Check whether a commit id is in a repository
    Contains {
        /// Repository name
        repo: String,
        /// Commit id
        id: String,
    },

    /// Remove a commit from a repository
    Drop {
        /// Repository name
        repo: String,
        /// Commit id
        id: String,
    },

    /// Show the most recent commits, newest first
    History {
        /// Repository name
        repo: String,

        /// Number of commits to show (defaults to history.default_count)
        #[arg(allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Show recent commits as records
    Log {
        /// Repository name
        repo: String,

        /// Number of commits to show (defaults to history.default_count)
        #[arg(allow_negative_numbers = true)]
        count: Option<i64>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge another repository's commits into this one
    #[command(visible_alias = "synchronize")]
    Sync {
        /// Repository receiving the commits
        repo: String,
        /// Repository giving up its commits
        other: String,
    },

    /// Show available commands
    Help,

    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

impl ShellCommand {
    /// Parse one line. Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Parse` with clap's message if the line does not
    /// match any command.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let mut command = ShellLine::try_parse_from(trimmed.split_whitespace())
            .map(|parsed| parsed.command)
            .map_err(|e| ShellError::Parse(first_line(&e.render().to_string())))?;

        if let Self::Commit { message, .. } = &mut command {
            *message = after_tokens(line, 2).to_string();
        }
        Ok(Some(command))
    }

    /// Help text listing every command.
    pub fn help() -> String {
        ShellLine::command().render_help().to_string()
    }
}

/// Text following the first `n` whitespace-separated tokens, minus the one
/// separator character after the last of them.
fn after_tokens(line: &str, n: usize) -> &str {
    let mut rest = line;
    for _ in 0..n {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }

    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    }
}

fn first_line(rendered: &str) -> String {
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
