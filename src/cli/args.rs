//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// minigit - in-memory linear commit histories
#[derive(Parser, Debug)]
#[command(name = "mgit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; suppresses confirmations and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session
    #[command(
        name = "shell",
        long_about = "Start a session over an in-memory set of repositories.\n\n\
            Each line is one command. Repositories live only for the length of \
            the session. Without --script, commands are read from standard input; \
            a prompt is shown when standard input is a terminal.",
        after_help = "\
SESSION COMMANDS:
    create <repo>              create an empty repository
    commit <repo> <message>    record a commit
    head <repo>                print the head commit id
    size <repo>                print the number of commits
    contains <repo> <id>       check for a commit
    drop <repo> <id>           remove a commit
    history <repo> [n]         show the n most recent commits
    log <repo> [n] [--json]    show recent commits as records
    sync <repo> <other>        merge <other> into <repo>, emptying <other>
    show <repo> | list | remove <repo> | help | quit

WORKFLOW EXAMPLES:
    # Interactive session
    mgit shell

    # Run a script, stopping at the first error
    mgit shell --script demo.mgit

    # Pipe commands in
    printf 'create main\\ncommit main hi\\nhistory main\\n' | mgit shell"
    )]
    Shell {
        /// Read commands from this file; the first failing line aborts
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },

    /// Show the effective configuration
    #[command(
        name = "config",
        long_about = "Print the effective configuration as TOML, with defaults \
            filled in, followed by the file it was loaded from."
    )]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    mgit completion bash > ~/.local/share/bash-completion/completions/mgit

    # Zsh
    mgit completion zsh > ~/.zfunc/_mgit"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
