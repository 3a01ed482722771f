//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Builds whatever session state it needs
//! 3. Formats and displays output

mod completion;
mod config_cmd;
mod shell;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use shell::shell;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Shell { script } => shell(ctx, script.as_deref()),
        Command::Config => config_show(ctx),
        Command::Completion { shell } => completion(shell),
    }
}
