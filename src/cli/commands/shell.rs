//! shell command - Run an interactive or scripted session
//!
//! Builds a workspace (creating any repositories named in the config),
//! picks run options from the input source, and hands stdin or the script
//! file to the session.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::workspace::Workspace;
use crate::shell::{RunOptions, Session};

/// Build the session described by the configuration.
pub fn session(ctx: &Context) -> Result<Session> {
    let mut workspace = Workspace::new();
    for name in ctx.config.repositories() {
        workspace
            .create(name)
            .with_context(|| format!("Failed to create configured repository '{}'", name))?;
    }

    Ok(Session::new(
        workspace,
        ctx.config.history_count(),
        ctx.verbosity(),
    ))
}

/// Run a session over stdin or a script file.
pub fn shell(ctx: &Context, script: Option<&Path>) -> Result<()> {
    let mut session = session(ctx)?;
    let echo = ctx.config.echo();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match script {
        Some(path) => {
            tracing::debug!(path = %path.display(), "running script");
            let file = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            session
                .run(
                    BufReader::new(file),
                    &mut stdout,
                    &mut stderr,
                    &RunOptions::script().with_echo(echo),
                )
                .with_context(|| format!("Script '{}' failed", path.display()))?;
        }
        None => {
            let stdin = io::stdin();
            let options = if stdin.is_terminal() && !ctx.quiet {
                RunOptions::interactive(ctx.config.prompt())
            } else {
                RunOptions::piped()
            };
            session
                .run(stdin.lock(), &mut stdout, &mut stderr, &options.with_echo(echo))
                .context("Session failed")?;
        }
    }

    Ok(())
}
