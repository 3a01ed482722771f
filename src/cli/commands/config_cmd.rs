//! config command - Show the effective configuration

use crate::cli::Context;
use anyhow::{Context as _, Result};

/// Print the effective configuration and where it came from.
pub fn show(ctx: &Context) -> Result<()> {
    let rendered = ctx
        .config
        .to_toml()
        .context("Failed to render configuration")?;
    print!("{}", rendered);

    if !ctx.quiet {
        match ctx.config.path() {
            Some(path) => println!("# loaded from {}", path.display()),
            None => println!("# no config file found; using defaults"),
        }
    }

    Ok(())
}
