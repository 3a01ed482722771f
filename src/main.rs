//! mgit - command-line entry point
//!
//! Parses arguments, sets up logging, and delegates to [`minigit::cli`].
//! Errors are printed to stderr with their cause chain and the process
//! exits non-zero.

use minigit::cli::{self, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    if let Err(err) = cli::run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flag-derived
/// filter.
fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = if cli.debug {
        "warn,minigit=debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
