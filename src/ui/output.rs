//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Every function writes to a caller-supplied writer so the shell can be
//! driven against stdout or an in-memory buffer. Results of queries are
//! always written; confirmations respect the quiet flag.

use std::fmt::Display;
use std::io::{self, Write};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Write a result line (always shown).
pub fn line<W: Write + ?Sized>(out: &mut W, message: impl Display) -> io::Result<()> {
    writeln!(out, "{}", message)
}

/// Write a confirmation message (respects quiet mode).
pub fn success<W: Write + ?Sized>(
    out: &mut W,
    message: impl Display,
    verbosity: Verbosity,
) -> io::Result<()> {
    if verbosity != Verbosity::Quiet {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}

/// Write an error message (always shown).
pub fn error<W: Write + ?Sized>(err: &mut W, message: impl Display) -> io::Result<()> {
    writeln!(err, "error: {}", message)
}
