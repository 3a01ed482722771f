//! minigit - in-memory linear commit histories
//!
//! A repository is a named chain of immutable commits, newest first.
//! Commits can be appended, looked up, dropped, and two repositories can be
//! synchronized into one chain ordered by timestamp.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, the commit chain, and configuration
//! - [`shell`] - Line-oriented interpreter over a set of repositories
//! - [`cli`] - Command-line interface layer (parses args, runs the shell)
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. A repository exclusively owns its chain; no commit is shared
//! 2. Commit ids are unique among repositories sharing a context
//! 3. Synchronizing leaves one chain sorted newest first and the other empty

pub mod cli;
pub mod core;
pub mod shell;
pub mod ui;
