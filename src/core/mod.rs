//! core
//!
//! Core domain types and operations for minigit.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommitId, RepoName, Timestamp
//! - [`clock`] - Time sources for commit timestamps
//! - [`context`] - Shared commit id counter and clock
//! - [`commit`] - Immutable commit records
//! - [`repository`] - A named commit chain and its operations
//! - [`workspace`] - Named repositories sharing one context
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - A repository exclusively owns its chain; merging moves commits
//! - All operations are deterministic given the clock

pub mod clock;
pub mod commit;
pub mod config;
pub mod context;
pub mod repository;
pub mod types;
pub mod workspace;
