//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All shell and CLI output goes through this module so quiet mode and
//! message prefixes are applied consistently.

pub mod output;
