//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommitId`] - Identifier handed out by the shared commit counter
//! - [`RepoName`] - Validated repository name
//! - [`Timestamp`] - Milliseconds since the Unix epoch
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use minigit::core::types::{CommitId, RepoName, Timestamp};
//!
//! let name = RepoName::new("main").unwrap();
//! let id = CommitId::from_sequence(7);
//! let ts = Timestamp::from_millis(0);
//!
//! assert_eq!(name.as_str(), "main");
//! assert_eq!(id.as_str(), "7");
//! assert_eq!(ts.to_string(), "1970-01-01 at 00:00:00 UTC");
//!
//! // Invalid constructions fail at creation time
//! assert!(RepoName::new("").is_err());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid repository name: {0}")]
    InvalidRepoName(String),
}

/// Identifier of a single commit.
///
/// Ids are decimal renderings of the shared counter value at the time the
/// commit was created. They are compared as opaque strings; callers may
/// look commits up with any string (an id that was never issued simply
/// never matches).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Build the id for a counter value.
    pub fn from_sequence(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CommitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CommitId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CommitId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated repository name.
///
/// The only requirement is that a name is non-empty. Whether a name can be
/// typed as one shell token is a separate question; see
/// [`RepoName::is_single_token`].
///
/// # Example
///
/// ```
/// use minigit::core::types::RepoName;
///
/// let name = RepoName::new("upstream").unwrap();
/// assert_eq!(name.as_str(), "upstream");
///
/// assert!(RepoName::new("").is_err());
///
/// let spaced = RepoName::new("My Repo").unwrap();
/// assert!(!spaced.is_single_token());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoName(String);

impl RepoName {
    /// Create a new validated repository name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRepoName` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidRepoName(
                "repository name cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether the name contains no whitespace, so a line split on
    /// whitespace yields it as one token.
    pub fn is_single_token(&self) -> bool {
        !self.0.chars().any(char::is_whitespace)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepoName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for RepoName {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepoName> for String {
    fn from(name: RepoName) -> Self {
        name.0
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for RepoName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
///
/// Rendered in UTC as `YYYY-MM-DD at HH:MM:SS UTC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Display format used for commit rendering.
    const FORMAT: &'static str = "%Y-%m-%d at %H:%M:%S UTC";

    /// Wrap a raw millisecond value.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds since the epoch.
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a chrono datetime, if representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format(Self::FORMAT)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod commit_id {
        use super::*;

        #[test]
        fn from_sequence_is_decimal() {
            assert_eq!(CommitId::from_sequence(0).as_str(), "0");
            assert_eq!(CommitId::from_sequence(42).as_str(), "42");
        }

        #[test]
        fn compares_with_str() {
            let id = CommitId::from_sequence(3);
            assert_eq!(id, "3");
            assert!(id != "03");
        }

        #[test]
        fn serializes_as_plain_string() {
            let id = CommitId::from_sequence(12);
            assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
        }
    }

    mod repo_name {
        use super::*;

        #[test]
        fn valid_names() {
            for name in ["main", "repo1", "feature/x", "a"] {
                assert!(RepoName::new(name).is_ok(), "{name} should be valid");
            }
        }

        #[test]
        fn empty_rejected() {
            assert!(matches!(
                RepoName::new(""),
                Err(TypeError::InvalidRepoName(_))
            ));
        }

        #[test]
        fn whitespace_allowed() {
            for name in [" ", "two words", "tab\there", "My Repo"] {
                let parsed = RepoName::new(name).unwrap();
                assert_eq!(parsed.as_str(), name);
                assert!(!parsed.is_single_token());
            }
            assert!(RepoName::new("main").unwrap().is_single_token());
        }

        #[test]
        fn serde_rejects_invalid() {
            let parsed: Result<RepoName, _> = serde_json::from_str("\"\"");
            assert!(parsed.is_err());

            let parsed: RepoName = serde_json::from_str("\"main\"").unwrap();
            assert_eq!(parsed.as_str(), "main");
        }
    }

    mod timestamp {
        use super::*;

        #[test]
        fn renders_utc() {
            // 2024-04-29 12:34:56 UTC
            let ts = Timestamp::from_millis(1_714_394_096_000);
            assert_eq!(ts.to_string(), "2024-04-29 at 12:34:56 UTC");
        }

        #[test]
        fn ordering_follows_millis() {
            assert!(Timestamp::from_millis(1) < Timestamp::from_millis(2));
            assert_eq!(Timestamp::from_millis(5), Timestamp::from_millis(5));
        }

        #[test]
        fn unrepresentable_falls_back_to_millis() {
            let ts = Timestamp::from_millis(i64::MAX);
            assert_eq!(ts.to_string(), format!("{}ms", i64::MAX));
        }
    }
}
