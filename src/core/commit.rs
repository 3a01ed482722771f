//! core::commit
//!
//! A single immutable commit record and its link to the previous commit.

use serde::{Deserialize, Serialize};

use super::context::ChainContext;
use super::types::{CommitId, Timestamp};

/// One change in a repository's history.
///
/// Everything except the `past` link is fixed at construction. The link
/// owns the next-older commit, so a chain is a plain list of boxes with no
/// sharing and no cycles.
#[derive(Debug)]
pub struct Commit {
    id: CommitId,
    message: String,
    timestamp: Timestamp,
    pub(crate) past: Option<Box<Commit>>,
}

impl Commit {
    /// Build a commit on top of `past`, drawing id and time from `ctx`.
    pub(crate) fn new(
        ctx: &ChainContext,
        message: impl Into<String>,
        past: Option<Box<Commit>>,
    ) -> Self {
        Self {
            id: ctx.allocate_id(),
            message: message.into(),
            timestamp: ctx.now(),
            past,
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The commit made immediately before this one, if any.
    pub fn past(&self) -> Option<&Commit> {
        self.past.as_deref()
    }

    /// Detached copy of the fields, without the link.
    pub fn record(&self) -> CommitRecord {
        CommitRecord {
            id: self.id.clone(),
            message: self.message.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// `<id> at <timestamp>: <message>`
impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.id, self.timestamp, self.message)
    }
}

/// Serializable snapshot of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: CommitId,
    pub message: String,
    pub timestamp: Timestamp,
}
