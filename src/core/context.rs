//! core::context
//!
//! Shared state for building commits.
//!
//! Commit ids come from one counter shared by every repository built from
//! the same [`ChainContext`]; a Workspace or test fixture owns the context
//! and hands clones to each [`Repository`](super::repository::Repository).
//! Clones are cheap and all observe the same counter and clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::types::{CommitId, Timestamp};

/// Id counter and clock shared by a family of repositories.
#[derive(Debug, Clone)]
pub struct ChainContext {
    next_id: Arc<AtomicU64>,
    clock: Arc<dyn Clock>,
}

impl ChainContext {
    /// A fresh context backed by the system clock, counting from 0.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// A fresh context backed by the given clock, counting from 0.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(0)),
            clock: Arc::new(clock),
        }
    }

    /// Take the next id and bump the counter.
    pub(crate) fn allocate_id(&self) -> CommitId {
        CommitId::from_sequence(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Current time from the context clock.
    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// The id the next commit will receive.
    pub fn peek_next_id(&self) -> CommitId {
        CommitId::from_sequence(self.next_id.load(Ordering::SeqCst))
    }

    /// Restart id allocation at 0.
    ///
    /// Test setup only: ids handed out afterwards collide with any commit
    /// still alive from before the reset.
    pub fn reset_ids(&self) {
        self.next_id.store(0, Ordering::SeqCst);
    }
}

impl Default for ChainContext {
    fn default() -> Self {
        Self::new()
    }
}
