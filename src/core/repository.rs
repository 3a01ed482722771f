//! core::repository
//!
//! A named, linear commit history.
//!
//! # Structure
//!
//! A [`Repository`] owns the newest commit (the head); each commit owns the
//! one before it. Every operation is a walk or a relink along that single
//! chain, so there is no separate index to keep in sync.
//!
//! # Merging
//!
//! [`Repository::synchronize`] folds another repository's chain into this
//! one. Both chains are newest-first, so a two-cursor merge on timestamps
//! produces one newest-first chain in a single pass. When timestamps are
//! equal the commit from `self` goes first. The other repository is left
//! empty.
//!
//! # Example
//!
//! ```
//! use minigit::core::context::ChainContext;
//! use minigit::core::repository::Repository;
//!
//! let ctx = ChainContext::new();
//! let mut repo = Repository::new("main", &ctx).unwrap();
//!
//! let first = repo.commit("Initial commit");
//! let second = repo.commit("Add README");
//!
//! assert_eq!(repo.size(), 2);
//! assert_eq!(repo.head(), Some(&second));
//! assert!(repo.contains(&first));
//!
//! assert!(repo.drop_commit(&first));
//! assert!(!repo.contains(&first));
//! ```

use thiserror::Error;

use super::commit::{Commit, CommitRecord};
use super::context::ChainContext;
use super::types::{CommitId, RepoName, TypeError};

/// Errors from repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error("history count must be positive, got {0}")]
    InvalidHistoryCount(i64),
}

/// A named chain of commits, newest first.
pub struct Repository {
    name: RepoName,
    head: Option<Box<Commit>>,
    ctx: ChainContext,
}

impl Repository {
    /// Create an empty repository.
    ///
    /// Commits made in this repository draw ids and timestamps from `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidName` if `name` is empty.
    pub fn new(name: impl Into<String>, ctx: &ChainContext) -> Result<Self, RepoError> {
        Ok(Self::with_name(RepoName::new(name)?, ctx))
    }

    /// Create an empty repository from an already validated name.
    pub fn with_name(name: RepoName, ctx: &ChainContext) -> Self {
        Self {
            name,
            head: None,
            ctx: ctx.clone(),
        }
    }

    pub fn name(&self) -> &RepoName {
        &self.name
    }

    /// Record a new commit on top of the current head and return its id.
    pub fn commit(&mut self, message: impl Into<String>) -> CommitId {
        let past = self.head.take();
        let commit = Box::new(Commit::new(&self.ctx, message, past));
        let id = commit.id().clone();
        self.head = Some(commit);
        id
    }

    /// Id of the newest commit, or `None` when the repository is empty.
    pub fn head(&self) -> Option<&CommitId> {
        self.head.as_deref().map(Commit::id)
    }

    /// Newest commit, or `None` when the repository is empty.
    pub fn head_commit(&self) -> Option<&Commit> {
        self.head.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of commits in the chain.
    ///
    /// Walks the whole chain.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Whether a commit with this id is in the chain.
    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        self.iter().any(|c| c.id() == id)
    }

    /// Remove the newest commit with this id, relinking its neighbours.
    ///
    /// Returns `false` and leaves the chain untouched when no commit
    /// matches.
    pub fn drop_commit(&mut self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        let mut link = &mut self.head;
        loop {
            match link {
                None => return false,
                Some(node) if node.id() == id => {
                    *link = node.past.take();
                    return true;
                }
                Some(node) => link = &mut node.past,
            }
        }
    }

    /// Render up to `n` commits, newest first, one per line.
    ///
    /// Shorter chains simply produce fewer lines.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidHistoryCount` if `n` is zero.
    pub fn get_history(&self, n: usize) -> Result<String, RepoError> {
        if n == 0 {
            return Err(RepoError::InvalidHistoryCount(0));
        }

        let lines: Vec<String> = self.iter().take(n).map(|c| c.to_string()).collect();
        Ok(lines.join("\n").trim_end().to_string())
    }

    /// Snapshot up to `n` commits, newest first.
    pub fn log(&self, n: usize) -> Vec<CommitRecord> {
        self.iter().take(n).map(Commit::record).collect()
    }

    /// Merge `other`'s history into this one, ordered by timestamp.
    ///
    /// Both chains are walked newest to oldest; at each step the newer
    /// commit is moved to the merged chain, taking `self`'s commit when the
    /// timestamps are equal. Once either side runs out, the rest of the
    /// other side is attached as-is. Commits are relinked, never copied.
    ///
    /// Afterwards `other` is empty and every commit it held belongs to
    /// `self`.
    pub fn synchronize(&mut self, other: &mut Repository) {
        let mut mine = self.head.take();
        let mut theirs = other.head.take();
        let mut merged: Option<Box<Commit>> = None;
        let mut tail = &mut merged;
        let mut interleaved = 0usize;

        while let (Some(a), Some(b)) = (&mine, &theirs) {
            let source = if a.timestamp() >= b.timestamp() {
                &mut mine
            } else {
                &mut theirs
            };

            if let Some(mut node) = source.take() {
                *source = node.past.take();
                tail = &mut tail.insert(node).past;
                interleaved += 1;
            }
        }

        *tail = mine.or(theirs);
        self.head = merged;

        tracing::trace!(
            into = %self.name,
            from = %other.name,
            interleaved,
            "synchronized repositories"
        );
    }

    /// Iterate over commits, newest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for Repository {
    // Unlink one node at a time; the default recursive drop of nested boxes
    // can overflow the stack on long chains.
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.past.take();
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.head.as_deref() {
            None => write!(f, "{} - No commits", self.name),
            Some(head) => write!(f, "{} - Current head: {}", self.name, head),
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("head", &self.head())
            .field("size", &self.size())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Repository {
    type Item = &'a Commit;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a repository's commits, newest first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    next: Option<&'a Commit>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = self.next?;
        self.next = commit.past();
        Some(commit)
    }
}
