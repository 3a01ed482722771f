//! core::workspace
//!
//! A set of named repositories sharing one [`ChainContext`].
//!
//! The workspace is what the interactive shell drives: it creates and
//! looks up repositories by name and synchronizes two of them, which needs
//! both mutably at once.

use std::collections::BTreeMap;

use thiserror::Error;

use super::context::ChainContext;
use super::repository::Repository;
use super::types::{RepoName, TypeError};

/// Errors from workspace operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error("repository '{0}' already exists")]
    DuplicateRepository(String),

    #[error("repository '{0}' does not exist")]
    UnknownRepository(String),

    #[error("cannot synchronize repository '{0}' with itself")]
    SelfSynchronize(String),
}

/// Named repositories with a shared commit counter.
///
/// # Example
///
/// ```
/// use minigit::core::workspace::Workspace;
///
/// let mut ws = Workspace::new();
/// ws.create("main").unwrap();
/// ws.create("feature").unwrap();
///
/// ws.get_mut("feature").unwrap().commit("work");
/// ws.synchronize("main", "feature").unwrap();
///
/// assert_eq!(ws.get("main").unwrap().size(), 1);
/// assert!(ws.get("feature").unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Workspace {
    ctx: ChainContext,
    repos: BTreeMap<RepoName, Repository>,
}

impl Workspace {
    /// Empty workspace on the system clock.
    pub fn new() -> Self {
        Self::with_context(ChainContext::new())
    }

    /// Empty workspace using `ctx` for every repository it creates.
    pub fn with_context(ctx: ChainContext) -> Self {
        Self {
            ctx,
            repos: BTreeMap::new(),
        }
    }

    pub fn context(&self) -> &ChainContext {
        &self.ctx
    }

    /// Create an empty repository.
    ///
    /// # Errors
    ///
    /// `InvalidName` for a bad name, `DuplicateRepository` if the name is
    /// taken.
    pub fn create(&mut self, name: &str) -> Result<&mut Repository, WorkspaceError> {
        let name = RepoName::new(name)?;
        if self.repos.contains_key(&name) {
            return Err(WorkspaceError::DuplicateRepository(name.into()));
        }

        tracing::debug!(repo = %name, "creating repository");
        let repo = Repository::with_name(name.clone(), &self.ctx);
        Ok(self.repos.entry(name).or_insert(repo))
    }

    /// Remove a repository and return it.
    pub fn remove(&mut self, name: &str) -> Result<Repository, WorkspaceError> {
        let repo = self
            .repos
            .remove(name)
            .ok_or_else(|| WorkspaceError::UnknownRepository(name.to_string()))?;
        tracing::debug!(repo = name, commits = repo.size(), "removed repository");
        Ok(repo)
    }

    pub fn get(&self, name: &str) -> Result<&Repository, WorkspaceError> {
        self.repos
            .get(name)
            .ok_or_else(|| WorkspaceError::UnknownRepository(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Repository, WorkspaceError> {
        self.repos
            .get_mut(name)
            .ok_or_else(|| WorkspaceError::UnknownRepository(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.repos.contains_key(name)
    }

    /// Repository names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &RepoName> {
        self.repos.keys()
    }

    /// Repositories in name order.
    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repos.values()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Merge `source` into `target`. `source` stays registered, empty.
    ///
    /// # Errors
    ///
    /// `SelfSynchronize` when both names are the same, `UnknownRepository`
    /// when either is missing.
    pub fn synchronize(&mut self, target: &str, source: &str) -> Result<(), WorkspaceError> {
        if target == source {
            return Err(WorkspaceError::SelfSynchronize(target.to_string()));
        }
        if !self.repos.contains_key(target) {
            return Err(WorkspaceError::UnknownRepository(target.to_string()));
        }

        // Lift the source out so both repositories can be borrowed mutably.
        let (name, mut from) = self
            .repos
            .remove_entry(source)
            .ok_or_else(|| WorkspaceError::UnknownRepository(source.to_string()))?;

        let result = self
            .get_mut(target)
            .map(|into| into.synchronize(&mut from));
        self.repos.insert(name, from);

        if result.is_ok() {
            tracing::debug!(into = target, from = source, "synchronized");
        }
        result
    }

    /// Restart commit ids at 0. Test setup only.
    pub fn reset_ids(&self) {
        self.ctx.reset_ids();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Run `f` with debug events captured, returning its result and the log.
    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    fn workspace() -> (Workspace, ManualClock) {
        let clock = ManualClock::new(0);
        let ws = Workspace::with_context(ChainContext::with_clock(clock.clone()));
        (ws, clock)
    }

    #[test]
    fn create_and_get() {
        let (mut ws, _) = workspace();
        ws.create("main").unwrap().commit("hello");

        assert!(ws.contains("main"));
        assert_eq!(ws.get("main").unwrap().size(), 1);
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn duplicate_create_fails() {
        let (mut ws, _) = workspace();
        ws.create("main").unwrap();
        assert_eq!(
            ws.create("main").unwrap_err(),
            WorkspaceError::DuplicateRepository("main".into())
        );
    }

    #[test]
    fn invalid_name_fails() {
        let (mut ws, _) = workspace();
        assert!(matches!(
            ws.create(""),
            Err(WorkspaceError::InvalidName(_))
        ));
        assert!(ws.is_empty());
    }

    #[test]
    fn unknown_lookup_fails() {
        let (mut ws, _) = workspace();
        assert_eq!(
            ws.get("nope").unwrap_err(),
            WorkspaceError::UnknownRepository("nope".into())
        );
        assert!(ws.get_mut("nope").is_err());
        assert!(ws.remove("nope").is_err());
    }

    #[test]
    fn spaced_names_accepted() {
        let (mut ws, _) = workspace();
        ws.create("My Repo").unwrap().commit("c");
        assert_eq!(ws.get("My Repo").unwrap().size(), 1);
    }

    #[test]
    fn remove_logs_only_on_success() {
        let (mut ws, _) = workspace();
        ws.create("gone").unwrap();

        let (result, logs) = with_logs(|| ws.remove("missing"));
        assert!(result.is_err());
        assert!(!logs.contains("removed repository"), "unexpected log: {logs}");

        let (result, logs) = with_logs(|| ws.remove("gone"));
        assert!(result.is_ok());
        assert!(logs.contains("removed repository"), "missing log: {logs}");
    }

    #[test]
    fn failed_synchronize_not_logged() {
        let (mut ws, _) = workspace();
        ws.create("main").unwrap();

        let (result, logs) = with_logs(|| ws.synchronize("main", "missing"));
        assert!(result.is_err());
        assert!(!logs.contains("synchronized"), "unexpected log: {logs}");
    }

    #[test]
    fn names_are_sorted() {
        let (mut ws, _) = workspace();
        for name in ["zeta", "alpha", "mid"] {
            ws.create(name).unwrap();
        }
        let names: Vec<_> = ws.names().map(RepoName::as_str).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn remove_returns_repository() {
        let (mut ws, _) = workspace();
        ws.create("gone").unwrap().commit("c");
        let repo = ws.remove("gone").unwrap();
        assert_eq!(repo.size(), 1);
        assert!(!ws.contains("gone"));
    }

    #[test]
    fn ids_shared_between_repositories() {
        let (mut ws, _) = workspace();
        ws.create("a").unwrap();
        ws.create("b").unwrap();
        let first = ws.get_mut("a").unwrap().commit("x");
        let second = ws.get_mut("b").unwrap().commit("y");
        assert_eq!(first, "0");
        assert_eq!(second, "1");

        ws.reset_ids();
        assert_eq!(ws.get_mut("b").unwrap().commit("z"), "0");
    }

    #[test]
    fn synchronize_moves_commits() {
        let (mut ws, clock) = workspace();
        ws.create("main").unwrap().commit("old");
        clock.advance(5);
        ws.create("side").unwrap().commit("new");

        ws.synchronize("main", "side").unwrap();

        let main = ws.get("main").unwrap();
        let messages: Vec<_> = main.iter().map(|c| c.message()).collect();
        assert_eq!(messages, vec!["new", "old"]);
        assert!(ws.get("side").unwrap().is_empty());
    }

    #[test]
    fn synchronize_with_self_rejected() {
        let (mut ws, _) = workspace();
        ws.create("main").unwrap().commit("c");
        assert_eq!(
            ws.synchronize("main", "main").unwrap_err(),
            WorkspaceError::SelfSynchronize("main".into())
        );
        assert_eq!(ws.get("main").unwrap().size(), 1);
    }

    #[test]
    fn synchronize_unknown_leaves_state() {
        let (mut ws, _) = workspace();
        ws.create("main").unwrap().commit("c");

        assert!(ws.synchronize("main", "missing").is_err());
        assert!(ws.synchronize("missing", "main").is_err());
        assert_eq!(ws.get("main").unwrap().size(), 1);
        assert_eq!(ws.len(), 1);
    }
}
