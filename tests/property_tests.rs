//! Property-based tests for repositories.
//!
//! These tests use proptest to verify chain invariants hold across
//! randomly generated commit timelines.

use proptest::prelude::*;

use minigit::core::clock::ManualClock;
use minigit::core::context::ChainContext;
use minigit::core::repository::Repository;
use minigit::core::types::RepoName;

/// Strategy for a timeline: timestamps in commit order, never decreasing.
fn timeline(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..5, 0..max_len).prop_map(|steps| {
        steps
            .into_iter()
            .scan(0i64, |t, step| {
                *t += step;
                Some(*t)
            })
            .collect()
    })
}

/// Strategy for valid repository names.
fn repo_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./-]{1,30}"
}

/// Build a repository with one commit per timestamp, message `prefix{i}`.
fn build(name: &str, ctx: &ChainContext, clock: &ManualClock, stamps: &[i64]) -> Repository {
    let mut repo = Repository::new(name, ctx).unwrap();
    for (i, &t) in stamps.iter().enumerate() {
        clock.set(t);
        repo.commit(format!("{name}{i}"));
    }
    repo
}

fn pair(a: &[i64], b: &[i64]) -> (Repository, Repository) {
    let clock = ManualClock::new(0);
    let ctx = ChainContext::with_clock(clock.clone());
    (build("a", &ctx, &clock, a), build("b", &ctx, &clock, b))
}

proptest! {
    /// Synchronize moves every commit and empties the donor.
    #[test]
    fn synchronize_conserves_commits(a in timeline(30), b in timeline(30)) {
        let (mut left, mut right) = pair(&a, &b);
        let mut expected: Vec<String> = left
            .iter()
            .chain(right.iter())
            .map(|c| c.id().to_string())
            .collect();

        left.synchronize(&mut right);

        prop_assert_eq!(left.size(), a.len() + b.len());
        prop_assert!(right.is_empty());
        prop_assert_eq!(right.head(), None);

        let mut merged: Vec<String> = left.iter().map(|c| c.id().to_string()).collect();
        expected.sort();
        merged.sort();
        prop_assert_eq!(merged, expected);
    }

    /// The merged chain is newest first.
    #[test]
    fn synchronize_orders_by_timestamp(a in timeline(30), b in timeline(30)) {
        let (mut left, mut right) = pair(&a, &b);
        left.synchronize(&mut right);

        let stamps: Vec<i64> = left.iter().map(|c| c.timestamp().as_millis()).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", stamps);
    }

    /// Each side keeps its own relative order, and on equal timestamps the
    /// receiver's commits come first.
    #[test]
    fn synchronize_is_stable(a in timeline(20), b in timeline(20)) {
        let (mut left, mut right) = pair(&a, &b);
        left.synchronize(&mut right);

        let merged: Vec<(i64, String)> = left
            .iter()
            .map(|c| (c.timestamp().as_millis(), c.message().to_string()))
            .collect();

        let from = |prefix: char| -> Vec<String> {
            merged
                .iter()
                .filter(|(_, m)| m.starts_with(prefix))
                .map(|(_, m)| m.clone())
                .collect()
        };
        let expect_a: Vec<String> = (0..a.len()).rev().map(|i| format!("a{i}")).collect();
        let expect_b: Vec<String> = (0..b.len()).rev().map(|i| format!("b{i}")).collect();
        prop_assert_eq!(from('a'), expect_a);
        prop_assert_eq!(from('b'), expect_b);

        for w in merged.windows(2) {
            if w[0].0 == w[1].0 {
                prop_assert!(
                    !(w[0].1.starts_with('b') && w[1].1.starts_with('a')),
                    "donor commit ahead of receiver on a tie: {:?}", w
                );
            }
        }
    }

    /// Dropping an id removes exactly that commit.
    #[test]
    fn drop_removes_one(stamps in timeline(40), pick in any::<prop::sample::Index>()) {
        prop_assume!(!stamps.is_empty());
        let (mut repo, _) = pair(&stamps, &[]);

        let ids: Vec<String> = repo.iter().map(|c| c.id().to_string()).collect();
        let target = ids[pick.index(ids.len())].clone();

        prop_assert!(repo.drop_commit(&target));
        prop_assert!(!repo.contains(&target));
        prop_assert_eq!(repo.size(), ids.len() - 1);

        let rest: Vec<String> = repo.iter().map(|c| c.id().to_string()).collect();
        let expected: Vec<String> = ids.into_iter().filter(|id| *id != target).collect();
        prop_assert_eq!(rest, expected);

        prop_assert!(!repo.drop_commit(&target));
    }

    /// History never shows more than `n` commits, nor more than exist.
    #[test]
    fn history_is_bounded(stamps in timeline(30), n in 1usize..50) {
        let (repo, _) = pair(&stamps, &[]);
        let history = repo.get_history(n).unwrap();
        prop_assert_eq!(history.lines().count(), n.min(stamps.len()));
    }

    /// Valid names round-trip through serde and display unchanged.
    #[test]
    fn repo_name_roundtrip(name in repo_name()) {
        let parsed = RepoName::new(name.as_str()).unwrap();
        prop_assert_eq!(parsed.to_string(), name.clone());

        let json = serde_json::to_string(&parsed).unwrap();
        let back: RepoName = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, parsed);
    }

    /// Any non-empty name is accepted, whitespace included.
    #[test]
    fn repository_accepts_non_empty_names(name in "\\PC{1,20}") {
        let ctx = ChainContext::new();
        let repo = Repository::new(name.as_str(), &ctx).unwrap();
        prop_assert_eq!(repo.name().as_str(), name.as_str());
        prop_assert_eq!(repo.to_string(), format!("{name} - No commits"));
    }
}
