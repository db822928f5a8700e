//! First-parent ancestry reconstruction
//!
//! The compare endpoint reports the commits of a range as an unordered
//! set. [`linearize`] rebuilds the mainline from it: starting at the head
//! revision it follows each commit's first parent and prepends, so the
//! result reads oldest-first. Commits reachable only through non-first
//! parents (merged-in side branches) are excluded by design.
//!
//! Known limitation: the walk assumes the set is a contiguous range. The
//! compare endpoint is not paginated here, so a depth-limited response
//! silently truncates the chain.

use gh_compare_client::Commit;
use std::collections::{HashMap, HashSet, VecDeque};

/// Order `commits` into the first-parent chain ending at `head`,
/// oldest-first.
///
/// The walk stops when the current parent lies outside the set (the
/// compared range ends there; expected, not an error). If `head` itself
/// is not in the set the chain is empty.
pub fn linearize(commits: &[Commit], head: &str) -> Vec<Commit> {
    let by_sha: HashMap<&str, &Commit> =
        commits.iter().map(|c| (c.sha.as_str(), c)).collect();

    let mut chain: VecDeque<Commit> = VecDeque::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = head;

    while let Some(commit) = by_sha.get(current).copied() {
        // malformed data could loop; a sha is visited at most once
        if !seen.insert(commit.sha.as_str()) {
            break;
        }
        chain.push_front(commit.clone());
        match commit.first_parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    chain.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(sha: &str, parents: &[&str]) -> Commit {
        Commit {
            sha: sha.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            author: "Ada".to_string(),
            message: format!("commit {sha}"),
        }
    }

    fn shas(chain: &[Commit]) -> Vec<&str> {
        chain.iter().map(|c| c.sha.as_str()).collect()
    }

    #[test]
    fn test_full_chain_within_set_is_returned_oldest_first() {
        let commits = vec![
            commit("C", &["B"]),
            commit("A", &[]),
            commit("B", &["A"]),
        ];
        assert_eq!(shas(&linearize(&commits, "C")), ["A", "B", "C"]);
    }

    #[test]
    fn test_chain_stops_at_first_commit_outside_the_set() {
        // B's parent X was not part of the compared range
        let commits = vec![commit("C", &["B"]), commit("B", &["X"])];
        assert_eq!(shas(&linearize(&commits, "C")), ["B", "C"]);
    }

    #[test]
    fn test_missing_head_yields_empty_chain() {
        let commits = vec![commit("A", &[])];
        assert!(linearize(&commits, "Z").is_empty());
    }

    #[test]
    fn test_non_first_parents_are_never_followed() {
        // M merges side branch S into mainline B; S must not appear
        let commits = vec![
            commit("M", &["B", "S"]),
            commit("B", &["A"]),
            commit("S", &["A"]),
            commit("A", &[]),
        ];
        assert_eq!(shas(&linearize(&commits, "M")), ["A", "B", "M"]);
    }

    #[test]
    fn test_chain_has_no_duplicates_on_malformed_input() {
        // self-referential parent must not loop forever
        let commits = vec![commit("A", &["A"])];
        assert_eq!(shas(&linearize(&commits, "A")), ["A"]);
    }

    #[test]
    fn test_two_commit_compare_payload_scenario() {
        let commits = vec![commit("H", &["B"]), commit("B", &[])];
        assert_eq!(shas(&linearize(&commits, "H")), ["B", "H"]);
    }
}
