//! Navigator state machine
//!
//! The interactive controller over one [`Session`]: a flat list of commit
//! rows (oldest-first) followed by file rows (API order), a cursor, and
//! three states:
//!
//! - `Listing`: the list is shown and rows can be activated,
//! - `Viewing`: a comparison view is open; the originating row is
//!   remembered so the close signal restores focus there,
//! - `Closed`: terminal, no further activation.
//!
//! Activation produces an explicit [`Activation`] event carrying the
//! resolved coordinates; nothing is keyed to rendered positions. The
//! navigator also enforces the view-reuse policy: at most one live view
//! per file per session, re-activation re-focuses.

use crate::session::{FileCoordinates, Session};
use crate::viewer::ViewId;
use gh_compare_client::RepoId;
use std::collections::HashMap;

/// One activatable row of the session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Index into the session's commit chain.
    Commit(usize),
    /// Index into the session's changed-file list.
    File(usize),
}

/// Navigator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    Listing,
    /// A comparison view is open; `origin` is the cursor position to
    /// restore when it closes.
    Viewing { origin: usize },
    Closed,
}

/// Activation event, dispatched by the host to the fetch/resolve layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Open the two-pane comparison for one changed file.
    OpenFile {
        file_index: usize,
        coords: FileCoordinates,
    },
    /// Drill down into a nested session for one commit.
    OpenCommit {
        commit_index: usize,
        repo: RepoId,
        sha: String,
        /// First parent, absent for a root commit.
        parent: Option<String>,
    },
}

/// Interactive list/drill-down controller over a session.
#[derive(Debug)]
pub struct Navigator {
    session: Session,
    cursor: usize,
    state: NavigatorState,
    live_views: HashMap<usize, ViewId>,
}

impl Navigator {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor: 0,
            state: NavigatorState::Listing,
            live_views: HashMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.state, NavigatorState::Viewing { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.state == NavigatorState::Closed
    }

    /// Total activatable rows: commit chain first, then files.
    pub fn row_count(&self) -> usize {
        self.session.chain.len() + self.session.files().len()
    }

    /// Row at a list position.
    pub fn row_at(&self, index: usize) -> Option<Row> {
        let commits = self.session.chain.len();
        if index < commits {
            Some(Row::Commit(index))
        } else if index < self.row_count() {
            Some(Row::File(index - commits))
        } else {
            None
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.row_at(self.cursor)
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.row_count() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Build the activation event for the selected row.
    ///
    /// Only valid while `Listing`; returns `None` otherwise or when the
    /// session has no rows.
    pub fn activate(&self) -> Option<Activation> {
        if self.state != NavigatorState::Listing {
            return None;
        }
        match self.selected_row()? {
            Row::File(index) => Some(Activation::OpenFile {
                file_index: index,
                coords: self.session.describe_file(index)?,
            }),
            Row::Commit(index) => {
                let commit = self.session.chain.get(index)?;
                Some(Activation::OpenCommit {
                    commit_index: index,
                    repo: self.session.comparison.repo.clone(),
                    sha: commit.sha.clone(),
                    parent: commit.first_parent().map(str::to_string),
                })
            }
        }
    }

    /// Live view for a file, if one was opened earlier in this session.
    pub fn live_view(&self, file_index: usize) -> Option<ViewId> {
        self.live_views.get(&file_index).copied()
    }

    /// Record a newly opened view for a file and enter `Viewing`.
    pub fn note_view_opened(&mut self, file_index: usize, id: ViewId) {
        self.live_views.insert(file_index, id);
        self.enter_viewing();
    }

    /// Enter `Viewing`, remembering the originating cursor position.
    pub fn enter_viewing(&mut self) {
        if self.state == NavigatorState::Listing {
            self.state = NavigatorState::Viewing {
                origin: self.cursor,
            };
        }
    }

    /// Close signal from the viewer: back to `Listing` with focus restored
    /// to the originating row, not the top.
    pub fn viewer_closed(&mut self) {
        if let NavigatorState::Viewing { origin } = self.state {
            self.cursor = origin;
            self.state = NavigatorState::Listing;
        }
    }

    /// Tear the session down. Terminal; activation is no longer possible.
    pub fn close(&mut self) {
        self.state = NavigatorState::Closed;
    }

    /// Views owned by this session, for discarding on teardown.
    pub fn view_ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.live_views.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_compare_client::{ChangedFile, Commit, Comparison, FileStatus};

    fn session() -> Session {
        Session::new(
            "PR #1 - test",
            Comparison {
                repo: RepoId::new("o", "r"),
                base: "b1".to_string(),
                head: "h1".to_string(),
                commits: vec![
                    Commit {
                        sha: "h1".to_string(),
                        parents: vec!["m0".to_string()],
                        author: "Ada".to_string(),
                        message: "tip".to_string(),
                    },
                    Commit {
                        sha: "m0".to_string(),
                        parents: vec!["b1".to_string()],
                        author: "Grace".to_string(),
                        message: "mid".to_string(),
                    },
                ],
                files: vec![
                    ChangedFile {
                        path: "a.go".to_string(),
                        status: FileStatus::Modified,
                        additions: 3,
                        deletions: 1,
                    },
                    ChangedFile {
                        path: "b.go".to_string(),
                        status: FileStatus::Added,
                        additions: 10,
                        deletions: 0,
                    },
                ],
            },
        )
    }

    #[test]
    fn test_rows_are_commits_oldest_first_then_files_in_api_order() {
        let nav = Navigator::new(session());
        assert_eq!(nav.row_count(), 4);
        assert_eq!(nav.row_at(0), Some(Row::Commit(0)));
        assert_eq!(nav.row_at(1), Some(Row::Commit(1)));
        assert_eq!(nav.row_at(2), Some(Row::File(0)));
        assert_eq!(nav.row_at(3), Some(Row::File(1)));
        assert_eq!(nav.row_at(4), None);
        // chain is oldest-first
        assert_eq!(nav.session().chain[0].sha, "m0");
    }

    #[test]
    fn test_file_activation_carries_resolved_coordinates() {
        let mut nav = Navigator::new(session());
        nav.move_down();
        nav.move_down(); // first file row
        match nav.activate().unwrap() {
            Activation::OpenFile { file_index, coords } => {
                assert_eq!(file_index, 0);
                assert_eq!(coords.base, "b1");
                assert_eq!(coords.head, "h1");
                assert_eq!(coords.path, "a.go");
            }
            other => panic!("expected OpenFile, got {other:?}"),
        }
    }

    #[test]
    fn test_commit_activation_carries_sha_and_first_parent() {
        let nav = Navigator::new(session());
        match nav.activate().unwrap() {
            Activation::OpenCommit {
                commit_index,
                sha,
                parent,
                ..
            } => {
                assert_eq!(commit_index, 0);
                assert_eq!(sha, "m0");
                assert_eq!(parent.as_deref(), Some("b1"));
            }
            other => panic!("expected OpenCommit, got {other:?}"),
        }
    }

    #[test]
    fn test_close_signal_restores_originating_row() {
        let mut nav = Navigator::new(session());
        nav.move_down();
        nav.move_down();
        nav.move_down(); // cursor at 3
        nav.note_view_opened(1, 7);
        assert!(nav.is_viewing());
        nav.viewer_closed();
        assert_eq!(nav.state(), NavigatorState::Listing);
        assert_eq!(nav.cursor(), 3);
    }

    #[test]
    fn test_reactivating_a_file_finds_the_live_view() {
        let mut nav = Navigator::new(session());
        assert_eq!(nav.live_view(0), None);
        nav.note_view_opened(0, 42);
        nav.viewer_closed();
        assert_eq!(nav.live_view(0), Some(42));
        assert_eq!(nav.live_view(1), None);
    }

    #[test]
    fn test_closed_navigator_cannot_activate() {
        let mut nav = Navigator::new(session());
        nav.close();
        assert!(nav.is_closed());
        assert!(nav.activate().is_none());
    }

    #[test]
    fn test_no_activation_while_viewing() {
        let mut nav = Navigator::new(session());
        nav.enter_viewing();
        assert!(nav.activate().is_none());
    }

    #[test]
    fn test_cursor_stays_within_rows() {
        let mut nav = Navigator::new(session());
        for _ in 0..10 {
            nav.move_down();
        }
        assert_eq!(nav.cursor(), 3);
        for _ in 0..10 {
            nav.move_up();
        }
        assert_eq!(nav.cursor(), 0);
    }
}
