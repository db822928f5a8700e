//! Application state and key handling
//!
//! Holds the session stack (drill-down pushes a nested session, closing it
//! pops back to the parent), the shared viewer, and the status line. All
//! network work happens here, synchronously, via `Runtime::block_on`: the
//! interaction blocks until the fetch completes or fails, and a failed
//! fetch surfaces on the status line without creating any partial state.

use crate::engine::Engine;
use crate::navigator::{Activation, Navigator};
use crate::session::{FileCoordinates, Session};
use crate::ui;
use crate::viewer::{ComparisonViewer, TuiViewer, ViewRequest};
use gh_compare_client::RemoteClient;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use tokio::runtime::Runtime;

fn short(revision: &str) -> &str {
    revision.get(..8).unwrap_or(revision)
}

pub struct App {
    engine: Engine<RemoteClient>,
    runtime: Runtime,
    stack: Vec<Navigator>,
    viewer: TuiViewer,
    status: Option<String>,
    running: bool,
}

impl App {
    pub fn new(engine: Engine<RemoteClient>, runtime: Runtime, root: Session) -> Self {
        Self {
            engine,
            runtime,
            stack: vec![Navigator::new(root)],
            viewer: TuiViewer::new(),
            status: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn current(&self) -> Option<&Navigator> {
        self.stack.last()
    }

    fn current_mut(&mut self) -> Option<&mut Navigator> {
        self.stack.last_mut()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        let viewing = self.current().is_some_and(Navigator::is_viewing);
        if viewing {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.close_view(),
                KeyCode::Down | KeyCode::Char('j') => self.viewer.scroll_focused(1),
                KeyCode::Up | KeyCode::Char('k') => self.viewer.scroll_focused(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => self.viewer.scroll_focused(20),
                KeyCode::PageUp => self.viewer.scroll_focused(-20),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.close_session(),
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(nav) = self.current_mut() {
                        nav.move_down();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if let Some(nav) = self.current_mut() {
                        nav.move_up();
                    }
                }
                KeyCode::Enter => self.activate(),
                _ => {}
            }
        }
    }

    /// Close signal for the focused comparison view: back to the list with
    /// the originating row selected. The view itself stays live for reuse.
    fn close_view(&mut self) {
        self.viewer.blur();
        if let Some(nav) = self.current_mut() {
            nav.viewer_closed();
        }
    }

    /// Tear down the current session. A nested session pops back to its
    /// parent; closing the root session ends the program.
    fn close_session(&mut self) {
        if let Some(mut nav) = self.stack.pop() {
            nav.close();
            let ids: Vec<_> = nav.view_ids().collect();
            for id in ids {
                self.viewer.discard(id);
            }
        }
        match self.stack.last_mut() {
            // the parent was Viewing the nested session; restore its focus
            Some(parent) => parent.viewer_closed(),
            None => self.running = false,
        }
    }

    fn activate(&mut self) {
        let Some(activation) = self.current().and_then(Navigator::activate) else {
            return;
        };
        match activation {
            Activation::OpenFile { file_index, coords } => self.open_file(file_index, &coords),
            Activation::OpenCommit {
                repo, sha, parent, ..
            } => {
                let result = self
                    .runtime
                    .block_on(self.engine.open_commit(&repo, &sha, parent.as_deref()));
                match result {
                    Ok(session) => {
                        if let Some(nav) = self.current_mut() {
                            nav.enter_viewing();
                        }
                        self.stack.push(Navigator::new(session));
                    }
                    Err(e) => self.status = Some(format!("{e:#}")),
                }
            }
        }
    }

    fn open_file(&mut self, file_index: usize, coords: &FileCoordinates) {
        // at most one live view per file per session
        if let Some(id) = self.current().and_then(|nav| nav.live_view(file_index)) {
            self.viewer.focus(id);
            if let Some(nav) = self.current_mut() {
                nav.enter_viewing();
            }
            return;
        }

        match self.runtime.block_on(self.engine.resolve_sides(coords)) {
            Ok((base_content, head_content)) => {
                let request = ViewRequest {
                    label: format!("{} {}", coords.repo, coords.path),
                    base_name: format!("{} @ {}", coords.path, short(&coords.base)),
                    base_content,
                    head_name: format!("{} @ {}", coords.path, short(&coords.head)),
                    head_content,
                };
                let id = self.viewer.open(request);
                if let Some(nav) = self.current_mut() {
                    nav.note_view_opened(file_index, id);
                }
            }
            Err(e) => self.status = Some(format!("{e:#}")),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let Some(nav) = self.current() else {
            return;
        };
        if nav.is_viewing() {
            if let Some(view) = self.viewer.focused() {
                ui::split_view::render(frame, frame.area(), view);
                return;
            }
        }
        ui::session_list::render(frame, frame.area(), nav, self.status.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_compare_client::{Comparison, RepoId};
    use gh_content_cache::ContentCache;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, ratatui::crossterm::event::KeyModifiers::NONE)
    }

    fn empty_session(description: &str) -> Session {
        Session::new(
            description,
            Comparison {
                repo: RepoId::new("o", "r"),
                base: "b1".to_string(),
                head: "h1".to_string(),
                commits: vec![],
                files: vec![],
            },
        )
    }

    fn app() -> App {
        let engine = Engine::new(RemoteClient::new(None).unwrap(), Arc::new(ContentCache::new()));
        let runtime = Runtime::new().unwrap();
        App::new(engine, runtime, empty_session("root"))
    }

    #[test]
    fn test_closing_the_root_session_ends_the_program() {
        let mut app = app();
        assert!(app.is_running());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn test_closing_a_nested_session_restores_the_parent() {
        let mut app = app();
        app.current_mut().unwrap().enter_viewing();
        app.stack.push(Navigator::new(empty_session("nested")));

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.is_running());
        assert_eq!(app.stack.len(), 1);
        assert!(!app.current().unwrap().is_viewing());
    }

    #[test]
    fn test_keys_route_to_the_innermost_session() {
        let mut app = app();
        app.current_mut().unwrap().enter_viewing();
        app.stack.push(Navigator::new(empty_session("nested")));

        // movement keys act on the nested navigator, not the parent
        app.handle_key(key(KeyCode::Down));
        assert!(app.stack[0].is_viewing());
        assert!(!app.stack[1].is_viewing());
    }
}
