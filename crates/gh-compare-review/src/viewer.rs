//! Comparison viewer boundary
//!
//! The navigator does not render diffs itself. It hands two named content
//! blobs and a display label to whatever implements [`ComparisonViewer`]
//! and later receives a close signal from the host loop. The viewer is
//! instrumented: it receives data and holds view state, but performs no
//! fetching of its own.

use std::collections::HashMap;

/// Identifier of one live comparison view.
pub type ViewId = usize;

/// Everything a viewer needs to show one two-pane comparison.
///
/// Either side may be empty: an added file has empty base content, a
/// deleted file has empty head content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    /// Display label identifying repository, path, and revisions.
    pub label: String,
    /// Name of the base side (e.g. `a.go @ b1c2d3e4`).
    pub base_name: String,
    /// Base-side content.
    pub base_content: String,
    /// Name of the head side.
    pub head_name: String,
    /// Head-side content.
    pub head_content: String,
}

/// A host that can display two-pane comparisons.
pub trait ComparisonViewer {
    /// Open a new view and focus it, returning its identifier.
    fn open(&mut self, request: ViewRequest) -> ViewId;

    /// Re-focus an already-open view.
    fn focus(&mut self, id: ViewId);

    /// Discard a view (called when its owning session is torn down).
    fn discard(&mut self, id: ViewId);
}

/// One open two-pane view plus its scroll position.
#[derive(Debug, Clone)]
pub struct SplitView {
    pub request: ViewRequest,
    pub scroll: u16,
}

/// The in-terminal viewer: an arena of open views, one focused at a time.
///
/// Views stay alive when the user returns to the session list, so
/// re-activating the same file re-focuses the existing view with its
/// scroll position intact instead of building a duplicate.
#[derive(Debug, Default)]
pub struct TuiViewer {
    views: HashMap<ViewId, SplitView>,
    focused: Option<ViewId>,
    next_id: ViewId,
}

impl TuiViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused view, if any.
    pub fn focused(&self) -> Option<&SplitView> {
        self.focused.and_then(|id| self.views.get(&id))
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Drop focus without discarding the view (close signal from the host).
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Scroll the focused view by `delta` lines (negative scrolls up).
    pub fn scroll_focused(&mut self, delta: i32) {
        if let Some(view) = self.focused.and_then(|id| self.views.get_mut(&id)) {
            let scroll = i32::from(view.scroll) + delta;
            view.scroll = scroll.clamp(0, i32::from(u16::MAX)) as u16;
        }
    }
}

impl ComparisonViewer for TuiViewer {
    fn open(&mut self, request: ViewRequest) -> ViewId {
        let id = self.next_id;
        self.next_id += 1;
        self.views.insert(id, SplitView { request, scroll: 0 });
        self.focused = Some(id);
        id
    }

    fn focus(&mut self, id: ViewId) {
        if self.views.contains_key(&id) {
            self.focused = Some(id);
        }
    }

    fn discard(&mut self, id: ViewId) {
        self.views.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }
}
