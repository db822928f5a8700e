//! Rendering for the session list and the two-pane comparison view.

pub mod session_list;
pub mod split_view;
