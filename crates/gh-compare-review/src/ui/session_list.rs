//! Session list rendering
//!
//! Header with the session description, then the commit chain
//! (oldest-first, `shortsha author summary`) and the changed-file list
//! (API order, `status (+a −d) - path`). Every row is activatable; the
//! highlighted row is the navigator's cursor.

use crate::navigator::{Navigator, Row};
use gh_compare_client::{ChangedFile, Commit};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const SUMMARY_WIDTH: usize = 72;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Label for one commit row: short hash, author, truncated summary.
pub fn commit_row_label(commit: &Commit) -> String {
    format!(
        "{} {} {}",
        commit.short_sha(),
        commit.author,
        truncate(commit.summary(), SUMMARY_WIDTH)
    )
}

/// Label for one file row: status tag, compact change counts, path.
pub fn file_row_label(file: &ChangedFile) -> String {
    format!(
        "{} (+{} −{}) - {}",
        file.status, file.additions, file.deletions, file.path
    )
}

/// Render the session list with the navigator's cursor highlighted.
pub fn render(frame: &mut Frame, area: Rect, navigator: &Navigator, status: Option<&str>) {
    let [header_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let session = navigator.session();
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            session.description.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}...{}",
            session.comparison.base, session.comparison.head
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, header_area);

    let items: Vec<ListItem> = (0..navigator.row_count())
        .filter_map(|i| navigator.row_at(i))
        .map(|row| match row {
            Row::Commit(i) => ListItem::new(commit_row_label(&session.chain[i]))
                .style(Style::default().fg(Color::Yellow)),
            Row::File(i) => ListItem::new(file_row_label(&session.files()[i])),
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(navigator.cursor()));
    frame.render_stateful_widget(list, list_area, &mut state);

    let status_line = status.unwrap_or("enter: open  q: close  j/k: move");
    frame.render_widget(
        Paragraph::new(status_line).style(Style::default().fg(Color::DarkGray)),
        status_area,
    );
}
