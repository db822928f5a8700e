//! Two-pane comparison rendering
//!
//! Base content on the left, head content on the right, both scrolled in
//! lockstep. An empty pane represents the missing side of an addition or
//! deletion. No diff computation happens here: the panes show the raw
//! resolved content.

use crate::viewer::SplitView;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render one open comparison view.
pub fn render(frame: &mut Frame, area: Rect, view: &SplitView) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(view.request.label.clone())
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    frame.render_widget(
        pane(&view.request.base_name, &view.request.base_content, view.scroll),
        left,
    );
    frame.render_widget(
        pane(&view.request.head_name, &view.request.head_content, view.scroll),
        right,
    );
}

fn pane<'a>(name: &'a str, content: &'a str, scroll: u16) -> Paragraph<'a> {
    let placeholder = content.is_empty();
    let body = if placeholder { "(empty)" } else { content };
    let mut paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(name.to_string()))
        .scroll((scroll, 0));
    if placeholder {
        paragraph = paragraph.style(Style::default().fg(Color::DarkGray));
    }
    paragraph
}
