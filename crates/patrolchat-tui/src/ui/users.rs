//! User directory
//!
//! One row per roster entry: presence dot, initials, name, role and status.
//! The highlighted row is picked with Enter.

use patrolchat_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::Theme;

const PRESENCE_DOT: &str = "●";
const HIGHLIGHT_SYMBOL: &str = "> ";

/// Render the user directory.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Benutzer ({}) ", app.roster().len()));

    if app.roster().is_empty() {
        let empty = ListItem::new(Line::from(Span::styled(
            "Keine registrierten Benutzer gefunden",
            Style::default().fg(theme.text_muted),
        )));
        frame.render_widget(List::new(vec![empty]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .roster()
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(PRESENCE_DOT, Style::default().fg(theme.status_color(entry.status))),
                Span::raw(" "),
                Span::styled(
                    format!("{:<2}", entry.avatar),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(entry.username.clone(), Style::default().fg(theme.text)),
                Span::styled(format!(" · {}", entry.role), Style::default().fg(theme.text_secondary)),
                Span::styled(format!(" [{}]", entry.status), Style::default().fg(theme.text_muted)),
            ];
            if let Some(department) = &entry.department {
                spans.push(Span::styled(
                    format!(" {department}"),
                    Style::default().fg(theme.text_muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.roster_cursor()));

    frame.render_stateful_widget(list, area, &mut state);
}
