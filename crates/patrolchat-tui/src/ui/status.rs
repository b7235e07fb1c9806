//! Status bar
//!
//! Shows the last status message, or the key hints for the current view.

use patrolchat_app::{App, View};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let line = match app.status_message() {
        Some(message) if message.starts_with("Error") => {
            Line::from(Span::styled(format!(" {message}"), Style::default().fg(theme.error)))
        },
        Some(message) => Line::from(format!(" {message}")),
        None => Line::from(vec![
            Span::raw(" "),
            Span::raw(hints(app.view())),
            Span::styled(
                format!(" | Nachrichten: {}", app.messages().len()),
                Style::default().fg(theme.border),
            ),
        ]),
    };

    let paragraph =
        Paragraph::new(line).style(Style::default().bg(theme.text_secondary).fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn hints(view: View) -> &'static str {
    match view {
        View::Channels => "Tab: Kanal wechseln | /users: Benutzer | Esc: Beenden",
        View::UserList => "↑↓: Auswahl | Enter: Chat | Esc: Zurück",
        View::Chat => "Enter: Senden | Esc: Zurück",
    }
}
