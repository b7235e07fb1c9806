//! Header bar
//!
//! Station name on the left, the signed-in user on the right.

use patrolchat_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

const STATION_NAME: &str = "Stadtwache Schwelm";

/// Render the header bar.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let style = Style::default().bg(theme.primary).fg(Color::White);
    let actor = app.actor().map(|actor| format!("{} ", actor.username)).unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(actor.chars().count() as u16)])
        .split(area);
    let [title_area, actor_area] = chunks.as_ref() else {
        return;
    };

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(STATION_NAME, Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .style(style);
    frame.render_widget(title, *title_area);
    frame.render_widget(Paragraph::new(actor).style(style), *actor_area);
}
