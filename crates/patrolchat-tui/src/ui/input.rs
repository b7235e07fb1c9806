//! Input line
//!
//! Displays the input buffer with cursor, or a placeholder naming the
//! addressed conversation while empty.

use patrolchat_app::{App, View};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::Theme;

const PROMPT_WIDTH: u16 = 3; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border));

    let paragraph = if app.input().is_empty() {
        Paragraph::new(format!("> {}", placeholder(app))).style(Style::default().fg(theme.text_muted))
    } else {
        Paragraph::new(format!("> {}", app.input())).style(Style::default().fg(theme.text))
    };
    frame.render_widget(paragraph.block(block), area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (app.input_cursor() as u16).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}

fn placeholder(app: &App) -> String {
    match app.view() {
        View::Channels => format!("Nachricht in {}...", super::conversation_title(app)),
        View::Chat => format!("Nachricht an {}...", super::conversation_title(app)),
        View::UserList => "Enter öffnet den Chat, Esc zurück".to_string(),
    }
}
