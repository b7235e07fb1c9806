//! Chat area
//!
//! Displays the transcript of the addressed conversation, newest at the
//! bottom.

use patrolchat_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::Theme;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = super::conversation_title(app);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {title} "));

    let items: Vec<ListItem> = if app.messages().is_empty() {
        let hint = match app.selected_user().filter(|_| app.view() == patrolchat_app::View::Chat) {
            Some(user) => format!("Noch keine Nachrichten mit {}", user.username),
            None => format!("Noch keine Nachrichten in {title}"),
        };
        vec![ListItem::new(Line::from(Span::styled(hint, Style::default().fg(theme.text_muted))))]
    } else {
        app.messages()
            .iter()
            .map(|msg| {
                let sender_style = if msg.is_own {
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        msg.created_at.format("%H:%M ").to_string(),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(msg.sender_name.clone(), sender_style),
                    Span::raw(": "),
                    Span::styled(msg.content.clone(), Style::default().fg(theme.text)),
                ]))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
