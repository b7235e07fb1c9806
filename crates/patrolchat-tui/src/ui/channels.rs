//! Channel sidebar
//!
//! Lists the fixed channels, highlighting the selected one in its color.

use patrolchat_app::{App, CHANNELS};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{Theme, theme::parse_hex};

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";

/// Render the channel sidebar.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = CHANNELS
        .iter()
        .map(|channel| {
            let active = app.selected_channel().as_str() == channel.id;
            let color = parse_hex(channel.color).unwrap_or(theme.primary);

            let (prefix, style) = if active {
                (ACTIVE_PREFIX, Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                (INACTIVE_PREFIX, Style::default().fg(theme.text_secondary))
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("#{}", channel.name), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Kanäle ");
    frame.render_widget(List::new(items).block(block), area);
}
