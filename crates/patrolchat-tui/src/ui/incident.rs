//! Incident panel
//!
//! Shows where the current incident is, or that no position is known.

use patrolchat_app::incident::{Incident, LocationView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::Theme;

/// Render the incident panel.
pub fn render(frame: &mut Frame, incident: &Incident, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Einsatzort ");

    let lines = match incident.location_view() {
        LocationView::Unavailable => vec![Line::from(Span::styled(
            "Keine GPS-Koordinaten verfügbar",
            Style::default().fg(theme.text_muted),
        ))],
        LocationView::Located { coordinates, priority } => {
            let mut lines = Vec::new();
            if let Some(title) = &incident.title {
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )));
            }
            if let Some(address) = &incident.address {
                lines.push(Line::from(Span::styled(
                    address.clone(),
                    Style::default().fg(theme.text_secondary),
                )));
            }
            lines.push(Line::from(coordinates.to_string()));
            lines.push(Line::from(Span::styled(
                format!(" {} ", incident.priority_label()),
                Style::default().bg(theme.priority_color(priority)).fg(Color::White),
            )));
            lines.push(Line::from(Span::styled(
                coordinates.maps_url(),
                Style::default().fg(theme.primary).add_modifier(Modifier::UNDERLINED),
            )));
            lines
        },
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
