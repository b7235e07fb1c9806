//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod channels;
mod chat;
mod header;
mod incident;
mod input;
mod status;
mod users;

use patrolchat_app::{App, View, incident::Incident};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

use crate::Theme;

/// Everything besides the App that a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Palette.
    pub theme: &'a Theme,
    /// Incident shown in the side panel, if any.
    pub incident: Option<&'a Incident>,
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, ctx: RenderContext<'_>) {
    const HEADER_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    frame.render_widget(
        Block::default().style(Style::default().bg(ctx.theme.background).fg(ctx.theme.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, app, ctx.theme, *header_area);
    render_main_area(frame, app, ctx, *main_area);
    input::render(frame, app, ctx.theme, *input_area);
    status::render(frame, app, ctx.theme, *status_area);
}

/// Render the view-specific area, with the incident panel on the right.
fn render_main_area(frame: &mut Frame, app: &App, ctx: RenderContext<'_>, area: Rect) {
    const INCIDENT_PANEL_WIDTH: u16 = 36;
    const VIEW_MIN_WIDTH: u16 = 30;

    let view_area = match ctx.incident {
        Some(incident) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(VIEW_MIN_WIDTH),
                    Constraint::Length(INCIDENT_PANEL_WIDTH),
                ])
                .split(area);
            let [view_area, incident_area] = chunks.as_ref() else {
                return;
            };
            incident::render(frame, incident, ctx.theme, *incident_area);
            *view_area
        },
        None => area,
    };

    match app.view() {
        View::Channels => {
            const CHANNEL_SIDEBAR_WIDTH: u16 = 20;
            const CHAT_AREA_MIN_WIDTH: u16 = 10;

            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(CHANNEL_SIDEBAR_WIDTH),
                    Constraint::Min(CHAT_AREA_MIN_WIDTH),
                ])
                .split(view_area);
            let [channels_area, chat_area] = chunks.as_ref() else {
                return;
            };
            channels::render(frame, app, ctx.theme, *channels_area);
            chat::render(frame, app, ctx.theme, *chat_area);
        },
        View::UserList => users::render(frame, app, ctx.theme, view_area),
        View::Chat => chat::render(frame, app, ctx.theme, view_area),
    }
}

/// Display title of the addressed conversation, e.g. `#allgemein`.
fn conversation_title(app: &App) -> String {
    match (app.view(), app.selected_user()) {
        (View::Chat, Some(user)) => user.username.clone(),
        _ => {
            let name =
                app.selected_channel_info().map_or(app.selected_channel().as_str(), |c| c.name);
            format!("#{name}")
        },
    }
}

#[cfg(test)]
mod tests {
    use patrolchat_app::{
        Actor, AppConfig, AppEvent, ChannelId, KeyInput, StatusRoster, UserStatusRecord,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Render a full frame and return it as one string per row.
    fn render_rows(app: &App, incident: Option<&Incident>) -> Vec<String> {
        let theme = Theme::default();
        let ctx = RenderContext { theme: &theme, incident };
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app, ctx)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
            .collect()
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    fn app() -> App {
        let mut app = App::new(Some(Actor::new("u1", "Anna Berger")), AppConfig::default());
        let mut roster = StatusRoster::new();
        roster.insert("online".into(), vec![
            UserStatusRecord::new("u1", "Anna Berger").online(true),
            UserStatusRecord::new("u2", "Bob Brandt").online(true).with_rank("Polizeimeister"),
        ]);
        let _ = app.handle(AppEvent::RosterUpdated(roster));
        app
    }

    #[test]
    fn channels_view_shows_header_channels_and_empty_state() {
        let rows = render_rows(&app(), None);

        assert!(contains(&rows, "Stadtwache Schwelm"));
        assert!(contains(&rows, "Anna Berger"));
        assert!(contains(&rows, ">#allgemein"));
        assert!(contains(&rows, " #streife"));
        assert!(contains(&rows, "Noch keine Nachrichten in #allgemein"));
        assert!(contains(&rows, "Nachricht in #allgemein..."));
    }

    #[test]
    fn unknown_channel_is_titled_by_id() {
        let mut app = app();
        let _ = app.select_channel(ChannelId::new("kantine"));
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "Noch keine Nachrichten in #kantine"));
    }

    #[test]
    fn user_list_shows_roster_without_actor() {
        let mut app = app();
        let _ = app.open_user_list();
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "Benutzer (1)"));
        assert!(contains(&rows, "BB Bob Brandt · Polizeimeister [online]"));
        assert!(!rows.iter().skip(1).any(|row| row.contains("Anna Berger")));
    }

    #[test]
    fn empty_user_list_has_hint() {
        let mut app = App::new(None, AppConfig::default());
        let _ = app.open_user_list();
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "Keine registrierten Benutzer gefunden"));
    }

    #[test]
    fn chat_view_is_titled_by_partner() {
        let mut app = app();
        let _ = app.open_user_list();
        let bob = app.roster()[0].clone();
        let _ = app.select_user(bob);
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "Noch keine Nachrichten mit Bob Brandt"));
        assert!(contains(&rows, "Nachricht an Bob Brandt..."));
    }

    #[test]
    fn typed_input_replaces_placeholder() {
        let mut app = app();
        for c in "Lage?".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "> Lage?"));
        assert!(!contains(&rows, "Nachricht in #allgemein..."));
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = app();
        app.set_status("Unknown command: /foo");
        let rows = render_rows(&app, None);

        assert!(contains(&rows, "Unknown command: /foo"));
        assert!(!contains(&rows, "Tab: Kanal wechseln"));
    }

    #[test]
    fn incident_panel_without_coordinates() {
        let incident: Incident = serde_json::from_str(r#"{"title": "Unfall"}"#).unwrap();
        let rows = render_rows(&app(), Some(&incident));

        assert!(contains(&rows, "Einsatzort"));
        assert!(contains(&rows, "Keine GPS-Koordinaten verfügbar"));
    }

    #[test]
    fn incident_panel_with_coordinates() {
        let incident: Incident = serde_json::from_str(
            r#"{"title": "Unfall", "priority": "high", "coordinates": {"lat": 51.2877, "lng": "7.2951"}}"#,
        )
        .unwrap();
        let rows = render_rows(&app(), Some(&incident));

        assert!(contains(&rows, "51.287700, 7.295100"));
        assert!(contains(&rows, "HIGH PRIORITÄT"));
    }
}
