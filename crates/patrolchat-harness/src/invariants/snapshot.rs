//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the App at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use chrono::{DateTime, Utc};
use patrolchat_app::{App, ChannelId, ConversationId, UserId, View};

/// Snapshot of the App's observable state.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    /// Visible screen.
    pub view: View,
    /// Selected channel id.
    pub selected_channel: ChannelId,
    /// Id of the direct-message partner, if any.
    pub selected_user: Option<UserId>,
    /// Local user id, if known.
    pub actor: Option<UserId>,
    /// Conversation the transcript is bound to.
    pub transcript_conversation: ConversationId,
    /// Creation time of each transcript message, in display order.
    pub message_times: Vec<DateTime<Utc>>,
    /// Ids of the projected roster rows, in display order.
    pub roster_ids: Vec<UserId>,
    /// Highlighted roster row.
    pub roster_cursor: usize,
    /// Input line length in characters.
    pub input_chars: usize,
    /// Input cursor, in characters.
    pub input_cursor: usize,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        Self {
            view: app.view(),
            selected_channel: app.selected_channel().clone(),
            selected_user: app.selected_user().map(|user| user.id.clone()),
            actor: app.actor().map(|actor| actor.id.clone()),
            transcript_conversation: app.transcript().conversation().clone(),
            message_times: app.messages().iter().map(|m| m.created_at).collect(),
            roster_ids: app.roster().iter().map(|entry| entry.id.clone()).collect(),
            roster_cursor: app.roster_cursor(),
            input_chars: app.input().chars().count(),
            input_cursor: app.input_cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use patrolchat_app::{Actor, AppConfig, AppEvent, KeyInput};

    use super::*;

    #[test]
    fn captures_fresh_app() {
        let app = App::new(Some(Actor::new("u1", "Alice")), AppConfig::default());
        let snapshot = AppSnapshot::from_app(&app);

        assert_eq!(snapshot.view, View::Channels);
        assert_eq!(snapshot.selected_channel.as_str(), "allgemein");
        assert_eq!(snapshot.actor.as_ref().map(UserId::as_str), Some("u1"));
        assert_eq!(
            snapshot.transcript_conversation,
            ConversationId::Channel(ChannelId::new("allgemein"))
        );
        assert!(snapshot.roster_ids.is_empty());
    }

    #[test]
    fn counts_input_in_characters() {
        let mut app = App::new(None, AppConfig::default());
        for c in "Grüße".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let snapshot = AppSnapshot::from_app(&app);
        assert_eq!(snapshot.input_chars, 5);
        assert_eq!(snapshot.input_cursor, 5);
    }
}
