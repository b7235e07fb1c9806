//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the client completely decoupled from I/O and from the reply
//! simulation.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the visible view, the selected channel and the selected user.
//! - Owns the input line and the transcript of the active conversation.
//! - Keeps the projected roster in sync with its source and the actor.
//!
//! # Conversations
//!
//! The transcript is bound to exactly one [`ConversationId`]. Whenever the
//! addressing target changes the transcript is discarded and a
//! [`AppAction::CancelReplies`] is emitted for the conversation that was
//! left, so nothing scheduled for it can land in the new one.

use crate::{
    AppAction, AppEvent, KeyInput,
    input::InputBuffer,
    roster::{self, RosterEntry, StatusRoster},
    state::{
        Actor, CHANNELS, Channel, ChannelId, ConversationId, Correspondent,
        DEFAULT_TRANSCRIPT_LIMIT, Message, Transcript, View, find_channel,
    },
};

/// Static configuration for [`App`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Channel to open on start. Falls back to the first channel when absent
    /// or unknown.
    pub initial_channel: Option<ChannelId>,
    /// Maximum messages kept in a transcript.
    pub transcript_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { initial_channel: None, transcript_limit: DEFAULT_TRANSCRIPT_LIMIT }
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Local user. `None` if unknown.
    actor: Option<Actor>,
    /// Visible screen.
    view: View,
    /// Selected channel (not validated).
    selected_channel: ChannelId,
    /// Direct-message partner. `None` until a user is picked.
    selected_user: Option<RosterEntry>,
    /// Messages of the addressed conversation.
    transcript: Transcript,
    /// Capacity for new transcripts.
    transcript_limit: usize,
    /// Input line.
    input: InputBuffer,
    /// Roster as delivered upstream.
    roster_source: StatusRoster,
    /// Projection of `roster_source` without the actor.
    roster: Vec<RosterEntry>,
    /// Highlighted roster row.
    roster_cursor: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App on the channel list.
    pub fn new(actor: Option<Actor>, config: AppConfig) -> Self {
        let selected_channel = config
            .initial_channel
            .filter(|id| find_channel(id).is_some())
            .unwrap_or_else(|| CHANNELS[0].channel_id());
        let transcript = Transcript::new(
            ConversationId::Channel(selected_channel.clone()),
            config.transcript_limit,
        );

        Self {
            actor,
            view: View::Channels,
            selected_channel,
            selected_user: None,
            transcript,
            transcript_limit: config.transcript_limit,
            input: InputBuffer::new(),
            roster_source: StatusRoster::new(),
            roster: Vec::new(),
            roster_cursor: 0,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::RosterUpdated(source) => {
                self.roster_source = source;
                self.reproject();
                vec![AppAction::Render]
            },
            AppEvent::ActorChanged(actor) => {
                self.actor = actor;
                self.reproject();
                vec![AppAction::Render]
            },
            AppEvent::MessageSent { conversation, message } => {
                if conversation != *self.transcript.conversation() {
                    tracing::debug!(%conversation, "dropping own message for inactive conversation");
                    return vec![];
                }
                self.append(message);
                vec![AppAction::Render]
            },
            AppEvent::MessageReceived { conversation, message } => {
                if conversation != *self.transcript.conversation() {
                    tracing::debug!(%conversation, "discarding reply for inactive conversation");
                    return vec![];
                }
                self.append(message);
                vec![AppAction::Render]
            },
            AppEvent::SendFailed { conversation, content, reason } => {
                tracing::warn!(%conversation, %reason, "send failed");
                self.restore_unsent(content, &reason)
            },
        }
    }

    /// Select a channel and discard the current transcript.
    ///
    /// Only valid on the channel list. The id is not validated.
    pub fn select_channel(&mut self, id: ChannelId) -> Vec<AppAction> {
        if self.view != View::Channels {
            tracing::debug!(view = ?self.view, %id, "ignoring channel selection outside channel list");
            return vec![];
        }
        tracing::debug!(%id, "channel selected");
        self.selected_channel = id.clone();
        let mut actions = self.retarget(ConversationId::Channel(id));
        actions.push(AppAction::Render);
        actions
    }

    /// Switch from the channel list to the user directory.
    pub fn open_user_list(&mut self) -> Vec<AppAction> {
        if self.view != View::Channels {
            return vec![];
        }
        self.view = View::UserList;
        self.clamp_roster_cursor();
        vec![AppAction::Render]
    }

    /// Start a direct conversation with `entry`.
    ///
    /// Only valid in the user directory.
    pub fn select_user(&mut self, entry: RosterEntry) -> Vec<AppAction> {
        if self.view != View::UserList {
            tracing::debug!(view = ?self.view, user = %entry.id, "ignoring user selection outside user list");
            return vec![];
        }
        tracing::debug!(user = %entry.id, "user selected");
        let conversation = ConversationId::Direct(entry.id.clone());
        self.selected_user = Some(entry);
        self.view = View::Chat;
        let mut actions = self.retarget(conversation);
        actions.push(AppAction::Render);
        actions
    }

    /// Go up one level: chat to user list, user list to channels.
    ///
    /// No-op on the channel list.
    pub fn go_back(&mut self) -> Vec<AppAction> {
        match self.view {
            View::Channels => vec![],
            View::Chat => {
                self.view = View::UserList;
                self.clamp_roster_cursor();
                vec![AppAction::Render]
            },
            View::UserList => {
                self.view = View::Channels;
                let channel = ConversationId::Channel(self.selected_channel.clone());
                let mut actions = if *self.transcript.conversation() == channel {
                    vec![]
                } else {
                    self.retarget(channel)
                };
                actions.push(AppAction::Render);
                actions
            },
        }
    }

    /// Send the input line to the active conversation.
    ///
    /// Whitespace-only input is ignored and left in place. The line is
    /// cleared before the message is confirmed and restored if sending fails.
    pub fn send(&mut self) -> Vec<AppAction> {
        let content = self.input.text().trim().to_string();
        self.send_content(content)
    }

    fn send_content(&mut self, content: String) -> Vec<AppAction> {
        if content.is_empty() {
            return vec![];
        }
        let Some(conversation) = self.active_conversation() else {
            self.status_message = Some("Pick a user before sending".into());
            return vec![AppAction::Render];
        };
        self.input.take();

        let reply_as = match (self.view, &self.selected_user) {
            (View::Chat, Some(user)) => Correspondent::new(user.id.as_str(), &user.username),
            _ => Correspondent::placeholder(),
        };

        vec![
            AppAction::SendMessage {
                conversation,
                content,
                sender: Correspondent::for_actor(self.actor.as_ref()),
                reply_as,
            },
            AppAction::Render,
        ]
    }

    /// Replace the input line.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input.set(text);
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Conversation the input line currently addresses. `None` in the user
    /// directory.
    pub fn active_conversation(&self) -> Option<ConversationId> {
        match self.view {
            View::Channels => Some(ConversationId::Channel(self.selected_channel.clone())),
            View::Chat => self.selected_user.as_ref().map(|u| ConversationId::Direct(u.id.clone())),
            View::UserList => None,
        }
    }

    /// Visible screen.
    pub fn view(&self) -> View {
        self.view
    }

    /// Local user. `None` if unknown.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// Selected channel id.
    pub fn selected_channel(&self) -> &ChannelId {
        &self.selected_channel
    }

    /// Selected channel, if the id names a known channel.
    pub fn selected_channel_info(&self) -> Option<&'static Channel> {
        find_channel(&self.selected_channel)
    }

    /// Direct-message partner. `None` until a user is picked.
    pub fn selected_user(&self) -> Option<&RosterEntry> {
        self.selected_user.as_ref()
    }

    /// Transcript of the addressed conversation.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Messages of the addressed conversation.
    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Projected roster.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Highlighted roster row.
    pub fn roster_cursor(&self) -> usize {
        self.roster_cursor
    }

    /// Input line contents.
    pub fn input(&self) -> &str {
        self.input.text()
    }

    /// Cursor position in the input line, in characters.
    pub fn input_cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Enter => self.handle_enter(),
            KeyInput::Esc => {
                if self.view == View::Channels {
                    self.quit()
                } else {
                    self.go_back()
                }
            },
            KeyInput::Tab | KeyInput::Down if self.view == View::Channels => self.cycle_channel(1),
            KeyInput::Up if self.view == View::Channels => self.cycle_channel(CHANNELS.len() - 1),
            KeyInput::Up if self.view == View::UserList => {
                self.roster_cursor = self.roster_cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Down if self.view == View::UserList => {
                self.roster_cursor += 1;
                self.clamp_roster_cursor();
                vec![AppAction::Render]
            },
            other => {
                if self.input.apply(other) {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
        }
    }

    /// Handle Enter key (command, send, or pick highlighted user).
    ///
    /// A line starting with `//` is sent with one slash removed.
    fn handle_enter(&mut self) -> Vec<AppAction> {
        let line = self.input.text().trim().to_string();
        if let Some(literal) = line.strip_prefix("//") {
            return self.send_content(format!("/{literal}"));
        }
        if let Some(cmd) = line.strip_prefix('/') {
            let typed = self.input.take();
            return self.handle_command(cmd, typed);
        }

        match self.view {
            View::UserList => match self.roster.get(self.roster_cursor).cloned() {
                Some(entry) => self.select_user(entry),
                None => vec![],
            },
            View::Channels | View::Chat => self.send(),
        }
    }

    /// Handle slash commands. `typed` goes back into the input line when the
    /// command is not understood.
    fn handle_command(&mut self, cmd: &str, typed: String) -> Vec<AppAction> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");

        match command {
            "users" => self.open_user_list(),
            "channel" => match parts.get(1) {
                Some(id) => self.select_channel(ChannelId::new(*id)),
                None => {
                    self.input.set(typed);
                    self.status_message = Some("Usage: /channel <id>".into());
                    vec![AppAction::Render]
                },
            },
            "back" => self.go_back(),
            "quit" | "q" => self.quit(),
            _ => {
                self.input.set(typed);
                self.status_message =
                    Some(format!("Unknown command: /{command} (start with // to send it)"));
                vec![AppAction::Render]
            },
        }
    }

    /// Select the channel `step` positions after the current one, wrapping.
    fn cycle_channel(&mut self, step: usize) -> Vec<AppAction> {
        let current = CHANNELS.iter().position(|c| c.id == self.selected_channel.as_str());
        let next = current.map_or(0, |idx| (idx + step) % CHANNELS.len());
        self.select_channel(CHANNELS[next].channel_id())
    }

    /// Bind a fresh transcript to `conversation`, cancelling whatever was
    /// pending for the old one.
    fn retarget(&mut self, conversation: ConversationId) -> Vec<AppAction> {
        let old = std::mem::replace(
            &mut self.transcript,
            Transcript::new(conversation, self.transcript_limit),
        );
        vec![AppAction::CancelReplies { conversation: old.conversation().clone() }]
    }

    fn append(&mut self, message: Message) {
        if let Some(evicted) = self.transcript.push(message) {
            tracing::trace!(id = evicted.id.as_str(), "transcript full, evicted oldest message");
        }
    }

    fn restore_unsent(&mut self, content: String, reason: &str) -> Vec<AppAction> {
        self.input.set(content);
        self.status_message = Some(format!("Error: {reason}"));
        vec![AppAction::Render]
    }

    fn reproject(&mut self) {
        self.roster = roster::project(&self.roster_source, self.actor.as_ref().map(|a| &a.id));
        self.clamp_roster_cursor();
    }

    fn clamp_roster_cursor(&mut self) {
        self.roster_cursor = self.roster_cursor.min(self.roster.len().saturating_sub(1));
    }
}
