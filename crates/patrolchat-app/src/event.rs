//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize), data feeds and system ticks.
//! - Results from the [`crate::Simulator`].

use crate::{
    KeyInput,
    roster::StatusRoster,
    state::{Actor, ConversationId, Message},
};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The status-grouped roster source changed.
    RosterUpdated(StatusRoster),

    /// The local actor changed (or became unknown).
    ActorChanged(Option<Actor>),

    /// Own message accepted for a conversation.
    MessageSent {
        /// Conversation the message was sent to.
        conversation: ConversationId,
        /// The authored message.
        message: Message,
    },

    /// Message from someone else arrived.
    MessageReceived {
        /// Conversation the message belongs to.
        conversation: ConversationId,
        /// The received message.
        message: Message,
    },

    /// Delivery rejected a send; the text goes back to the input line.
    ///
    /// The local [`crate::Simulator`] always confirms, so only other delivery
    /// backends and injected events produce this.
    SendFailed {
        /// Conversation the send was addressed to.
        conversation: ConversationId,
        /// Text that was not sent.
        content: String,
        /// Error description.
        reason: String,
    },
}
