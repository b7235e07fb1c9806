//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use crate::state::{ConversationId, Correspondent};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send a message.
    SendMessage {
        /// Target conversation.
        conversation: ConversationId,
        /// Trimmed message text.
        content: String,
        /// Author of the message.
        sender: Correspondent,
        /// Who a synthetic reply would come from.
        reply_as: Correspondent,
    },

    /// Drop anything still scheduled for a conversation whose transcript was
    /// discarded.
    CancelReplies {
        /// Conversation that was left.
        conversation: ConversationId,
    },
}
