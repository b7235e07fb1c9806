//! Local message delivery with synthetic replies.
//!
//! The [`Simulator`] stands where a network client would: it accepts
//! [`crate::AppAction::SendMessage`], confirms the message immediately (there
//! is no server) and sometimes schedules a canned reply from a colleague.
//!
//! # Scheduling
//!
//! Replies are queued with a due instant and bound to the conversation they
//! answer. They are released by [`Simulator::handle_tick`] and dropped by
//! [`crate::AppAction::CancelReplies`] when that conversation is left.
//! Generic over [`Environment`] so the same code runs against a virtual clock
//! and a seeded RNG in simulation.

use std::{collections::VecDeque, time::Duration};

use crate::{
    AppAction, AppEvent,
    env::Environment,
    state::{ConversationId, Correspondent, Message, MessageId},
};

/// Canned reply texts.
pub const REPLY_PHRASES: [&str; 5] =
    ["Roger that!", "Verstanden, Chef!", "Bin unterwegs", "Alles klar!", "10-4"];

/// Reply simulation settings.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// A reply is scheduled when a uniform draw in `[0, 1)` exceeds this.
    pub reply_threshold: f64,
    /// Delay between a send and its reply.
    pub reply_delay: Duration,
    /// Maximum replies waiting at once. Further replies are skipped; the own
    /// message is still confirmed.
    pub max_pending: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { reply_threshold: 0.7, reply_delay: Duration::from_millis(2000), max_pending: 64 }
    }
}

#[derive(Debug, Clone)]
struct PendingReply<I> {
    due: I,
    conversation: ConversationId,
    from: Correspondent,
}

/// Local stand-in for message delivery.
pub struct Simulator<E: Environment> {
    env: E,
    config: SimulatorConfig,
    pending: VecDeque<PendingReply<E::Instant>>,
}

impl<E: Environment> Simulator<E> {
    /// Create a simulator with the given environment and settings.
    pub fn new(env: E, config: SimulatorConfig) -> Self {
        Self { env, config, pending: VecDeque::new() }
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SendMessage { conversation, content, sender, reply_as } => {
                let message = self.send(&conversation, content, sender, reply_as);
                vec![AppEvent::MessageSent { conversation, message }]
            },
            AppAction::CancelReplies { conversation } => {
                self.cancel(&conversation);
                vec![]
            },
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    /// Release every reply that is due at `now`.
    pub fn handle_tick(&mut self, now: E::Instant) -> Vec<AppEvent> {
        let mut events = Vec::new();

        while self.pending.front().is_some_and(|reply| reply.due <= now) {
            let Some(reply) = self.pending.pop_front() else { break };
            let index = self.env.random_index(REPLY_PHRASES.len()).unwrap_or(0);
            let created_at = self.env.wall_clock();

            tracing::debug!(conversation = %reply.conversation, from = %reply.from.id, "delivering reply");
            events.push(AppEvent::MessageReceived {
                conversation: reply.conversation,
                message: Message {
                    id: MessageId::from_timestamp(created_at, 1),
                    content: REPLY_PHRASES[index].to_string(),
                    sender_name: reply.from.name,
                    sender_id: reply.from.id,
                    created_at,
                    is_own: false,
                },
            });
        }

        events
    }

    /// Replies still waiting.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Accept a message and maybe schedule a reply.
    ///
    /// The message is always confirmed. A drawn reply is skipped when the
    /// queue is full.
    fn send(
        &mut self,
        conversation: &ConversationId,
        content: String,
        sender: Correspondent,
        reply_as: Correspondent,
    ) -> Message {
        let mut wants_reply = self.env.random_unit() > self.config.reply_threshold;
        if wants_reply && self.pending.len() >= self.config.max_pending {
            tracing::warn!(
                %conversation,
                limit = self.config.max_pending,
                "reply queue full, skipping reply"
            );
            wants_reply = false;
        }

        let created_at = self.env.wall_clock();
        let message = Message {
            id: MessageId::from_timestamp(created_at, 0),
            content,
            sender_name: sender.name,
            sender_id: sender.id,
            created_at,
            is_own: true,
        };

        if wants_reply {
            let due = self.env.now() + self.config.reply_delay;
            tracing::debug!(%conversation, ?due, "reply scheduled");
            // Fixed delay keeps the queue ordered by due time.
            self.pending.push_back(PendingReply {
                due,
                conversation: conversation.clone(),
                from: reply_as,
            });
        }

        message
    }

    fn cancel(&mut self, conversation: &ConversationId) {
        let before = self.pending.len();
        self.pending.retain(|reply| reply.conversation != *conversation);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            tracing::debug!(%conversation, dropped, "cancelled pending replies");
        }
    }
}
