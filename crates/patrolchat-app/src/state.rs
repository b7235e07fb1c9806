//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the world: the fixed [`Channel`] set, conversation
//! addressing ([`ConversationId`]), and the in-memory [`Transcript`] of the
//! active conversation.
//!
//! These structures serve as the "View Model" for the application. They
//! contain what a frontend needs for rendering and nothing else.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Default message capacity of a transcript. Older messages are evicted.
pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 1000;

/// Which of the three screens is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Channel list with the selected channel's transcript.
    Channels,
    /// User directory for starting a direct conversation.
    UserList,
    /// Direct-message thread with the selected user.
    Chat,
}

/// Channel identifier. Unknown ids are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(String);

impl ChannelId {
    /// Wrap a channel id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User identifier.
///
/// Upstream rosters carry either string or integer ids; both deserialize into
/// the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// A text channel. The set is fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// Stable id.
    pub id: &'static str,
    /// Display name (without the leading `#`).
    pub name: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Accent color as `#RRGGBB`.
    pub color: &'static str,
}

impl Channel {
    /// Owned id of this channel.
    pub fn channel_id(&self) -> ChannelId {
        ChannelId::new(self.id)
    }
}

/// The fixed channel set, in display order.
pub const CHANNELS: [Channel; 3] = [
    Channel { id: "allgemein", name: "allgemein", icon: "chatbubbles", color: "#5865F2" },
    Channel { id: "streife", name: "streife", icon: "car-sport", color: "#57F287" },
    Channel { id: "dienst", name: "dienst", icon: "shield-checkmark", color: "#FEE75C" },
];

/// Look up a channel by id.
pub fn find_channel(id: &ChannelId) -> Option<&'static Channel> {
    CHANNELS.iter().find(|channel| channel.id == id.as_str())
}

/// The local user operating the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Actor's user id.
    pub id: UserId,
    /// Actor's display name.
    pub username: String,
}

impl Actor {
    /// Create an actor.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self { id: UserId::new(id), username: username.into() }
    }
}

/// Identity a message is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondent {
    /// Sender id.
    pub id: UserId,
    /// Sender display name.
    pub name: String,
}

impl Correspondent {
    const FALLBACK_SELF_ID: &'static str = "test-user";
    const FALLBACK_SELF_NAME: &'static str = "Du";
    const PLACEHOLDER_ID: &'static str = "other-user";
    const PLACEHOLDER_NAME: &'static str = "Kollege";

    /// Create a correspondent.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: UserId::new(id), name: name.into() }
    }

    /// Sender identity for own messages, with fallbacks for an unknown or
    /// incomplete actor.
    pub fn for_actor(actor: Option<&Actor>) -> Self {
        let id = actor
            .map(|a| a.id.clone())
            .filter(|id| !id.as_str().is_empty())
            .unwrap_or_else(|| UserId::new(Self::FALLBACK_SELF_ID));
        let name = actor
            .map(|a| a.username.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| Self::FALLBACK_SELF_NAME.to_string());
        Self { id, name }
    }

    /// Generic colleague used for synthetic replies outside a direct thread.
    pub fn placeholder() -> Self {
        Self::new(Self::PLACEHOLDER_ID, Self::PLACEHOLDER_NAME)
    }
}

/// Addressing target of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversationId {
    /// A text channel.
    Channel(ChannelId),
    /// A direct thread with another user.
    Direct(UserId),
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "#{id}"),
            Self::Direct(id) => write!(f, "@{id}"),
        }
    }
}

/// Time-derived message identifier.
///
/// Two messages created in the same millisecond share an id; nothing relies
/// on ids being unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Id derived from a timestamp in milliseconds, plus an offset.
    pub fn from_timestamp(at: DateTime<Utc>, offset_ms: i64) -> Self {
        Self(at.timestamp_millis().saturating_add(offset_ms).to_string())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Time-derived id.
    pub id: MessageId,
    /// Message text.
    pub content: String,
    /// Display name of the sender.
    pub sender_name: String,
    /// Id of the sender.
    pub sender_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Authored by the local actor.
    pub is_own: bool,
}

/// Ordered messages of one conversation.
///
/// Holds at most `limit` messages; appending to a full transcript drops the
/// oldest one, so an append always succeeds.
#[derive(Debug, Clone)]
pub struct Transcript {
    conversation: ConversationId,
    messages: Vec<Message>,
    limit: usize,
}

impl Transcript {
    /// Create an empty transcript bound to `conversation`.
    ///
    /// A `limit` of zero is treated as one.
    pub fn new(conversation: ConversationId, limit: usize) -> Self {
        Self { conversation, messages: Vec::new(), limit: limit.max(1) }
    }

    /// Conversation this transcript belongs to.
    pub fn conversation(&self) -> &ConversationId {
        &self.conversation
    }

    /// Messages in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// No messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, returning the oldest one if it had to make room.
    pub fn push(&mut self, message: Message) -> Option<Message> {
        let evicted = if self.messages.len() >= self.limit {
            Some(self.messages.remove(0))
        } else {
            None
        };
        self.messages.push(message);
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Message {
        Message {
            id: MessageId::from_timestamp(DateTime::<Utc>::default(), 0),
            content: content.into(),
            sender_name: "Du".into(),
            sender_id: UserId::new("test-user"),
            created_at: DateTime::<Utc>::default(),
            is_own: true,
        }
    }

    #[test]
    fn fallback_sender_without_actor() {
        let sender = Correspondent::for_actor(None);
        assert_eq!(sender.id.as_str(), "test-user");
        assert_eq!(sender.name, "Du");
    }

    #[test]
    fn fallback_applies_per_field() {
        let actor = Actor::new("u7", "");
        let sender = Correspondent::for_actor(Some(&actor));
        assert_eq!(sender.id.as_str(), "u7");
        assert_eq!(sender.name, "Du");
    }

    #[test]
    fn user_id_accepts_numbers() {
        let id: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        let id: UserId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn message_id_is_millis() {
        let at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(MessageId::from_timestamp(at, 0).as_str(), "1700000000123");
        assert_eq!(MessageId::from_timestamp(at, 1).as_str(), "1700000000124");
    }

    #[test]
    fn full_transcript_evicts_oldest() {
        let mut transcript = Transcript::new(ConversationId::Channel(ChannelId::new("a")), 2);
        assert_eq!(transcript.push(message("one")), None);
        assert_eq!(transcript.push(message("two")), None);

        let evicted = transcript.push(message("three"));

        assert_eq!(evicted.map(|m| m.content), Some("one".to_string()));
        let contents: Vec<_> = transcript.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["two", "three"]);
    }

    #[test]
    fn zero_limit_still_keeps_latest() {
        let mut transcript = Transcript::new(ConversationId::Channel(ChannelId::new("a")), 0);
        transcript.push(message("one"));
        transcript.push(message("two"));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].content, "two");
    }

    #[test]
    fn unknown_channel_has_no_entry() {
        assert!(find_channel(&ChannelId::new("nope")).is_none());
        assert_eq!(find_channel(&ChannelId::new("streife")).map(|c| c.name), Some("streife"));
    }
}
