//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use patrolchat_app::{ConversationId, View};

use super::{AppSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

/// The transcript must belong to what the user is looking at.
///
/// On the channel list it addresses the selected channel, in a chat it
/// addresses the selected user. The user directory keeps whichever of the two
/// it was entered from.
pub struct TranscriptMatchesView;

impl Invariant for TranscriptMatchesView {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TranscriptMatchesView
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let channel = ConversationId::Channel(state.selected_channel.clone());
        let direct = state.selected_user.clone().map(ConversationId::Direct);
        let actual = &state.transcript_conversation;

        let holds = match state.view {
            View::Channels => *actual == channel,
            View::Chat => direct.as_ref() == Some(actual),
            View::UserList => *actual == channel || direct.as_ref() == Some(actual),
        };

        if holds {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "view {:?}: transcript bound to {actual}, selected channel #{}, selected user {:?}",
                    state.view, state.selected_channel, state.selected_user
                ),
            })
        }
    }
}

/// The local user never appears in the projected roster.
pub struct ActorExcludedFromRoster;

impl Invariant for ActorExcludedFromRoster {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ActorExcludedFromRoster
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let Some(actor) = &state.actor else {
            return Ok(());
        };
        if let Some(position) = state.roster_ids.iter().position(|id| id == actor) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("actor {actor} listed at roster row {position}"),
            });
        }
        Ok(())
    }
}

/// The roster highlight points at an existing row, or at 0 when empty.
pub struct RosterCursorInBounds;

impl Invariant for RosterCursorInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::RosterCursorInBounds
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let len = state.roster_ids.len();
        let holds =
            if len == 0 { state.roster_cursor == 0 } else { state.roster_cursor < len };
        if holds {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.kind(),
                message: format!("cursor {} with {len} roster rows", state.roster_cursor),
            })
        }
    }
}

/// The input cursor never passes the end of the line.
pub struct InputCursorInBounds;

impl Invariant for InputCursorInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::InputCursorInBounds
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if state.input_cursor > state.input_chars {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "cursor {} past end of {}-char input",
                    state.input_cursor, state.input_chars
                ),
            });
        }
        Ok(())
    }
}

/// Messages are kept in the order they were created.
///
/// Own messages are appended on confirmation and replies arrive strictly
/// later, so timestamps must be non-decreasing.
pub struct TranscriptOrdered;

impl Invariant for TranscriptOrdered {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TranscriptOrdered
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        for (index, window) in state.message_times.windows(2).enumerate() {
            if window[1] < window[0] {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "message {} at {} precedes message {index} at {}",
                        index + 1,
                        window[1],
                        window[0]
                    ),
                });
            }
        }
        Ok(())
    }
}
