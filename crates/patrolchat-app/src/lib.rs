//! Application layer for patrolchat
//!
//! Pure state machines and generic runtime for a local chat client with
//! channel, user directory and direct-message views, enabling deterministic
//! simulation testing with the same code that runs in the terminal.
//!
//! # Components
//!
//! - [`App`]: UI state machine (views, selection, input line, transcript)
//! - [`roster`]: projection of a status-grouped user feed
//! - [`Simulator`]: local delivery with delayed synthetic replies
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
pub mod env;
mod event;
pub mod incident;
mod input;
pub mod roster;
mod runtime;
mod simulator;
mod state;

pub use action::AppAction;
pub use app::{App, AppConfig};
pub use driver::Driver;
pub use env::Environment;
pub use event::AppEvent;
pub use input::{InputBuffer, KeyInput};
pub use roster::{RosterEntry, RosterStatus, StatusRoster, UserStatusRecord};
pub use runtime::Runtime;
pub use simulator::{REPLY_PHRASES, Simulator, SimulatorConfig};
pub use state::{
    Actor, CHANNELS, Channel, ChannelId, ConversationId, Correspondent, DEFAULT_TRANSCRIPT_LIMIT,
    Message, MessageId, Transcript, UserId, View, find_channel,
};
