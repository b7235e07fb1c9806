//! Terminal UI for patrolchat
//!
//! A thin shell over [`patrolchat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`patrolchat_app::Runtime`].
//!
//! This crate only handles terminal rendering, input files and the production
//! environment.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod demo;
mod error;
pub mod files;
mod system_env;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use error::TuiError;
pub use system_env::SystemEnv;
pub use terminal::TerminalDriver;
pub use theme::{Theme, ThemeFile};
