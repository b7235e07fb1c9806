//! Deterministic simulation harness for patrolchat.
//!
//! Virtual-clock implementations of the [`patrolchat_app::Environment`] and
//! [`patrolchat_app::Driver`] traits, so the production
//! [`patrolchat_app::Runtime`] can be replayed step by step with a seed.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! App invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActorExcludedFromRoster, AppSnapshot, InputCursorInBounds, Invariant, InvariantKind,
    InvariantRegistry, InvariantResult, RosterCursorInBounds, TranscriptMatchesView,
    TranscriptOrdered, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::{SimEnv, SimInstant};
