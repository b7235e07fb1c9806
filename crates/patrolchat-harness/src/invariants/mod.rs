//! Properties of the chat views that hold after every render.
//!
//! Scripted tests and fuzzers drive the [`App`](patrolchat_app::App) through
//! arbitrary key and roster sequences. After each step the driver captures an
//! [`AppSnapshot`] and runs every registered [`Invariant`] over it, so a bad
//! transition is caught at the step that caused it rather than at the end of a
//! scenario.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.check_all(&AppSnapshot::from_app(&app))?;
//! ```

use std::fmt;

mod checks;
mod snapshot;

pub use checks::{
    ActorExcludedFromRoster, InputCursorInBounds, RosterCursorInBounds, TranscriptMatchesView,
    TranscriptOrdered,
};
pub use snapshot::AppSnapshot;

/// Outcome of a single check.
pub type InvariantResult = Result<(), Violation>;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// Transcript addresses the selected channel or the selected user.
    TranscriptMatchesView,
    /// The actor never appears in the projected roster.
    ActorExcludedFromRoster,
    /// Roster highlight points at an existing row.
    RosterCursorInBounds,
    /// Input cursor stays within the input line.
    InputCursorInBounds,
    /// Transcript timestamps never go backwards.
    TranscriptOrdered,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TranscriptMatchesView => "transcript_matches_view",
            Self::ActorExcludedFromRoster => "actor_excluded_from_roster",
            Self::RosterCursorInBounds => "roster_cursor_in_bounds",
            Self::InputCursorInBounds => "input_cursor_in_bounds",
            Self::TranscriptOrdered => "transcript_ordered",
        };
        f.write_str(name)
    }
}

/// A failed check and the state that tripped it.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Failed property.
    pub invariant: InvariantKind,
    /// Offending values, e.g. `cursor 3 with 2 rows`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violated ({})", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property checked against a captured [`AppSnapshot`].
pub trait Invariant: Send + Sync {
    /// Invariant identity for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Inspect `state`; an `Err` carries the offending values.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;
}

/// Set of properties checked together.
pub struct InvariantRegistry {
    checks: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Registry with nothing in it.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Every property in [`InvariantKind`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(TranscriptMatchesView);
        registry.add(ActorExcludedFromRoster);
        registry.add(RosterCursorInBounds);
        registry.add(InputCursorInBounds);
        registry.add(TranscriptOrdered);
        registry
    }

    /// Register one more property.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.checks.push(Box::new(invariant));
    }

    /// Run every property, collecting all failures.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for check in &self.checks {
            if let Err(violation) = check.check(state) {
                violations.push(violation);
            }
        }

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Like [`check_all`](Self::check_all) but panics, naming `context`.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        let Err(violations) = self.check_all(state) else { return };
        let lines = violations.iter().map(|v| format!("  {v}")).collect::<Vec<_>>().join("\n");
        panic!("{} invariant(s) broken {context}:\n{lines}", violations.len());
    }

    /// Registered property count.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use patrolchat_app::{Actor, App, AppConfig};

    use super::*;

    #[test]
    fn standard_covers_every_kind() {
        assert_eq!(InvariantRegistry::standard().len(), 5);
        assert!(InvariantRegistry::new().is_empty());
    }

    #[test]
    fn fresh_app_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let app = App::new(Some(Actor::new("u1", "Alice")), AppConfig::default());
        assert!(registry.check_all(&AppSnapshot::from_app(&app)).is_ok());
    }

    #[test]
    fn violation_display_names_invariant() {
        let violation =
            Violation { invariant: InvariantKind::RosterCursorInBounds, message: "3 >= 2".into() };
        assert_eq!(violation.to_string(), "roster_cursor_in_bounds violated (3 >= 2)");
    }
}
