//! Fuzz target for roster parsing and projection
//!
//! Harden the status feed boundary against malformed upstream JSON
//!
//! # Strategy
//!
//! - Raw bytes: arbitrary input handed to the JSON deserializer
//! - Actor choice: no actor, or an id taken from the parsed records
//!
//! # Invariants
//!
//! - NEVER panic on malformed JSON
//! - Projection length equals record count minus actor occurrences
//! - The actor id never appears in the projection
//! - Every entry has a role and a short avatar

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patrolchat_app::{StatusRoster, UserId, roster};

#[derive(Debug, Arbitrary)]
struct Input {
    json: Vec<u8>,
    actor_pick: Option<u8>,
}

fuzz_target!(|input: Input| {
    let Ok(source) = serde_json::from_slice::<StatusRoster>(&input.json) else {
        return;
    };

    let records: Vec<_> = source.values().flatten().collect();
    let actor: Option<UserId> = input
        .actor_pick
        .and_then(|pick| records.get(pick as usize % records.len().max(1)))
        .map(|record| record.id.clone());

    let entries = roster::project(&source, actor.as_ref());

    let actor_rows = actor.as_ref().map_or(0, |id| records.iter().filter(|r| &r.id == id).count());
    assert_eq!(entries.len(), records.len() - actor_rows);

    if let Some(actor) = &actor {
        assert!(entries.iter().all(|entry| &entry.id != actor));
    }
    for entry in &entries {
        assert!(!entry.role.is_empty());
        // Uppercasing can expand one letter to up to three characters.
        assert!(entry.avatar.chars().count() <= 2 * 3, "avatar {:?}", entry.avatar);
    }
});
