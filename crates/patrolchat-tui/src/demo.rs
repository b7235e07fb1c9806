//! Built-in roster used when no roster file is given.

use patrolchat_app::{StatusRoster, UserStatusRecord};

/// A small station roster covering every presence state.
pub fn demo_roster() -> StatusRoster {
    let mut roster = StatusRoster::new();
    roster.insert("online".into(), vec![
        UserStatusRecord::new("1", "Anna Berger").online(true).with_rank("Kommissarin"),
        UserStatusRecord::new("2", "Jonas Keller").online(true).with_rank("Polizeimeister"),
        UserStatusRecord::new("3", "Murat Demir").online(true).with_status("busy"),
    ]);
    roster.insert("away".into(), vec![
        UserStatusRecord::new("4", "Lena Vogt").online(true).with_status("away"),
    ]);
    roster.insert("offline".into(), vec![
        UserStatusRecord::new("5", "Peter Hahn").online(false).with_rank("Hauptkommissar"),
        UserStatusRecord::new("6", "Sara").online(false),
    ]);
    roster
}
