//! Fuzz target for App sessions with the reply simulator in the loop
//!
//! Drive arbitrary key sequences, commands and clock jumps through App and
//! Simulator
//!
//! # Strategy
//!
//! - Keys: editing and navigation keys in any order
//! - Commands: whole slash commands, including unknown ones
//! - Waits: virtual clock jumps that release pending replies
//!
//! # Invariants
//!
//! - Standard App invariants hold after every step
//! - NEVER panic on any input sequence

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patrolchat_app::{
    Actor, App, AppAction, AppConfig, AppEvent, Environment, KeyInput, Simulator,
    SimulatorConfig, StatusRoster, UserStatusRecord,
};
use patrolchat_harness::{AppSnapshot, InvariantRegistry, SimEnv};

#[derive(Debug, Clone, Arbitrary)]
struct Session {
    seed: u64,
    transcript_limit: u8,
    max_pending: u8,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Char(char),
    Key(Key),
    Command(Command),
    Wait { millis: u16 },
}

#[derive(Debug, Clone, Arbitrary)]
enum Key {
    Enter,
    Backspace,
    Delete,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, Arbitrary)]
enum Command {
    Users,
    Back,
    Channel(u8),
    Unknown,
}

impl Key {
    fn input(&self) -> KeyInput {
        match self {
            Self::Enter => KeyInput::Enter,
            Self::Backspace => KeyInput::Backspace,
            Self::Delete => KeyInput::Delete,
            Self::Tab => KeyInput::Tab,
            Self::Esc => KeyInput::Esc,
            Self::Left => KeyInput::Left,
            Self::Right => KeyInput::Right,
            Self::Up => KeyInput::Up,
            Self::Down => KeyInput::Down,
            Self::Home => KeyInput::Home,
            Self::End => KeyInput::End,
        }
    }
}

impl Command {
    fn line(&self) -> String {
        match self {
            Self::Users => "/users".into(),
            Self::Back => "/back".into(),
            Self::Channel(n) => ["/channel allgemein", "/channel streife", "/channel dienst", "/channel"]
                [*n as usize % 4]
                .into(),
            Self::Unknown => "/einsatz".into(),
        }
    }
}

fn pump(app: &mut App, sim: &mut Simulator<SimEnv>, event: AppEvent) {
    let mut pending = app.handle(event);
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            if matches!(action, AppAction::SendMessage { .. } | AppAction::CancelReplies { .. }) {
                for event in sim.process_app_action(action) {
                    pending.extend(app.handle(event));
                }
            }
        }
    }
}

fuzz_target!(|session: Session| {
    let env = SimEnv::with_seed(session.seed);
    let config = SimulatorConfig {
        reply_threshold: 0.5,
        max_pending: session.max_pending as usize,
        ..Default::default()
    };
    let mut sim = Simulator::new(env.clone(), config);
    let mut app = App::new(
        Some(Actor::new("u1", "Anna")),
        AppConfig { transcript_limit: session.transcript_limit as usize, ..Default::default() },
    );
    let invariants = InvariantRegistry::standard();

    let mut roster = StatusRoster::new();
    roster.insert("online".into(), vec![
        UserStatusRecord::new("u1", "Anna").online(true),
        UserStatusRecord::new("u2", "Ben Roth").online(true),
    ]);
    roster.insert("offline".into(), vec![UserStatusRecord::new("u3", "Cem")]);
    pump(&mut app, &mut sim, AppEvent::RosterUpdated(roster));

    for (index, step) in session.steps.iter().enumerate() {
        match step {
            Step::Char(c) => pump(&mut app, &mut sim, AppEvent::Key(KeyInput::Char(*c))),
            Step::Key(key) => pump(&mut app, &mut sim, AppEvent::Key(key.input())),
            Step::Command(command) => {
                app.set_input(command.line());
                pump(&mut app, &mut sim, AppEvent::Key(KeyInput::Enter));
            },
            Step::Wait { millis } => {
                env.advance(Duration::from_millis(u64::from(*millis)));
                for event in sim.handle_tick(env.now()) {
                    pump(&mut app, &mut sim, event);
                }
            },
        }

        invariants.assert_all(&AppSnapshot::from_app(&app), &format!("after step {index}: {step:?}"));
    }
});
