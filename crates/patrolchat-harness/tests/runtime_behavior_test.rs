//! End-to-end tests driving the production Runtime with the simulation driver.
//!
//! # Test Strategy
//!
//! Each test simulates what a user does in the terminal:
//! 1. Inject key presses into the `SimDriver`
//! 2. Step the `Runtime` (App ↔ Simulator)
//! 3. Advance the virtual clock to release replies
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - App state reflects the expected UI state
//! - Messages land in the right conversation, own message first
//! - Invariants hold at every render

use std::time::Duration;

use patrolchat_app::{
    Actor, App, AppConfig, AppEvent, ConversationId, KeyInput, REPLY_PHRASES, Runtime, Simulator,
    SimulatorConfig, StatusRoster, UserId, UserStatusRecord, View,
};
use patrolchat_harness::{InvariantRegistry, SimDriver, SimEnv};

const ALWAYS_REPLY: f64 = -1.0;
const NEVER_REPLY: f64 = 1.0;

fn roster() -> StatusRoster {
    let mut roster = StatusRoster::new();
    roster.insert("online".into(), vec![
        UserStatusRecord::new("u1", "Alice A").online(true),
        UserStatusRecord::new("u2", "Bob B").online(true),
    ]);
    roster.insert("offline".into(), vec![UserStatusRecord::new("u3", "Cara").online(false)]);
    roster
}

/// Build a runtime plus handles for injecting input and moving time.
fn runtime(reply_threshold: f64) -> (Runtime<SimDriver, SimEnv>, SimDriver, SimEnv) {
    let env = SimEnv::with_seed(42);
    let driver = SimDriver::new(env.clone()).with_invariants(InvariantRegistry::standard());
    let handle = driver.clone();
    let app = App::new(Some(Actor::new("u1", "Alice A")), AppConfig::default());
    let config = SimulatorConfig { reply_threshold, ..Default::default() };
    let simulator = Simulator::new(env.clone(), config);
    (Runtime::new(driver, app, simulator), handle, env)
}

/// Step until the driver has no queued input. Returns `true` on quit.
async fn drain(runtime: &mut Runtime<SimDriver, SimEnv>, driver: &SimDriver) -> bool {
    while driver.has_pending() {
        if runtime.step().await.unwrap() {
            return true;
        }
    }
    false
}

async fn type_line(runtime: &mut Runtime<SimDriver, SimEnv>, driver: &SimDriver, line: &str) {
    driver.inject_text(line);
    driver.inject_key(KeyInput::Enter);
    drain(runtime, driver).await;
}

async fn wait(runtime: &mut Runtime<SimDriver, SimEnv>, env: &SimEnv, ms: u64) {
    env.advance(Duration::from_millis(ms));
    runtime.step().await.unwrap();
}

/// Sending in a channel appends the own message, and the reply follows it
/// after the delay.
#[tokio::test]
async fn channel_send_then_reply() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);

    type_line(&mut runtime, &driver, "Hallo").await;

    // Oracle: own message appended immediately, input cleared
    let messages = runtime.app().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_own);
    assert_eq!(messages[0].content, "Hallo");
    assert_eq!(messages[0].sender_name, "Alice A");
    assert_eq!(runtime.app().input(), "");
    assert_eq!(runtime.simulator().pending_replies(), 1);

    // Oracle: nothing before the delay elapses
    wait(&mut runtime, &env, 1999).await;
    assert_eq!(runtime.app().messages().len(), 1);

    wait(&mut runtime, &env, 1).await;
    let messages = runtime.app().messages();
    assert_eq!(messages.len(), 2);
    assert!(!messages[1].is_own);
    assert_eq!(messages[1].sender_name, "Kollege");
    assert!(REPLY_PHRASES.contains(&messages[1].content.as_str()));
    assert!(messages[0].created_at < messages[1].created_at);
}

#[tokio::test]
async fn blank_send_does_nothing() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);

    type_line(&mut runtime, &driver, "  ").await;
    wait(&mut runtime, &env, 5000).await;

    assert!(runtime.app().messages().is_empty());
    assert_eq!(runtime.simulator().pending_replies(), 0);
}

#[tokio::test]
async fn no_reply_below_threshold() {
    let (mut runtime, driver, env) = runtime(NEVER_REPLY);

    type_line(&mut runtime, &driver, "Status?").await;
    wait(&mut runtime, &env, 10_000).await;

    assert_eq!(runtime.app().messages().len(), 1);
}

/// Walking channels → users → chat and picking the highlighted user.
#[tokio::test]
async fn navigate_to_direct_chat() {
    let (mut runtime, driver, _env) = runtime(NEVER_REPLY);
    runtime.inject(AppEvent::RosterUpdated(roster())).unwrap();

    type_line(&mut runtime, &driver, "/users").await;
    assert_eq!(runtime.app().view(), View::UserList);

    // Oracle: actor excluded, status resolved, avatar derived
    let rows: Vec<_> =
        runtime.app().roster().iter().map(|e| (e.id.as_str(), e.avatar.as_str())).collect();
    assert_eq!(rows, [("u2", "BB"), ("u3", "C")]);

    driver.inject_key(KeyInput::Down);
    driver.inject_key(KeyInput::Enter);
    drain(&mut runtime, &driver).await;

    assert_eq!(runtime.app().view(), View::Chat);
    assert_eq!(runtime.app().selected_user().map(|u| u.id.as_str()), Some("u3"));
    assert_eq!(
        *runtime.app().transcript().conversation(),
        ConversationId::Direct(UserId::new("u3"))
    );
}

/// A reply scheduled in a direct chat is answered by that user.
#[tokio::test]
async fn direct_reply_comes_from_partner() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);
    runtime.inject(AppEvent::RosterUpdated(roster())).unwrap();

    type_line(&mut runtime, &driver, "/users").await;
    driver.inject_key(KeyInput::Enter);
    drain(&mut runtime, &driver).await;
    type_line(&mut runtime, &driver, "Wo bist du?").await;

    wait(&mut runtime, &env, 2000).await;

    let messages = runtime.app().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender_id.as_str(), "u2");
    assert_eq!(messages[1].sender_name, "Bob B");
}

/// Leaving a conversation drops its pending replies.
#[tokio::test]
async fn switching_channel_cancels_pending_reply() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);

    type_line(&mut runtime, &driver, "Hallo").await;
    driver.inject_key(KeyInput::Tab);
    drain(&mut runtime, &driver).await;

    // Oracle: new channel, empty transcript, nothing left to deliver
    assert_eq!(runtime.app().selected_channel().as_str(), "streife");
    assert!(runtime.app().messages().is_empty());
    assert_eq!(runtime.simulator().pending_replies(), 0);

    wait(&mut runtime, &env, 5000).await;
    assert!(runtime.app().messages().is_empty());
}

/// Visiting the user list and coming back keeps the channel transcript and
/// still delivers its reply.
#[tokio::test]
async fn user_list_round_trip_keeps_reply() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);

    type_line(&mut runtime, &driver, "Hallo").await;
    type_line(&mut runtime, &driver, "/users").await;
    driver.inject_key(KeyInput::Esc);
    drain(&mut runtime, &driver).await;

    assert_eq!(runtime.app().view(), View::Channels);
    wait(&mut runtime, &env, 2000).await;
    assert_eq!(runtime.app().messages().len(), 2);
}

/// Picking the same user again after backing out of a chat starts over and
/// drops the reply that was pending.
#[tokio::test]
async fn reopening_same_chat_drops_reply() {
    let (mut runtime, driver, env) = runtime(ALWAYS_REPLY);
    runtime.inject(AppEvent::RosterUpdated(roster())).unwrap();

    type_line(&mut runtime, &driver, "/users").await;
    driver.inject_key(KeyInput::Enter);
    drain(&mut runtime, &driver).await;
    type_line(&mut runtime, &driver, "Bist du da?").await;
    assert_eq!(runtime.simulator().pending_replies(), 1);

    driver.inject_key(KeyInput::Esc);
    driver.inject_key(KeyInput::Enter);
    drain(&mut runtime, &driver).await;

    // Oracle: same partner, fresh transcript, nothing left to deliver
    assert_eq!(runtime.app().view(), View::Chat);
    assert_eq!(runtime.app().selected_user().map(|u| u.id.as_str()), Some("u2"));
    assert!(runtime.app().messages().is_empty());
    assert_eq!(runtime.simulator().pending_replies(), 0);

    wait(&mut runtime, &env, 5000).await;
    assert!(runtime.app().messages().is_empty());
}

/// A full reply queue drops the extra reply but never the send.
#[tokio::test]
async fn full_queue_still_delivers_send() {
    let env = SimEnv::with_seed(7);
    let driver = SimDriver::new(env.clone());
    let handle = driver.clone();
    let config = SimulatorConfig { reply_threshold: ALWAYS_REPLY, max_pending: 1, ..Default::default() };
    let mut runtime = Runtime::new(
        driver,
        App::new(None, AppConfig::default()),
        Simulator::new(env.clone(), config),
    );

    type_line(&mut runtime, &handle, "eins").await;
    type_line(&mut runtime, &handle, "zwei").await;

    let contents: Vec<_> = runtime.app().messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["eins", "zwei"]);
    assert_eq!(runtime.app().input(), "");
    assert_eq!(runtime.app().status_message(), None);
    assert_eq!(runtime.simulator().pending_replies(), 1);

    wait(&mut runtime, &env, 2000).await;
    assert_eq!(runtime.app().messages().len(), 3);
}

#[tokio::test]
async fn esc_on_channels_quits_and_stops_driver() {
    let (runtime, driver, _env) = runtime(NEVER_REPLY);
    driver.inject_text("x");
    driver.inject_key(KeyInput::Esc);

    runtime.run().await.unwrap();

    assert!(driver.is_stopped());
    assert!(driver.render_count() >= 2);
}

/// Same seed, same inputs, same transcript.
#[tokio::test]
async fn seeded_runs_are_reproducible() {
    async fn session(seed: u64) -> Vec<String> {
        let env = SimEnv::with_seed(seed);
        let driver = SimDriver::new(env.clone());
        let handle = driver.clone();
        let mut runtime = Runtime::new(
            driver,
            App::new(None, AppConfig::default()),
            Simulator::new(env.clone(), SimulatorConfig::default()),
        );
        for line in ["a", "b", "c", "d", "e", "f"] {
            type_line(&mut runtime, &handle, line).await;
            wait(&mut runtime, &env, 2500).await;
        }
        runtime.app().messages().iter().map(|m| m.content.clone()).collect()
    }

    assert_eq!(session(1234).await, session(1234).await);
}
