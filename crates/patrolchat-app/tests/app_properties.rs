//! Property-based tests for App state machine.
//!
//! Tests verify that state transitions behave under arbitrary inputs, without
//! the simulator in the loop.

use patrolchat_app::{
    Actor, App, AppAction, AppConfig, AppEvent, ChannelId, KeyInput, View, roster,
};
use proptest::prelude::*;

/// Generate random navigation and editing keys.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => prop::char::range(' ', '~').prop_map(KeyInput::Char),
        1 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Tab),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Right),
        1 => Just(KeyInput::Up),
        1 => Just(KeyInput::Down),
    ]
}

proptest! {
    /// `go_back` on the channel list never changes anything.
    #[test]
    fn prop_go_back_on_channels_is_noop(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let mut app = App::new(Some(Actor::new("u1", "Alice")), AppConfig::default());
        for key in keys {
            let _ = app.handle(AppEvent::Key(key));
        }
        prop_assume!(app.view() == View::Channels);

        let channel = app.selected_channel().clone();
        let conversation = app.transcript().conversation().clone();
        let input = app.input().to_string();

        prop_assert!(app.go_back().is_empty());
        prop_assert_eq!(app.view(), View::Channels);
        prop_assert_eq!(app.selected_channel(), &channel);
        prop_assert_eq!(app.transcript().conversation(), &conversation);
        prop_assert_eq!(app.input(), input.as_str());
    }

    /// Channel selection always leaves the channel list with an empty
    /// transcript and cancels the previous conversation.
    #[test]
    fn prop_select_channel_resets(id in "[a-z]{1,12}") {
        let mut app = App::new(None, AppConfig::default());
        let before = app.transcript().conversation().clone();

        let actions = app.select_channel(ChannelId::new(id.clone()));

        prop_assert_eq!(app.selected_channel().as_str(), id.as_str());
        prop_assert!(app.messages().is_empty());
        let cancels_replies = actions.contains(&AppAction::CancelReplies { conversation: before });
        prop_assert!(cancels_replies);
        prop_assert!(actions.contains(&AppAction::Render));
    }

    /// Avatars are at most two uppercase initials, one per word.
    #[test]
    fn prop_avatar_initials_shape(name in "[ a-zäöü]{0,30}") {
        let avatar = roster::avatar_initials(&name);
        let words = name.split_whitespace().count();

        prop_assert_eq!(avatar.chars().count(), words.min(2));
        prop_assert!(avatar.chars().all(|c| !c.is_lowercase()));
    }

    /// The input cursor never leaves the line.
    #[test]
    fn prop_input_cursor_in_bounds(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut app = App::new(None, AppConfig::default());
        for key in keys {
            let _ = app.handle(AppEvent::Key(key));
            prop_assert!(app.input_cursor() <= app.input().chars().count());
        }
    }
}
