//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Simulator`]: local delivery and synthetic replies
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, Driver, Environment, Simulator};

/// Generic runtime that orchestrates App, Simulator, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for time and randomness
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    simulator: Simulator<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver<Instant = E::Instant>,
    E: Environment,
{
    /// Create a new runtime from its parts.
    pub fn new(driver: D, app: App, simulator: Simulator<E>) -> Self {
        Self { driver, app, simulator }
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            if self.step().await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// 1. Polls one input event from the driver
    /// 2. Processes the resulting actions between App and Simulator
    /// 3. Releases replies that are due
    ///
    /// Returns `true` if the application should quit.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            if self.dispatch(event)? {
                return Ok(true);
            }
        }

        let now = self.driver.now();
        let events = self.simulator.handle_tick(now);
        for event in events {
            if self.dispatch(event)? {
                return Ok(true);
            }
        }

        self.dispatch(AppEvent::Tick)
    }

    /// Feed one event into the App and execute the resulting actions.
    ///
    /// Uses iterative processing so events produced by the simulator are fed
    /// back until nothing is pending. Returns `true` if should quit.
    fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let mut pending_actions = self.app.handle(event);

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::SendMessage { .. } | AppAction::CancelReplies { .. } => {
                        let events = self.simulator.process_app_action(action);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Feed an event from outside the driver, e.g. a roster refresh.
    ///
    /// Returns `true` if the application should quit.
    pub fn inject(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        self.dispatch(event)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Simulator
    pub fn simulator(&self) -> &Simulator<E> {
        &self.simulator
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, convert::Infallible, time::Duration};

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{AppConfig, KeyInput, SimulatorConfig};

    /// Environment frozen at time zero whose draws are all zero.
    #[derive(Clone)]
    struct FrozenEnv;

    impl Environment for FrozenEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn wall_clock(&self) -> DateTime<Utc> {
            DateTime::<Utc>::default()
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(0);
        }
    }

    #[derive(Default)]
    struct ScriptDriver {
        events: VecDeque<AppEvent>,
        renders: usize,
        stopped: bool,
    }

    impl Driver for ScriptDriver {
        type Error = Infallible;
        type Instant = Duration;

        async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
            Ok(self.events.pop_front())
        }

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
            self.renders += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    fn runtime(keys: &[KeyInput]) -> Runtime<ScriptDriver, FrozenEnv> {
        let driver = ScriptDriver {
            events: keys.iter().copied().map(AppEvent::Key).collect(),
            ..Default::default()
        };
        let app = App::new(None, AppConfig::default());
        Runtime::new(driver, app, Simulator::new(FrozenEnv, SimulatorConfig::default()))
    }

    #[tokio::test]
    async fn step_feeds_simulator_events_back() {
        let mut runtime = runtime(&[KeyInput::Char('h'), KeyInput::Char('i'), KeyInput::Enter]);

        for _ in 0..3 {
            assert!(!runtime.step().await.unwrap());
        }

        assert_eq!(runtime.app().messages().len(), 1);
        assert_eq!(runtime.app().messages()[0].content, "hi");
        assert_eq!(runtime.simulator().pending_replies(), 0);
    }

    #[tokio::test]
    async fn quit_stops_stepping_after_last_render() {
        let mut runtime = runtime(&[KeyInput::Char('x'), KeyInput::Esc]);

        assert!(!runtime.step().await.unwrap());
        assert!(runtime.step().await.unwrap());
        assert_eq!(runtime.driver().renders, 1);
        assert!(!runtime.driver().stopped);
    }

    #[tokio::test]
    async fn run_returns_on_quit() {
        let runtime = runtime(&[KeyInput::Esc]);
        runtime.run().await.unwrap();
    }
}
