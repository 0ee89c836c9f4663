//! Main application struct and run loop.
//!
//! This module provides the `App` struct which drives a [`Dashboard`]:
//! terminal events and effect outcomes are dispatched one at a time, effects
//! are handed to the [`EffectRunner`], and the frame is redrawn every turn.

use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::effect::Effect;
use crate::event::{Event, poll_event};
use crate::runtime::EffectRunner;
use crate::terminal::AppTerminal;
use crate::widget::Widget;

/// The main application struct.
///
/// Owns the dashboard and the channel through which effect outcomes return.
#[derive(Debug)]
pub struct App {
    dashboard: Dashboard,
    runner: EffectRunner,
    events: mpsc::UnboundedReceiver<Event>,
    should_quit: bool,
}

impl App {
    /// Creates an application driving `dashboard`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_tui::{App, Container, Dashboard};
    ///
    /// let app = App::new(Dashboard::new(Container::new(2, 2)));
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        let (runner, events) = EffectRunner::channel();
        Self {
            dashboard,
            runner,
            events,
            should_quit: false,
        }
    }

    /// Returns the dashboard.
    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Returns `true` once a quit effect has been seen.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Dispatches one event and starts the effect it produces.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: &Event) {
        if let Some(effect) = self.dashboard.handle_event(event) {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        if self.runner.run(effect).is_break() {
            debug!("quit requested");
            self.should_quit = true;
        }
    }

    /// Dispatches every effect outcome that has arrived so far.
    fn drain_effects(&mut self) {
        while !self.should_quit {
            let Ok(event) = self.events.try_recv() else {
                break;
            };
            self.dispatch(&event);
        }
    }

    /// Renders the dashboard into the frame.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.dashboard.render_into(area, frame.buffer_mut());
    }

    /// Runs the main application loop until the user quits.
    ///
    /// The dashboard is first sized to the terminal and initialized; the loop
    /// then draws, polls the terminal, dispatches, and drains effect outcomes.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dashboard_tui::{App, Container, Dashboard, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(Dashboard::new(Container::new(2, 2)));
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        let size = terminal.size()?;
        self.dispatch(&Event::Resize {
            width: size.width,
            height: size.height,
        });
        if let Some(effect) = self.dashboard.init() {
            self.execute(effect);
        }
        info!(width = size.width, height = size.height, "dashboard started");

        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                self.dispatch(&event);
            }

            self.drain_effects();
        }

        info!("dashboard stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::container::Container;
    use crate::event::{TaskEvent, key};
    use crate::grid::GridConfig;
    use crate::test_utils::{StubLog, StubWidget, buffer_to_string};

    fn app() -> (App, StubLog) {
        let mut container = Container::new(1, 1);
        let widget = StubWidget::new("only").with_resize_effect();
        let log = widget.log();
        container.add_widget(widget, GridConfig::at(0, 0)).unwrap();
        (App::new(Dashboard::new(container)), log)
    }

    #[tokio::test]
    async fn quit_key_stops_the_app() {
        let (mut app, _) = app();
        app.dispatch(&key(KeyCode::Char('x')));
        assert!(!app.should_quit());
        app.dispatch(&key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn effect_outcomes_are_dispatched_back() {
        let (mut app, log) = app();
        app.dispatch(&Event::Resize {
            width: 80,
            height: 24,
        });

        // The stub answers resizes with a task listing.
        let event = app.events.recv().await;
        assert_eq!(event, Some(Event::Tasks(TaskEvent::Loaded(Vec::new()))));
        app.dispatch(&Event::Tasks(TaskEvent::Loaded(Vec::new())));
        assert_eq!(log.last_event(), Some(Event::Tasks(TaskEvent::Loaded(Vec::new()))));
    }

    #[tokio::test]
    async fn drain_stops_after_quit() {
        let (mut app, log) = app();
        app.dispatch(&key(KeyCode::Char('q')));
        app.dispatch(&Event::Resize {
            width: 80,
            height: 24,
        });
        tokio::task::yield_now().await;
        app.drain_effects();
        assert!(!matches!(log.last_event(), Some(Event::Tasks(_))));
    }

    #[tokio::test]
    async fn view_draws_dashboard() {
        let (mut app, _) = app();
        app.dispatch(&Event::Resize {
            width: 60,
            height: 20,
        });

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let content = buffer_to_string(terminal.backend().buffer());
        assert!(content.contains("dashboard - System & Tasks"));
        assert!(content.contains("only"));
        assert!(content.contains("Focus 1/1"));
    }

    #[tokio::test]
    async fn view_shows_too_small_message() {
        let (mut app, _) = app();
        app.dispatch(&Event::Resize {
            width: 30,
            height: 8,
        });

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let content = buffer_to_string(terminal.backend().buffer());
        assert!(content.contains("Window too small"));
    }
}
