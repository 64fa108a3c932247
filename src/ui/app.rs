//! Main TUI application state and logic

use crate::config::{faster_preset, slower_preset, PlaybackConfig};
use crate::error::TraceResult;
use crate::playback::{Clock, GlobalCoordinator, PlaybackController};
use crate::trace::StepStore;
use crate::ui::panes::{self, StatusRenderData};
use crate::ui::view::SnapshotView;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Gauge,
    Frame, Terminal,
};
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Longest the loop waits for input before polling playback again
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Rebuilds a trace for a given attempt number. Seeded inputs derive their
/// seed from the attempt, so a retry yields fresh input.
pub type TraceSource<S> = Box<dyn FnMut(u64) -> TraceResult<StepStore<S>>>;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Snapshot,
    History,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Snapshot => FocusedPane::History,
            FocusedPane::History => FocusedPane::Snapshot,
        }
    }
}

/// Either a playable trace or the reason there is none
pub enum Loaded<S> {
    Ready(PlaybackController<S>),
    Failed(String),
}

/// The main application state
pub struct App<S> {
    /// Name shown in pane titles
    pub algorithm: String,

    source: TraceSource<S>,
    attempt: u64,

    /// Session-wide preferences; this app is the only writer
    pub coordinator: GlobalCoordinator,
    clock: Rc<dyn Clock>,
    config: PlaybackConfig,

    /// Current trace and its controller, rebuilt together on input change
    pub loaded: Loaded<S>,

    pub focused_pane: FocusedPane,
    pub history_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<S: SnapshotView> App<S> {
    pub fn new(
        algorithm: impl Into<String>,
        source: TraceSource<S>,
        coordinator: GlobalCoordinator,
        clock: Rc<dyn Clock>,
        config: PlaybackConfig,
    ) -> Self {
        let mut app = App {
            algorithm: algorithm.into(),
            source,
            attempt: 0,
            coordinator,
            clock,
            config,
            loaded: Loaded::Failed(String::new()),
            focused_pane: FocusedPane::Snapshot,
            history_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        };
        app.rebuild();
        app
    }

    /// Throw away the current trace and controller and build both again.
    /// Nothing from the old controller carries over.
    pub fn rebuild(&mut self) {
        // drop the old controller first so its subscription is released
        self.loaded = Loaded::Failed(String::new());
        self.loaded = match (self.source)(self.attempt) {
            Ok(store) => match PlaybackController::new(
                Rc::new(store),
                self.config.clone(),
                self.coordinator.subscribe(),
                self.clock.clone(),
            ) {
                Ok(controller) => {
                    self.status_message = format!("Loaded {} steps", controller.len());
                    Loaded::Ready(controller)
                }
                Err(e) => Loaded::Failed(e.to_string()),
            },
            Err(e) => Loaded::Failed(e.to_string()),
        };
        if let Loaded::Failed(message) = &self.loaded {
            tracing::warn!(attempt = self.attempt, %message, "no playable trace");
            self.status_message = "Build failed".to_string();
        }
        self.history_scroll = usize::MAX;
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let mut timeout = INPUT_POLL;
            if let Loaded::Ready(controller) = &mut self.loaded {
                let outcome = controller.poll();
                if outcome.reset {
                    self.status_message = "Reset by global request".to_string();
                }
                if outcome.advanced {
                    self.history_scroll = usize::MAX;
                    self.status_message = if controller.is_terminal() {
                        "Playback complete".to_string()
                    } else {
                        "Playing...".to_string()
                    };
                }
                if let Some(wait) = controller.time_until_next_tick() {
                    timeout = timeout.min(wait);
                }
            }

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let Loaded::Ready(controller) = &self.loaded else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(size);
            let message = match &self.loaded {
                Loaded::Failed(message) => message.as_str(),
                Loaded::Ready(_) => "",
            };
            panes::render_failure_pane(frame, chunks[0], &self.algorithm, message);
            panes::render_failure_bar(frame, chunks[1]);
            return;
        };

        // Panes, progress gauge, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        panes::render_snapshot_pane(
            frame,
            columns[0],
            &self.algorithm,
            controller.current_step(),
            self.focused_pane == FocusedPane::Snapshot,
        );

        panes::render_history_pane(
            frame,
            columns[1],
            controller.store().steps(),
            controller.position(),
            self.focused_pane == FocusedPane::History,
            &mut self.history_scroll,
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(crate::ui::theme::DEFAULT_THEME.primary))
            .ratio(controller.progress().clamp(0.0, 1.0))
            .label(format!("{:.0}%", controller.progress() * 100.0));
        frame.render_widget(gauge, main_chunks[1]);

        let globals = controller.global_settings();
        panes::render_status_bar(
            frame,
            main_chunks[2],
            &StatusRenderData {
                message: &self.status_message,
                position: controller.position(),
                total: controller.len(),
                status: controller.status(),
                speed: controller.combined_speed(),
                globally_paused: globals.is_paused,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') => {
                self.attempt = self.attempt.wrapping_add(1);
                self.rebuild();
                return;
            }
            _ => {}
        }

        // everything below needs a loaded trace
        if matches!(self.loaded, Loaded::Failed(_)) {
            return;
        }
        self.handle_global_key(key.code);

        let Loaded::Ready(controller) = &mut self.loaded else {
            return;
        };
        match key.code {
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                controller.step_backward();
                self.status_message = "Stepped backward".to_string();
                self.history_scroll = usize::MAX;
            }
            KeyCode::Right => {
                let was_terminal = controller.is_terminal();
                controller.step_forward();
                self.status_message = if was_terminal {
                    "Already at the last step".to_string()
                } else {
                    "Stepped forward".to_string()
                };
                self.history_scroll = usize::MAX;
            }
            KeyCode::Up if self.focused_pane == FocusedPane::History => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            KeyCode::Down if self.focused_pane == FocusedPane::History => {
                self.history_scroll = self.history_scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    controller.toggle();
                    self.status_message = if controller.is_playing() {
                        "Playing...".to_string()
                    } else if controller.is_terminal() {
                        "At the end: press ⌫ to reset".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                controller.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.history_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                controller.reset();
                self.status_message = "Reset to start".to_string();
                self.history_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    /// Keys that write to the coordinator. The controller picks the change
    /// up on its next poll.
    fn handle_global_key(&mut self, code: KeyCode) {
        let settings = self.coordinator.settings();
        match code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = faster_preset(settings.speed_multiplier);
                if self.coordinator.set_speed_multiplier(speed).is_ok() {
                    self.status_message = format!("Global speed {speed}x");
                }
            }
            KeyCode::Char('-') => {
                let speed = slower_preset(settings.speed_multiplier);
                if self.coordinator.set_speed_multiplier(speed).is_ok() {
                    self.status_message = format!("Global speed {speed}x");
                }
            }
            KeyCode::Char('p') => {
                let paused = self.coordinator.toggle_pause();
                self.status_message = if paused {
                    "Global pause on".to_string()
                } else {
                    "Global pause off".to_string()
                };
            }
            KeyCode::Char('R') => {
                let epoch = self.coordinator.request_reset();
                self.status_message = format!("Global reset #{epoch}");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{BubbleSort, SortSnapshot};
    use crate::error::TraceError;
    use crate::playback::ManualClock;
    use crate::trace::TraceBuilder;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    /// Fails on attempt 0, builds a bubble sort trace on every later attempt
    fn flaky_source() -> TraceSource<SortSnapshot> {
        Box::new(|attempt: u64| {
            if attempt == 0 {
                Err(TraceError::invalid_input("bubble", "no values given"))
            } else {
                TraceBuilder::new().build(&BubbleSort, &vec![3, 1, 2, 0])
            }
        })
    }

    fn app() -> App<SortSnapshot> {
        App::new(
            "bubble",
            flaky_source(),
            GlobalCoordinator::new(),
            Rc::new(ManualClock::new()),
            PlaybackConfig::default(),
        )
    }

    fn screen(app: &mut App<SortSnapshot>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(app: &mut App<SortSnapshot>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn failed_build_hides_playback_controls() {
        let mut app = app();
        assert!(matches!(app.loaded, Loaded::Failed(_)));

        let text = screen(&mut app);
        assert!(text.contains("BUILD FAILED"));
        assert!(text.contains("no values given"));
        assert!(text.contains("Press r to retry"));
        assert!(!text.contains("Step "));
        assert!(!text.contains("end/reset"));
    }

    #[test]
    fn playback_keys_are_ignored_while_failed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Right);
        assert!(!app.coordinator.settings().is_paused);
        assert!(matches!(app.loaded, Loaded::Failed(_)));
    }

    #[test]
    fn retry_rebuilds_into_a_playable_trace() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));

        let Loaded::Ready(controller) = &app.loaded else {
            panic!("retry did not produce a trace");
        };
        assert_eq!(controller.position(), 0);
        assert_eq!(app.coordinator.subscriber_count(), 1);

        let text = screen(&mut app);
        assert!(text.contains("Step 1/12"));
        assert!(!text.contains("BUILD FAILED"));

        press(&mut app, KeyCode::Right);
        assert!(screen(&mut app).contains("Step 2/12"));
    }
}
