//! Per-visualization playback state machine

use super::clock::{Clock, Timer};
use super::coordinator::{GlobalSettings, Subscription};
use crate::config::{validate_speed, PlaybackConfig};
use crate::error::ConfigError;
use crate::trace::{Step, StepStore};
use std::rc::Rc;
use std::time::Duration;

/// Observable playback states.
///
/// `IdleAtStart` and `Paused` share one representation (not playing) and
/// differ only by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    IdleAtStart,
    Playing,
    Paused,
    Terminal,
}

/// Position and play flag of one controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub position: usize,
    pub is_playing: bool,
    /// Local multiplier, combined with the global one
    pub speed_multiplier: f64,
}

/// What a call to [`PlaybackController::poll`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// A global reset moved the controller back to the start
    pub reset: bool,
    /// A due tick advanced the position
    pub advanced: bool,
}

/// Drives a position through a [`StepStore`] under timer and user control.
///
/// Every state-changing operation re-arms the timer (cancel, then create if
/// still running), so a manual step can never race a pending tick. The
/// timer is owned here; dropping the controller cancels it.
pub struct PlaybackController<S> {
    store: Rc<StepStore<S>>,
    config: PlaybackConfig,
    state: PlaybackState,
    global: Subscription,
    clock: Rc<dyn Clock>,
    timer: Option<Timer>,
}

impl<S> PlaybackController<S> {
    pub fn new(
        store: Rc<StepStore<S>>,
        config: PlaybackConfig,
        global: Subscription,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = PlaybackController {
            store,
            config,
            state: PlaybackState {
                position: 0,
                is_playing: false,
                speed_multiplier: 1.0,
            },
            global,
            clock,
            timer: None,
        };
        controller.state.is_playing = controller.default_playing();
        controller.rearm();
        tracing::debug!(
            steps = controller.store.len(),
            playing = controller.state.is_playing,
            "playback controller created"
        );
        Ok(controller)
    }

    // ---- control operations ----

    /// Start automatic playback. At the terminal position this only makes
    /// sure the play flag is off.
    pub fn play(&mut self) {
        if self.is_terminal() {
            self.state.is_playing = false;
        } else {
            self.state.is_playing = true;
        }
        self.rearm();
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
        self.rearm();
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance one position by hand. Always pauses first.
    pub fn step_forward(&mut self) {
        self.state.is_playing = false;
        self.state.position = self.store.clamp_index(self.state.position + 1);
        self.rearm();
    }

    /// Go back one position by hand. Always pauses first.
    pub fn step_backward(&mut self) {
        self.state.is_playing = false;
        self.state.position = self.state.position.saturating_sub(1);
        self.rearm();
    }

    /// Jump to `index` (clamped). Pauses.
    pub fn seek(&mut self, index: usize) {
        self.state.is_playing = false;
        self.state.position = self.store.clamp_index(index);
        self.rearm();
    }

    pub fn jump_to_end(&mut self) {
        self.seek(self.store.last_index());
    }

    /// Return to position 0, then play only if autoplay is configured and
    /// the coordinator is not globally paused.
    pub fn reset(&mut self) {
        self.state.position = 0;
        self.state.is_playing = self.default_playing();
        self.rearm();
        tracing::debug!(playing = self.state.is_playing, "playback reset");
    }

    /// One timer-driven advance of `steps_per_tick` positions. Does nothing
    /// unless playing (locally and globally) and not terminal. Landing on
    /// the last index stops playback; there is no looping.
    ///
    /// Only [`poll`](Self::poll) calls this, right before re-arming the timer.
    fn tick(&mut self) -> bool {
        if self.is_terminal() {
            self.state.is_playing = false;
            self.timer = None;
            return false;
        }
        if !self.is_running() {
            return false;
        }

        let remaining = self.store.last_index() - self.state.position;
        self.state.position += self.config.steps_per_tick.get().min(remaining);
        if self.is_terminal() {
            self.state.is_playing = false;
            self.timer = None;
            tracing::debug!(position = self.state.position, "playback reached the end");
        }
        true
    }

    /// Host-loop entry point: pick up coordinator changes, then fire the
    /// timer if it is due.
    pub fn poll(&mut self) -> PollOutcome {
        let mut outcome = PollOutcome {
            reset: self.observe_global(),
            advanced: false,
        };

        let now = self.clock.now();
        let due = self.timer.as_ref().is_some_and(|t| t.is_due(now));
        if due {
            outcome.advanced = self.tick();
            if let Some(timer) = self.timer.as_mut() {
                timer.rearm_after_fire(now);
            }
        }
        outcome
    }

    /// Apply pending coordinator broadcasts. Returns true when a global
    /// reset was applied.
    pub fn observe_global(&mut self) -> bool {
        let Some(previous) = self.global.refresh() else {
            return false;
        };
        let current = self.global.settings();

        if current.reset_epoch > previous.reset_epoch {
            tracing::debug!(epoch = current.reset_epoch, "global reset observed");
            self.reset();
            return true;
        }

        let interval_changed = self.interval_under(previous) != self.effective_interval();
        if interval_changed || current.is_paused != previous.is_paused {
            self.rearm();
        }
        false
    }

    /// Change this controller's own multiplier
    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), ConfigError> {
        let multiplier = validate_speed(multiplier)?;
        let before = self.effective_interval();
        self.state.speed_multiplier = multiplier;
        if self.effective_interval() != before {
            self.rearm();
        }
        Ok(())
    }

    // ---- read side ----

    pub fn current_step(&self) -> &Step<S> {
        self.store.at(self.state.position)
    }

    pub fn current_snapshot(&self) -> &S {
        &self.current_step().snapshot
    }

    /// `position / (len - 1)`; a single-step trace reports 1.0
    pub fn progress(&self) -> f64 {
        let last = self.store.last_index();
        if last == 0 {
            1.0
        } else {
            self.state.position as f64 / last as f64
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_terminal(&self) -> bool {
        self.store.is_terminal(self.state.position)
    }

    /// Playing locally and not held by a global pause
    pub fn is_running(&self) -> bool {
        self.state.is_playing && !self.global.settings().is_paused
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.is_terminal() {
            PlaybackStatus::Terminal
        } else if self.state.is_playing {
            PlaybackStatus::Playing
        } else if self.state.position == 0 {
            PlaybackStatus::IdleAtStart
        } else {
            PlaybackStatus::Paused
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn store(&self) -> &Rc<StepStore<S>> {
        &self.store
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn global_settings(&self) -> GlobalSettings {
        self.global.settings()
    }

    /// Local multiplier times global multiplier
    pub fn combined_speed(&self) -> f64 {
        self.state.speed_multiplier * self.global.settings().speed_multiplier
    }

    pub fn effective_interval(&self) -> Duration {
        self.config.interval_for(self.combined_speed())
    }

    pub fn has_pending_tick(&self) -> bool {
        self.timer.is_some()
    }

    /// How long the host may wait before the next poll, if a tick is pending
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timer.as_ref().map(|t| t.remaining(now))
    }

    // ---- internals ----

    fn default_playing(&self) -> bool {
        self.config.autoplay && !self.global.settings().is_paused && !self.is_terminal()
    }

    fn interval_under(&self, settings: GlobalSettings) -> Duration {
        self.config
            .interval_for(self.state.speed_multiplier * settings.speed_multiplier)
    }

    /// Cancel any pending tick, then arm a fresh one if still running
    fn rearm(&mut self) {
        self.timer = None;
        if self.is_running() && !self.is_terminal() {
            self.timer = Some(Timer::arm(self.clock.now(), self.effective_interval()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::clock::ManualClock;
    use crate::playback::coordinator::GlobalCoordinator;

    fn store(n: usize) -> Rc<StepStore<usize>> {
        let steps = (0..n)
            .map(|i| Step {
                snapshot: i,
                description: format!("step {i}"),
            })
            .collect();
        Rc::new(StepStore::from_steps(steps).unwrap())
    }

    fn controller(n: usize, autoplay: bool) -> (PlaybackController<usize>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let controller = PlaybackController::new(
            store(n),
            PlaybackConfig::default().with_autoplay(autoplay),
            Subscription::detached(GlobalSettings::default()),
            clock.clone(),
        )
        .unwrap();
        (controller, clock)
    }

    #[test]
    fn starts_idle_without_timer() {
        let (c, _) = controller(5, false);
        assert_eq!(c.status(), PlaybackStatus::IdleAtStart);
        assert!(!c.has_pending_tick());
    }

    #[test]
    fn play_arms_and_pause_cancels() {
        let (mut c, _) = controller(5, false);
        c.play();
        assert!(c.has_pending_tick());
        c.pause();
        c.pause();
        assert!(!c.has_pending_tick());
        assert_eq!(c.status(), PlaybackStatus::IdleAtStart);
    }

    #[test]
    fn play_at_terminal_is_a_no_op() {
        let (mut c, _) = controller(3, false);
        c.jump_to_end();
        c.play();
        assert!(!c.is_playing());
        assert!(!c.has_pending_tick());
        assert_eq!(c.status(), PlaybackStatus::Terminal);
    }

    #[test]
    fn step_backward_stops_at_zero() {
        let (mut c, _) = controller(3, true);
        c.step_backward();
        assert_eq!(c.position(), 0);
        assert!(!c.is_playing());
    }

    #[test]
    fn speed_change_rearms_with_new_interval() {
        let (mut c, clock) = controller(10, true);
        clock.advance(Duration::from_millis(400));
        c.set_speed(2.0).unwrap();
        assert_eq!(c.effective_interval(), Duration::from_millis(500));
        assert_eq!(c.time_until_next_tick(), Some(Duration::from_millis(500)));
        assert!(c.set_speed(0.0).is_err());
    }

    #[test]
    fn global_pause_holds_ticks() {
        let clock = Rc::new(ManualClock::new());
        let mut coordinator = GlobalCoordinator::new();
        let mut c = PlaybackController::new(
            store(5),
            PlaybackConfig::default().with_autoplay(true),
            coordinator.subscribe(),
            clock.clone(),
        )
        .unwrap();

        coordinator.set_paused(true);
        clock.advance(Duration::from_secs(5));
        assert_eq!(c.poll(), PollOutcome::default());
        assert_eq!(c.position(), 0);
        assert!(c.is_playing());
        assert!(!c.has_pending_tick());

        coordinator.set_paused(false);
        c.poll();
        assert!(c.has_pending_tick());
        clock.advance(c.effective_interval());
        assert!(c.poll().advanced);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn multi_step_tick_stops_on_last_index() {
        let clock = Rc::new(ManualClock::new());
        let mut c = PlaybackController::new(
            store(6),
            PlaybackConfig::default()
                .with_autoplay(true)
                .with_steps_per_tick(std::num::NonZeroUsize::new(4).unwrap()),
            Subscription::detached(GlobalSettings::default()),
            clock,
        )
        .unwrap();
        assert!(c.tick());
        assert_eq!(c.position(), 4);
        assert!(c.tick());
        assert_eq!(c.position(), 5);
        assert_eq!(c.status(), PlaybackStatus::Terminal);
        assert!(!c.tick());
    }

    #[test]
    fn single_step_trace_reports_full_progress() {
        let (c, _) = controller(1, true);
        assert_eq!(c.status(), PlaybackStatus::Terminal);
        assert!(!c.is_playing());
        assert_eq!(c.progress(), 1.0);
    }
}
