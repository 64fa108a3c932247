// Integration tests for the playback controller and global coordinator

use std::num::NonZeroUsize;
use std::rc::Rc;
use std::time::Duration;

use tracetty::algorithms::{BubbleSort, SortSnapshot};
use tracetty::playback::{
    GlobalCoordinator, GlobalSettings, ManualClock, PlaybackController, PlaybackStatus,
    Subscription,
};
use tracetty::{PlaybackConfig, StepStore, TraceBuilder};

fn sort_store() -> Rc<StepStore<SortSnapshot>> {
    let store = TraceBuilder::new()
        .build(&BubbleSort, &vec![3, 1, 2, 0])
        .expect("trace build failed");
    Rc::new(store)
}

struct Rig {
    clock: Rc<ManualClock>,
    coordinator: GlobalCoordinator,
}

impl Rig {
    fn new() -> Self {
        Rig {
            clock: Rc::new(ManualClock::new()),
            coordinator: GlobalCoordinator::new(),
        }
    }

    fn controller(&mut self, autoplay: bool) -> PlaybackController<SortSnapshot> {
        PlaybackController::new(
            sort_store(),
            PlaybackConfig::default().with_autoplay(autoplay),
            self.coordinator.subscribe(),
            self.clock.clone(),
        )
        .expect("valid config")
    }

    /// Advance the clock to the controller's next deadline and poll it
    fn fire(&self, controller: &mut PlaybackController<SortSnapshot>) -> bool {
        if let Some(wait) = controller.time_until_next_tick() {
            self.clock.advance(wait);
        }
        controller.poll().advanced
    }
}

#[test]
fn test_autoplay_visits_every_index_once() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);
    let mut visited = vec![controller.position()];

    while rig.fire(&mut controller) {
        visited.push(controller.position());
    }

    let expected: Vec<usize> = (0..controller.len()).collect();
    assert_eq!(visited, expected);
    assert_eq!(controller.status(), PlaybackStatus::Terminal);
    assert!(!controller.is_playing());
    assert!(!controller.has_pending_tick());
    assert_eq!(controller.current_snapshot().values, vec![0, 1, 2, 3]);
}

#[test]
fn test_ticks_wait_for_the_interval() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);

    rig.clock.advance(Duration::from_millis(999));
    assert!(!controller.poll().advanced);
    rig.clock.advance(Duration::from_millis(1));
    assert!(controller.poll().advanced);
    assert_eq!(controller.position(), 1);

    // a second poll at the same instant does not tick again
    assert!(!controller.poll().advanced);
    assert_eq!(controller.position(), 1);
}

#[test]
fn test_state_machine_transitions() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(false);
    assert_eq!(controller.status(), PlaybackStatus::IdleAtStart);

    controller.play();
    assert_eq!(controller.status(), PlaybackStatus::Playing);
    assert!(rig.fire(&mut controller));

    controller.pause();
    assert_eq!(controller.status(), PlaybackStatus::Paused);
    assert!(!controller.has_pending_tick());

    controller.play();
    while rig.fire(&mut controller) {}
    assert_eq!(controller.status(), PlaybackStatus::Terminal);

    // terminal is sticky until reset
    controller.play();
    assert_eq!(controller.status(), PlaybackStatus::Terminal);
    controller.reset();
    assert_eq!(controller.status(), PlaybackStatus::IdleAtStart);
}

#[test]
fn test_step_forward_pauses_and_clamps() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);
    assert!(controller.is_playing());

    controller.step_forward();
    assert_eq!(controller.position(), 1);
    assert!(!controller.is_playing());
    assert!(!controller.has_pending_tick());

    controller.jump_to_end();
    let last = controller.position();
    controller.step_forward();
    assert_eq!(controller.position(), last);
    assert!(!controller.is_playing());
    assert_eq!(controller.status(), PlaybackStatus::Terminal);
}

#[test]
fn test_manual_step_cancels_pending_tick() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);

    rig.clock.advance(Duration::from_millis(900));
    controller.step_forward();
    rig.clock.advance(Duration::from_millis(500));
    assert!(!controller.poll().advanced);
    assert_eq!(controller.position(), 1);
}

#[test]
fn test_reset_from_anywhere() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(false);

    controller.seek(7);
    controller.set_speed(4.0).unwrap();
    controller.reset();
    assert_eq!(controller.position(), 0);
    assert!(!controller.is_playing());

    let mut autoplaying = rig.controller(true);
    while rig.fire(&mut autoplaying) {}
    autoplaying.reset();
    assert_eq!(autoplaying.position(), 0);
    assert!(autoplaying.is_playing());

    // a global pause keeps reset from resuming
    rig.coordinator.set_paused(true);
    autoplaying.poll();
    autoplaying.jump_to_end();
    autoplaying.reset();
    assert_eq!(autoplaying.position(), 0);
    assert!(!autoplaying.is_playing());
}

#[test]
fn test_seek_clamps_to_last_index() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(false);
    controller.seek(10_000);
    assert_eq!(controller.position(), controller.len() - 1);
    assert_eq!(controller.progress(), 1.0);

    controller.seek(0);
    assert_eq!(controller.progress(), 0.0);
}

#[test]
fn test_global_reset_reaches_every_controller() {
    let mut rig = Rig::new();
    let mut controllers: Vec<_> = (0..3).map(|_| rig.controller(true)).collect();

    // drive them to different positions
    for (i, controller) in controllers.iter_mut().enumerate() {
        for _ in 0..=i {
            rig.fire(controller);
        }
    }
    let positions: Vec<usize> = controllers.iter().map(|c| c.position()).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    rig.coordinator.request_reset();
    for controller in &mut controllers {
        assert!(controller.poll().reset);
        assert_eq!(controller.position(), 0);
    }
}

#[test]
fn test_late_mount_ignores_earlier_reset() {
    let mut rig = Rig::new();
    rig.coordinator.request_reset();

    let mut controller = rig.controller(false);
    controller.seek(3);
    assert!(!controller.poll().reset);
    assert_eq!(controller.position(), 3);

    rig.coordinator.request_reset();
    assert!(controller.poll().reset);
    assert_eq!(controller.position(), 0);
}

#[test]
fn test_global_speed_changes_interval() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);
    assert_eq!(controller.effective_interval(), Duration::from_millis(1000));

    rig.coordinator.set_speed_multiplier(4.0).unwrap();
    controller.poll();
    assert_eq!(controller.effective_interval(), Duration::from_millis(250));
    assert_eq!(
        controller.time_until_next_tick(),
        Some(Duration::from_millis(250))
    );

    controller.set_speed(2.0).unwrap();
    assert_eq!(controller.combined_speed(), 8.0);
    assert_eq!(controller.effective_interval(), Duration::from_millis(125));
}

#[test]
fn test_extreme_combined_speed_keeps_faster_faster() {
    let mut rig = Rig::new();
    let mut controller = rig.controller(true);
    rig.coordinator.set_speed_multiplier(1e200).unwrap();
    controller.poll();

    controller.set_speed(1.0).unwrap();
    let slow = controller.effective_interval();
    controller.set_speed(1e200).unwrap();
    let fast = controller.effective_interval();
    assert!(controller.combined_speed().is_infinite());
    assert!(fast <= slow);
    assert_eq!(fast, controller.config().floor);

    rig.coordinator.set_speed_multiplier(1e-200).unwrap();
    controller.poll();
    controller.set_speed(1e-200).unwrap();
    assert_eq!(controller.combined_speed(), 0.0);
    assert!(controller.effective_interval() >= Duration::from_millis(1000));
    assert!(controller.has_pending_tick());
}

#[test]
fn test_teardown_releases_subscription() {
    let mut rig = Rig::new();
    let keep = rig.controller(true);
    let dropped = rig.controller(true);
    assert_eq!(rig.coordinator.subscriber_count(), 2);

    drop(dropped);
    rig.coordinator.set_speed_multiplier(2.0).unwrap();
    assert_eq!(rig.coordinator.subscriber_count(), 1);
    drop(keep);
}

#[test]
fn test_steps_per_tick() {
    let clock = Rc::new(ManualClock::new());
    let config = PlaybackConfig::default()
        .with_autoplay(true)
        .with_steps_per_tick(NonZeroUsize::new(5).unwrap());
    let mut controller = PlaybackController::new(
        sort_store(),
        config,
        Subscription::detached(GlobalSettings::default()),
        clock.clone(),
    )
    .unwrap();

    let mut positions = Vec::new();
    loop {
        clock.advance(controller.effective_interval());
        if !controller.poll().advanced {
            break;
        }
        positions.push(controller.position());
    }
    // 12 steps: 0 -> 5 -> 10 -> 11
    assert_eq!(positions, vec![5, 10, 11]);
    assert!(controller.is_terminal());
}

#[test]
fn test_single_step_trace_is_terminal_immediately() {
    let store = Rc::new(
        TraceBuilder::new()
            .build(&BubbleSort, &vec![7])
            .unwrap(),
    );
    let mut controller = PlaybackController::new(
        store,
        PlaybackConfig::default().with_autoplay(true),
        Subscription::detached(GlobalSettings::default()),
        Rc::new(ManualClock::new()),
    )
    .unwrap();

    assert_eq!(controller.status(), PlaybackStatus::Terminal);
    assert!(!controller.has_pending_tick());
    controller.step_forward();
    controller.step_backward();
    assert_eq!(controller.position(), 0);
    assert!(controller.current_snapshot().is_complete());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PlaybackConfig {
        base_interval: Duration::from_millis(5),
        ..PlaybackConfig::default()
    };
    let result = PlaybackController::new(
        sort_store(),
        config,
        Subscription::detached(GlobalSettings::default()),
        Rc::new(ManualClock::new()),
    );
    assert!(result.is_err());
}
