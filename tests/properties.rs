// Property tests for recording and playback invariants

use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use tracetty::algorithms::{
    BinarySearch, BreadthFirst, BubbleSort, GraphInput, InsertionSort, LinearSearch,
    SearchInput, SearchOutcome, SelectionSort,
};
use tracetty::config::effective_interval;
use tracetty::playback::{GlobalSettings, ManualClock, PlaybackController, Subscription};
use tracetty::{PlaybackConfig, TraceBuilder};

proptest! {
    #[test]
    fn sorts_end_sorted(values in prop::collection::vec(-1000i64..1000, 0..40)) {
        let mut expected = values.clone();
        expected.sort();
        let builder = TraceBuilder::new();

        for store in [
            builder.build(&BubbleSort, &values).unwrap(),
            builder.build(&InsertionSort, &values).unwrap(),
            builder.build(&SelectionSort, &values).unwrap(),
        ] {
            prop_assert!(store.len() >= 1);
            prop_assert!(store.last().snapshot.is_complete());
            prop_assert_eq!(&store.last().snapshot.values, &expected);
        }
    }

    #[test]
    fn searches_agree_with_contains(
        mut values in prop::collection::vec(0i64..50, 0..30),
        target in 0i64..50,
    ) {
        values.sort();
        let input = SearchInput { values: values.clone(), target };
        let builder = TraceBuilder::new();

        for store in [
            builder.build(&LinearSearch, &input).unwrap(),
            builder.build(&BinarySearch, &input).unwrap(),
        ] {
            match store.last().snapshot.outcome {
                SearchOutcome::Found(index) => prop_assert_eq!(values[index], target),
                SearchOutcome::NotFound => prop_assert!(!values.contains(&target)),
                SearchOutcome::Searching => prop_assert!(false, "terminal snapshot has no outcome"),
            }
        }
    }

    #[test]
    fn bfs_marks_only_reachable_nodes(
        node_count in 1usize..12,
        raw_edges in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let edges: Vec<(usize, usize)> = raw_edges
            .into_iter()
            .filter(|(a, b)| *a < node_count && *b < node_count)
            .collect();
        let input = GraphInput { node_count, edges, directed: false, start: 0 };
        let store = TraceBuilder::new().build(&BreadthFirst, &input).unwrap();
        let last = &store.last().snapshot;

        let mut order = last.order.clone();
        order.sort_unstable();
        order.dedup();
        prop_assert_eq!(order.len(), last.order.len());
        let marked: Vec<usize> = (0..node_count).filter(|&n| last.marked[n]).collect();
        prop_assert_eq!(order, marked);
    }

    #[test]
    fn ticks_visit_each_index_once(values in prop::collection::vec(0i64..20, 0..20)) {
        let store = Rc::new(TraceBuilder::new().build(&BubbleSort, &values).unwrap());
        let clock = Rc::new(ManualClock::new());
        let mut controller = PlaybackController::new(
            store.clone(),
            PlaybackConfig::default().with_autoplay(true),
            Subscription::detached(GlobalSettings::default()),
            clock.clone(),
        )
        .unwrap();

        let mut visited = vec![controller.position()];
        while let Some(wait) = controller.time_until_next_tick() {
            clock.advance(wait);
            prop_assert!(controller.poll().advanced);
            visited.push(controller.position());
        }
        prop_assert_eq!(visited, (0..store.len()).collect::<Vec<_>>());
        prop_assert!(!controller.is_playing());
    }

    #[test]
    fn reset_always_returns_to_start(
        seek in 0usize..100,
        playing in any::<bool>(),
        speed in 0.1f64..20.0,
    ) {
        let store = Rc::new(TraceBuilder::new().build(&BubbleSort, &vec![9, 3, 7, 1, 5]).unwrap());
        let mut controller = PlaybackController::new(
            store,
            PlaybackConfig::default(),
            Subscription::detached(GlobalSettings::default()),
            Rc::new(ManualClock::new()),
        )
        .unwrap();

        controller.seek(seek);
        controller.set_speed(speed).unwrap();
        if playing {
            controller.play();
        }
        controller.reset();
        prop_assert_eq!(controller.position(), 0);
    }

    #[test]
    fn faster_is_never_slower(
        base_ms in 16u64..5000,
        m1 in 0.01f64..100.0,
        factor in 1.0f64..50.0,
    ) {
        let base = Duration::from_millis(base_ms);
        let floor = Duration::from_millis(16);
        let m2 = m1 * factor;
        let slow = effective_interval(base, floor, m1);
        let fast = effective_interval(base, floor, m2);
        prop_assert!(fast <= slow);
        prop_assert!(fast >= floor);
    }

    #[test]
    fn faster_is_never_slower_for_combined_speeds(
        local in 1e-300f64..1e300,
        global in 1e-300f64..1e300,
        factor in 1.0f64..1e300,
    ) {
        let base = Duration::from_millis(1000);
        let floor = Duration::from_millis(16);
        // products may overflow to inf or underflow to 0
        let slow = effective_interval(base, floor, local * global);
        let fast = effective_interval(base, floor, (local * factor) * global);
        prop_assert!(fast <= slow);
        prop_assert!(fast >= floor);
    }
}
