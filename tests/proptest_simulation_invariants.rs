//! Property-based invariant tests for the schedule simulation.
//!
//! 1. Every element ends a tick in exactly one state, for any date.
//! 2. Progress stays in [0, 1] and never decreases as the date advances.
//! 3. Zero-length windows never produce a progress fraction.
//! 4. Changing the floor filter only changes visibility.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use site_4d::catalog::{Catalog, ProjectType};
use site_4d::model::{ConstructionState, Floor, FloorFilter, Schedule, ScheduleTask, TaskId};
use site_4d::scene::SceneContext;
use site_4d::simulation::{derive_state, tick};

// ── Helpers ─────────────────────────────────────────────────────────────

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn at(hours: i64) -> NaiveDateTime {
    epoch() + Duration::hours(hours)
}

fn task(id: u32, start: i64, length: i64) -> ScheduleTask {
    ScheduleTask {
        id: TaskId::from(id),
        name: format!("Task {id}"),
        start: Some(at(start)),
        end: Some(at(start + length)),
    }
}

/// Windows for a random subset of the villa's task ids.
fn schedule_strategy() -> impl Strategy<Value = Schedule> {
    prop::collection::vec((1u32..=60, 0i64..2_000, 0i64..500), 0..40).prop_map(|rows| {
        Schedule::new(
            rows.into_iter()
                .map(|(id, start, length)| task(id, start, length))
                .collect(),
        )
    })
}

fn filter_strategy() -> impl Strategy<Value = FloorFilter> {
    (0..=Floor::ALL.len()).prop_map(FloorFilter::from_index)
}

fn villa() -> SceneContext {
    SceneContext::from_catalog(&Catalog::for_project(ProjectType::Villa)).unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. State is total
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_element_has_a_consistent_state(
        schedule in schedule_strategy(),
        hours in -500i64..3_000,
        filter in filter_strategy(),
    ) {
        let mut scene = villa();
        let current = at(hours);
        tick(&mut scene, current, &schedule, filter);

        for element in scene.elements() {
            let expected = derive_state(current, schedule.find(&element.task_id));
            prop_assert_eq!(element.state(), expected);
            prop_assert_eq!(element.visible(), filter.admits(element.floor));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Progress is bounded and monotonic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn progress_is_bounded_and_monotonic(
        start in 0i64..1_000,
        length in 0i64..1_000,
        a in -200i64..2_500,
        b in -200i64..2_500,
    ) {
        let task = task(6, start, length);
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let first = derive_state(at(earlier), Some(&task));
        let second = derive_state(at(later), Some(&task));

        for state in [first, second] {
            let p = state.progress();
            prop_assert!((0.0..=1.0).contains(&p), "progress {} out of range", p);
        }
        prop_assert!(
            first.progress() <= second.progress(),
            "progress went backwards: {:?} then {:?}", first, second
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Zero-length windows
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zero_length_window_is_ghost_or_done(start in 0i64..1_000, hours in -500i64..2_000) {
        let state = derive_state(at(hours), Some(&task(6, start, 0)));
        prop_assert!(
            matches!(state, ConstructionState::Ghost | ConstructionState::Done),
            "zero-length window gave {:?}", state
        );
        prop_assert!(state.progress().is_finite());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Filter changes only visibility
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_changes_only_visibility(
        schedule in schedule_strategy(),
        hours in 0i64..2_500,
        first in filter_strategy(),
        second in filter_strategy(),
    ) {
        let current = at(hours);
        let mut a = villa();
        let mut b = villa();
        let report_a = tick(&mut a, current, &schedule, first);
        let report_b = tick(&mut b, current, &schedule, second);

        prop_assert_eq!(report_a, report_b);
        for (x, y) in a.elements().iter().zip(b.elements()) {
            prop_assert_eq!(x.state(), y.state());
            prop_assert_eq!(y.visible(), second.admits(y.floor));
        }
    }
}
