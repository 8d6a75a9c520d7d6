//! Schedule-driven construction state for every scene element.

use crate::model::{ConstructionState, FloorFilter, Schedule, ScheduleTask};
use crate::scene::SceneContext;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A task under construction at the simulated date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveTask {
    pub name: String,
    /// `round(progress * 100)`
    pub percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// In registry order.
    pub active_tasks: Vec<ActiveTask>,
}

/// State of a task's parts at `current`.
///
/// The end date is inclusive of done. A zero-length window is done as soon
/// as it starts, so it never reports a progress fraction.
#[must_use]
pub fn derive_state(current: NaiveDateTime, task: Option<&ScheduleTask>) -> ConstructionState {
    let Some((start, end)) = task.and_then(ScheduleTask::window) else {
        return ConstructionState::Ghost;
    };

    if current >= end {
        return ConstructionState::Done;
    }
    if current < start {
        return ConstructionState::Ghost;
    }

    let duration = (end - start).num_milliseconds();
    let progress = if duration > 0 {
        let elapsed = (current - start).num_milliseconds();
        (elapsed as f64 / duration as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ConstructionState::Active { progress }
}

/// Percent shown for an active task.
#[must_use]
pub fn progress_percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Re-derives every element's state at `current` and repaints the scene in place.
pub fn tick(
    scene: &mut SceneContext,
    current: NaiveDateTime,
    schedule: &Schedule,
    filter: FloorFilter,
) -> TickReport {
    let mut report = TickReport::default();
    let (registry, elements) = scene.parts_mut();

    for bucket in registry.iter() {
        let task = schedule.find(&bucket.task_id);
        let state = derive_state(current, task);

        if let (ConstructionState::Active { progress }, Some(task)) = (state, task) {
            report.active_tasks.push(ActiveTask {
                name: task.name.clone(),
                percent: progress_percent(progress),
            });
        }

        for &id in &bucket.elements {
            let element = &mut elements[id];
            let visible = filter.admits(element.floor);
            element.apply_tick(state, visible);
        }
    }

    tracing::debug!(
        %current,
        filter = filter.tag(),
        active = report.active_tasks.len(),
        "simulation tick"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_date;
    use pretty_assertions::assert_eq;

    fn at(s: &str) -> NaiveDateTime {
        parse_date(s).unwrap()
    }

    fn shoring() -> ScheduleTask {
        ScheduleTask::new(6, "Shoring Works", "2024-01-01", "2024-01-10")
    }

    #[test]
    fn missing_task_is_ghost() {
        assert_eq!(derive_state(at("2024-01-05"), None), ConstructionState::Ghost);
    }

    #[test]
    fn undated_task_is_ghost() {
        let task = ScheduleTask::new(6, "Shoring Works", "", "2024-01-10");
        assert_eq!(derive_state(at("2030-01-01"), Some(&task)), ConstructionState::Ghost);
    }

    #[test]
    fn before_start_is_ghost() {
        assert_eq!(
            derive_state(at("2023-12-31"), Some(&shoring())),
            ConstructionState::Ghost
        );
    }

    #[test]
    fn start_is_active_with_zero_progress() {
        assert_eq!(
            derive_state(at("2024-01-01"), Some(&shoring())),
            ConstructionState::Active { progress: 0.0 }
        );
    }

    #[test]
    fn end_is_done() {
        assert_eq!(derive_state(at("2024-01-10"), Some(&shoring())), ConstructionState::Done);
        assert_eq!(derive_state(at("2024-03-01"), Some(&shoring())), ConstructionState::Done);
    }

    #[test]
    fn midway_progress_is_elapsed_over_duration() {
        let state = derive_state(at("2024-01-05"), Some(&shoring()));
        let progress = state.progress();
        assert!((progress - 4.0 / 9.0).abs() < 1e-12);
        assert_eq!(progress_percent(progress), 44);
    }

    #[test]
    fn zero_duration_task_is_done_at_start() {
        let task = ScheduleTask::new(7, "Handover", "2024-01-05", "2024-01-05");
        assert_eq!(derive_state(at("2024-01-04"), Some(&task)), ConstructionState::Ghost);
        assert_eq!(derive_state(at("2024-01-05"), Some(&task)), ConstructionState::Done);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(progress_percent(0.446), 45);
        assert_eq!(progress_percent(0.444), 44);
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(1.0), 100);
    }
}
