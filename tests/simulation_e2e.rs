//! End-to-end behaviour of the viewer against the shipped villa catalog.

use pretty_assertions::assert_eq;
use site_4d::catalog::ProjectType;
use site_4d::model::{
    parse_date, Appearance, ConstructionState, Floor, FloorFilter, Schedule, ScheduleTask,
    StateKind, TaskId,
};
use site_4d::picking::{Viewport, HIGHLIGHT_DURATION};
use site_4d::simulation::ActiveTask;
use site_4d::viewer::BimViewer;
use std::time::Instant;

fn shoring_viewer() -> BimViewer {
    let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).unwrap();
    viewer.set_schedule(Schedule::new(vec![ScheduleTask::new(
        6,
        "Shoring Works",
        "2024-01-01",
        "2024-01-10",
    )]));
    viewer
}

fn piles(viewer: &BimViewer) -> Vec<ConstructionState> {
    viewer
        .scene()
        .task_elements(&TaskId::from(6))
        .map(|e| e.state())
        .collect()
}

#[test]
fn shoring_piles_follow_the_programme() {
    let mut viewer = shoring_viewer();

    let report = viewer.update_simulation("2024-01-05").unwrap().clone();
    assert_eq!(
        report.active_tasks,
        vec![ActiveTask {
            name: "Shoring Works".to_string(),
            percent: 44,
        }]
    );

    let states = piles(&viewer);
    assert_eq!(states.len(), 52);
    for state in &states {
        match *state {
            ConstructionState::Active { progress } => assert!((progress - 4.0 / 9.0).abs() < 1e-9),
            other => panic!("expected active pile, got {other:?}"),
        }
    }

    let report = viewer.update_simulation("2024-01-10").unwrap();
    assert!(report.active_tasks.is_empty());
    assert!(piles(&viewer).iter().all(|s| *s == ConstructionState::Done));
}

#[test]
fn unscheduled_parts_stay_ghost() {
    let mut viewer = shoring_viewer();
    viewer.update_simulation("2030-01-01").unwrap();

    for element in viewer.scene().elements() {
        if element.task_id == TaskId::from(6) {
            assert_eq!(element.state(), ConstructionState::Done);
        } else {
            assert_eq!(element.state(), ConstructionState::Ghost);
            assert_eq!(element.appearance(), Appearance::Ghost);
        }
    }
}

#[test]
fn ground_floor_filter_hides_basement_whatever_its_state() {
    let mut viewer = shoring_viewer();
    viewer.update_simulation("2024-01-05").unwrap();
    viewer.set_filter(FloorFilter::Only(Floor::Ground));

    for element in viewer.scene().elements() {
        if element.floor == Floor::Sub {
            assert!(!element.visible());
        }
    }
    // The piles keep their construction state while hidden.
    assert!(piles(&viewer).iter().all(|s| s.kind() == StateKind::Active));
}

#[test]
fn programme_start_is_active_at_zero_and_end_is_done() {
    let mut viewer = shoring_viewer();

    viewer.update_simulation("2024-01-01").unwrap();
    assert!(piles(&viewer)
        .iter()
        .all(|s| *s == ConstructionState::Active { progress: 0.0 }));

    viewer.update_simulation("2024-01-10").unwrap();
    assert!(piles(&viewer).iter().all(|s| s.progress() == 1.0));
}

#[test]
fn reinit_does_not_duplicate_parts() {
    let mut viewer = shoring_viewer();
    let before = viewer.scene().registry().counts();

    viewer.reinit(ProjectType::Villa).unwrap();
    viewer.reinit(ProjectType::Villa).unwrap();

    assert_eq!(viewer.scene().registry().counts(), before);
    assert_eq!(viewer.scene().elements().len(), 122);
}

#[test]
fn pointer_in_empty_sky_clears_the_pick() {
    let mut viewer = shoring_viewer();
    viewer.update_simulation("2024-01-05").unwrap();

    let now = Instant::now();
    assert_eq!(viewer.handle_pointer(1.0, 1.0, now), None);
    assert!(viewer.scene().pending_highlights().is_empty());
}

#[test]
fn picked_part_reverts_after_highlight() {
    let mut viewer = shoring_viewer();
    viewer.update_simulation("2024-01-10").unwrap();

    let now = Instant::now();
    let pick = viewer.handle_pointer(300.0, 200.0, now).unwrap();
    let element = viewer.scene().element(pick.element).unwrap();
    let expected = element.simulated_appearance();
    assert_eq!(element.appearance(), Appearance::Highlight);
    assert_eq!(pick.state, element.state());

    viewer.poll(now + HIGHLIGHT_DURATION);
    assert_eq!(
        viewer.scene().element(pick.element).unwrap().appearance(),
        expected
    );
}

#[test]
fn schedule_json_accepts_numeric_and_text_ids() {
    let schedule = Schedule::from_json(
        r#"[
            {"id": 6, "name": "Shoring Works", "start": "2024-01-01", "end": "2024-01-10"},
            {"id": "20", "name": "Raft", "start": "2024-01-11", "end": "not a date"}
        ]"#,
    )
    .unwrap();

    let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).unwrap();
    viewer.set_schedule(schedule);
    viewer.update_simulation(parse_date("2024-02-01")).unwrap();

    assert!(piles(&viewer).iter().all(|s| *s == ConstructionState::Done));
    assert!(viewer
        .scene()
        .task_elements(&TaskId::from(20))
        .all(|e| e.state() == ConstructionState::Ghost));
}
