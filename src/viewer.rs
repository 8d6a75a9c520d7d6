//! One-stop entry point tying catalog, simulation and picking together.

use crate::catalog::{Catalog, ProjectType};
use crate::error::CatalogError;
use crate::model::{FloorFilter, IntoSimDate, Schedule};
use crate::picking::{self, Camera, PickResult, Viewport};
use crate::scene::SceneContext;
use crate::simulation::{self, TickReport};
use chrono::{Duration, NaiveDateTime};
use glam::Vec2;
use std::time::Instant;

/// The 3D progress viewer: scene, camera and the last simulation inputs.
#[derive(Debug)]
pub struct BimViewer {
    project_type: ProjectType,
    scene: SceneContext,
    camera: Camera,
    viewport: Viewport,
    schedule: Option<Schedule>,
    filter: FloorFilter,
    current: Option<NaiveDateTime>,
    report: TickReport,
}

impl BimViewer {
    /// Builds the scene for `project_type` on a surface of the given size.
    pub fn init(project_type: ProjectType, viewport: Viewport) -> Result<Self, CatalogError> {
        let scene = SceneContext::from_catalog(&Catalog::for_project(project_type))?;
        let mut camera = Camera::default();
        camera.set_aspect(viewport.width, viewport.height);
        Ok(Self {
            project_type,
            scene,
            camera,
            viewport,
            schedule: None,
            filter: FloorFilter::All,
            current: None,
            report: TickReport::default(),
        })
    }

    /// Tears the scene down and rebuilds it. The camera is reset; schedule,
    /// filter and date survive and are re-applied.
    pub fn reinit(&mut self, project_type: ProjectType) -> Result<(), CatalogError> {
        self.scene.instantiate(&Catalog::for_project(project_type))?;
        self.project_type = project_type;
        self.camera = Camera::default();
        self.camera.set_aspect(self.viewport.width, self.viewport.height);
        self.report = TickReport::default();
        self.rerun();
        Ok(())
    }

    /// Installs the schedule fetched by the caller and re-runs the last tick.
    pub fn set_schedule(&mut self, schedule: Schedule) -> Option<&TickReport> {
        self.schedule = Some(schedule);
        self.rerun()
    }

    /// Moves the simulated date and repaints. Missing or unparseable dates,
    /// or no schedule yet, leave everything as it was and return `None`.
    pub fn update_simulation(&mut self, date: impl IntoSimDate) -> Option<&TickReport> {
        let Some(current) = date.into_sim_date() else {
            tracing::warn!("ignoring simulation update with missing or invalid date");
            return None;
        };
        let Some(schedule) = self.schedule.as_ref() else {
            tracing::debug!(%current, "no schedule loaded; simulation update skipped");
            return None;
        };
        self.report = simulation::tick(&mut self.scene, current, schedule, self.filter);
        self.current = Some(current);
        Some(&self.report)
    }

    /// Changes the floor filter and immediately re-runs the last tick.
    pub fn set_filter(&mut self, filter: FloorFilter) -> Option<&TickReport> {
        self.filter = filter;
        self.rerun()
    }

    /// Shifts the simulated date, clamped to the schedule span.
    pub fn advance(&mut self, by: Duration) -> Option<&TickReport> {
        let (start, end) = self.schedule.as_ref()?.span()?;
        let from = self.current.unwrap_or(start);
        let to = (from + by).clamp(start, end);
        self.update_simulation(to)
    }

    fn rerun(&mut self) -> Option<&TickReport> {
        let current = self.current?;
        self.update_simulation(current)
    }

    /// Pointer handler: pick and highlight the element under `(x, y)`.
    pub fn handle_pointer(&mut self, x: f32, y: f32, now: Instant) -> Option<PickResult> {
        picking::pick(
            Vec2::new(x, y),
            &self.viewport,
            &self.camera,
            &mut self.scene,
            now,
        )
    }

    /// Fires due highlight reverts. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        self.scene.expire_highlights(now);
    }

    /// Follows the render surface; the camera aspect tracks its size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.width, viewport.height);
    }

    #[must_use]
    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    #[must_use]
    pub fn scene(&self) -> &SceneContext {
        &self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    #[must_use]
    pub fn filter(&self) -> FloorFilter {
        self.filter
    }

    #[must_use]
    pub fn current_date(&self) -> Option<NaiveDateTime> {
        self.current
    }

    /// Result of the most recent tick.
    #[must_use]
    pub fn report(&self) -> &TickReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_date, Floor, ScheduleTask, StateKind, TaskId};
    use pretty_assertions::assert_eq;

    fn viewer() -> BimViewer {
        let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).unwrap();
        viewer.set_schedule(Schedule::new(vec![
            ScheduleTask::new(6, "Shoring Works", "2024-01-01", "2024-01-10"),
            ScheduleTask::new(26, "GF Slab", "2024-02-01", "2024-02-15"),
        ]));
        viewer
    }

    fn states(viewer: &BimViewer, task: i32) -> Vec<StateKind> {
        viewer
            .scene()
            .task_elements(&TaskId::from(task))
            .map(|e| e.state().kind())
            .collect()
    }

    #[test]
    fn no_schedule_is_a_no_op() {
        let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).unwrap();
        assert!(viewer.update_simulation("2024-01-05").is_none());
        assert_eq!(viewer.current_date(), None);
    }

    #[test]
    fn bad_date_keeps_previous_state() {
        let mut viewer = viewer();
        viewer.update_simulation("2024-01-05").unwrap();
        assert!(viewer.update_simulation("not a date").is_none());
        assert!(viewer.update_simulation(None::<&str>).is_none());

        assert_eq!(viewer.current_date(), parse_date("2024-01-05"));
        assert!(states(&viewer, 6).iter().all(|s| *s == StateKind::Active));
    }

    #[test]
    fn filter_change_reruns_last_tick() {
        let mut viewer = viewer();
        viewer.update_simulation("2024-01-05").unwrap();
        let report = viewer.set_filter(FloorFilter::Only(Floor::Ground)).unwrap().clone();

        assert_eq!(report.active_tasks.len(), 1);
        assert!(viewer
            .scene()
            .elements()
            .iter()
            .all(|e| e.visible() == (e.floor == Floor::Ground)));
    }

    #[test]
    fn advance_is_clamped_to_schedule_span() {
        let mut viewer = viewer();
        viewer.advance(Duration::days(-3));
        assert_eq!(viewer.current_date(), parse_date("2024-01-01"));
        viewer.advance(Duration::days(365));
        assert_eq!(viewer.current_date(), parse_date("2024-02-15"));
        assert!(states(&viewer, 26).iter().all(|s| *s == StateKind::Done));
    }

    #[test]
    fn reinit_rebuilds_and_reapplies() {
        let mut viewer = viewer();
        viewer.update_simulation("2024-01-10").unwrap();
        viewer.reinit(ProjectType::Villa).unwrap();

        assert_eq!(viewer.scene().elements().len(), 122);
        assert!(states(&viewer, 6).iter().all(|s| *s == StateKind::Done));
    }

    #[test]
    fn resize_tracks_aspect() {
        let mut viewer = viewer();
        viewer.resize(Viewport::new(0.0, 0.0, 120.0, 40.0));
        assert_eq!(viewer.camera().aspect, 3.0);
    }
}
