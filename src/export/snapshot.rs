use crate::simulation::ActiveTask;
use crate::viewer::BimViewer;
use serde::Serialize;

/// Per-element simulation state at one date.
#[derive(Debug, Clone, Serialize)]
pub struct ElementSnapshot {
    pub element: usize,
    pub task_id: String,
    pub task_name: Option<String>,
    pub shape: &'static str,
    pub floor: &'static str,
    pub state: &'static str,
    pub progress: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub project_type: String,
    pub as_of: Option<String>,
    pub filter: &'static str,
    pub active_tasks: Vec<ActiveTask>,
    pub elements: Vec<ElementSnapshot>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(viewer: &BimViewer) -> Self {
        let schedule = viewer.schedule();
        let elements = viewer
            .scene()
            .elements()
            .iter()
            .map(|e| {
                let state = e.state();
                ElementSnapshot {
                    element: e.id,
                    task_id: e.task_id.to_string(),
                    task_name: schedule
                        .and_then(|s| s.find(&e.task_id))
                        .map(|t| t.name.clone()),
                    shape: e.shape.name(),
                    floor: e.floor.tag(),
                    state: state.kind().as_str(),
                    progress: state.progress(),
                    visible: e.visible(),
                }
            })
            .collect();

        Self {
            project_type: viewer.project_type().to_string(),
            as_of: viewer
                .current_date()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string()),
            filter: viewer.filter().tag(),
            active_tasks: viewer.report().active_tasks.clone(),
            elements,
        }
    }
}
