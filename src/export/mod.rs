pub mod csv;
pub mod json;
pub mod snapshot;

pub use crate::error::ExportError;
pub use csv::{export_csv, write_csv};
pub use json::{export_json, write_json};
pub use snapshot::{ElementSnapshot, Snapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProjectType;
    use crate::model::{Schedule, ScheduleTask};
    use crate::picking::Viewport;
    use crate::viewer::BimViewer;
    use pretty_assertions::assert_eq;

    fn snapshot() -> Snapshot {
        let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).unwrap();
        viewer.set_schedule(Schedule::new(vec![ScheduleTask::new(
            1,
            "Mobilization",
            "2024-01-01",
            "2024-01-03",
        )]));
        viewer.update_simulation("2024-01-02");
        Snapshot::capture(&viewer)
    }

    #[test]
    fn captures_every_element() {
        let snapshot = snapshot();
        assert_eq!(snapshot.elements.len(), 122);
        assert_eq!(snapshot.as_of.as_deref(), Some("2024-01-02 00:00"));
        assert_eq!(snapshot.filter, "all");
        assert_eq!(snapshot.active_tasks.len(), 1);
        assert_eq!(snapshot.active_tasks[0].percent, 50);
    }

    #[test]
    fn csv_has_header_and_one_row_per_element() {
        let snapshot = snapshot();
        let mut out = Vec::new();
        write_csv(&snapshot, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Element,Task ID,Task Name,Shape,Floor,State,Progress,Visible")
        );
        assert_eq!(
            lines.next(),
            Some("0,1,Mobilization,box,sub,active,0.500,yes")
        );
        assert_eq!(text.lines().count(), 123);
    }

    #[test]
    fn json_lists_elements_and_active_tasks() {
        let snapshot = snapshot();
        let mut out = Vec::new();
        write_json(&snapshot, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["project_type"], "Villa");
        assert_eq!(value["active_tasks"][0]["name"], "Mobilization");
        assert_eq!(value["elements"].as_array().map(Vec::len), Some(122));
        assert_eq!(value["elements"][0]["state"], "active");
    }

    #[test]
    fn unwritable_path_reports_the_file() {
        let path = std::env::temp_dir()
            .join("site-4d-missing-dir")
            .join("nested")
            .join("snapshot.json");
        let err = export_json(&snapshot(), &path).unwrap_err();
        match err {
            ExportError::Create { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected create error, got {other:?}"),
        }
    }
}
