use super::Snapshot;
use crate::error::ExportError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::Create {
        path: path_ref.to_path_buf(),
        source,
    })?;

    write_csv(snapshot, file)
}

/// Writes one row per element.
pub fn write_csv<W: Write>(snapshot: &Snapshot, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record([
        "Element", "Task ID", "Task Name", "Shape", "Floor", "State", "Progress", "Visible",
    ])?;

    for element in &snapshot.elements {
        let id = element.element.to_string();
        let progress = format!("{:.3}", element.progress);
        writer.write_record([
            id.as_str(),
            element.task_id.as_str(),
            element.task_name.as_deref().unwrap_or("-"),
            element.shape,
            element.floor,
            element.state,
            progress.as_str(),
            if element.visible { "yes" } else { "no" },
        ])?;
    }

    writer.flush()?;

    Ok(())
}
