use super::Snapshot;
use crate::error::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn export_json<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::Create {
        path: path_ref.to_path_buf(),
        source,
    })?;

    write_json(snapshot, BufWriter::new(file))
}

/// Pretty-printed snapshot followed by a newline.
pub fn write_json<W: Write>(snapshot: &Snapshot, mut out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, snapshot)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
