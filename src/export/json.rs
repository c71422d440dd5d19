//! JSON export: one pretty-printed document holding both collections.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::{ExportError, ExportSummary, Snapshot};
use crate::db::Database;

/// Encode a snapshot as pretty-printed JSON.
pub fn to_json(snapshot: &Snapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write a snapshot to `path`, replacing any existing file.
pub fn write_json(path: &Path, snapshot: &Snapshot) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writeln!(writer)?;

    writer.flush()?;
    Ok(())
}

/// Read a snapshot previously written by [`write_json`].
pub fn read_json(path: &Path) -> Result<Snapshot, ExportError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Export the whole database as JSON to `path`.
pub async fn export_json<D: Database>(db: &D, path: &Path) -> Result<ExportSummary, ExportError> {
    let snapshot = Snapshot::capture(db).await?;
    write_json(path, &snapshot)?;

    let summary = snapshot.summary();
    info!(path = %path.display(), projects = summary.projects, tasks = summary.tasks, "JSON export written");
    Ok(summary)
}
