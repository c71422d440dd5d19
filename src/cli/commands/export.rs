use std::path::Path;

use crate::cli::error::CliResult;
use crate::db::Database;
use crate::export::{DocumentLayout, export_document, export_json};
use crate::tracker::Tracker;

/// Write the JSON export
pub async fn json<D: Database>(tracker: &Tracker<D>, path: &Path) -> CliResult<String> {
    let summary = export_json(tracker.database(), path).await?;
    Ok(format!(
        "✓ Exported {} projects and {} tasks to {}",
        summary.projects,
        summary.tasks,
        path.display()
    ))
}

/// Write the printable document
pub async fn print<D: Database>(
    tracker: &Tracker<D>,
    path: &Path,
    layout: DocumentLayout,
) -> CliResult<String> {
    let summary = export_document(tracker.database(), path, layout).await?;
    Ok(format!(
        "✓ Printed {} projects and {} tasks to {}",
        summary.projects,
        summary.tasks,
        path.display()
    ))
}
