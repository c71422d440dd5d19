use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::db::{Database, Id, Project};
use crate::tracker::{DeletePolicy, Tracker};

/// Project row with task counts, as listed to the user.
#[derive(Debug, Serialize)]
struct ProjectSummary {
    id: Id,
    name: String,
    open: usize,
    total: usize,
}

#[derive(Tabled)]
struct ProjectDisplay {
    #[tabled(rename = "ID")]
    id: Id,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Open")]
    open: usize,
    #[tabled(rename = "Tasks")]
    total: usize,
}

impl From<&ProjectSummary> for ProjectDisplay {
    fn from(summary: &ProjectSummary) -> Self {
        Self {
            id: summary.id,
            name: truncate_with_ellipsis(&summary.name, 40),
            open: summary.open,
            total: summary.total,
        }
    }
}

/// List all projects
pub async fn list_projects<D: Database>(tracker: &Tracker<D>, format: &str) -> CliResult<String> {
    let mut summaries = Vec::new();
    for project in tracker.projects().await? {
        let Some(id) = project.id else { continue };
        let tasks = tracker.tasks_for(id).await?;
        summaries.push(ProjectSummary {
            id,
            name: project.name,
            open: tasks.iter().filter(|t| !t.done).count(),
            total: tasks.len(),
        });
    }

    match format {
        "json" => Ok(serde_json::to_string_pretty(&summaries)?),
        _ => Ok(format_table(&summaries)),
    }
}

fn format_table(summaries: &[ProjectSummary]) -> String {
    if summaries.is_empty() {
        return "No projects found.".to_string();
    }

    let display: Vec<ProjectDisplay> = summaries.iter().map(|s| s.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a new project
pub async fn add_project<D: Database>(tracker: &Tracker<D>, name: &str) -> CliResult<String> {
    let project = tracker.save_project(None, name).await?;
    Ok(format!("✓ Added project: {}", describe(&project)))
}

/// Rename an existing project
pub async fn rename_project<D: Database>(
    tracker: &Tracker<D>,
    id: Id,
    name: &str,
) -> CliResult<String> {
    let project = tracker.save_project(Some(id), name).await?;
    Ok(format!("✓ Renamed project: {}", describe(&project)))
}

/// Delete a project, and its tasks unless `keep_tasks` is set
pub async fn remove_project<D: Database>(
    tracker: &Tracker<D>,
    id: Id,
    keep_tasks: bool,
) -> CliResult<String> {
    let policy = if keep_tasks {
        DeletePolicy::Orphan
    } else {
        DeletePolicy::Cascade
    };
    let outcome = tracker.remove_project(id, policy).await?;

    Ok(match policy {
        DeletePolicy::Cascade => format!(
            "✓ Deleted project: {} ({} tasks removed)",
            outcome.project_id, outcome.tasks_removed
        ),
        DeletePolicy::Orphan => format!(
            "✓ Deleted project: {} (tasks kept, run `ptk sweep` to remove them)",
            outcome.project_id
        ),
    })
}

/// Remove tasks left behind by deleted projects
pub async fn sweep<D: Database>(tracker: &Tracker<D>) -> CliResult<String> {
    let removed = tracker.sweep_orphans().await?;
    Ok(match removed {
        0 => "✓ No orphaned tasks".to_string(),
        n => format!("✓ Removed {} orphaned tasks", n),
    })
}

fn describe(project: &Project) -> String {
    match project.id {
        Some(id) => format!("{} ({})", project.name, id),
        None => project.name.clone(),
    }
}
