use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, done_glyph, format_deadline, truncate_with_ellipsis};
use crate::db::{Database, Id, Task, parse_deadline};
use crate::tracker::Tracker;

#[derive(Tabled)]
struct TaskDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.map(|id| id.to_string()).unwrap_or_default(),
            done: done_glyph(task.done),
            name: truncate_with_ellipsis(&task.name, 50),
            deadline: format_deadline(task.deadline),
        }
    }
}

/// List the tasks of a project
pub async fn list_tasks<D: Database>(
    tracker: &Tracker<D>,
    project_id: Id,
    format: &str,
) -> CliResult<String> {
    let tasks = tracker.tasks_for(project_id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&tasks)?),
        _ => Ok(format_table(&tasks)),
    }
}

fn format_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let display: Vec<TaskDisplay> = tasks.iter().map(|t| t.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a task under a project
pub async fn add_task<D: Database>(
    tracker: &Tracker<D>,
    project_id: Id,
    name: &str,
    deadline: &str,
) -> CliResult<String> {
    let deadline = parse_deadline(deadline)?;
    let task = tracker.save_task(None, project_id, name, deadline).await?;
    Ok(format!("✓ Added task: {}", describe(&task)))
}

/// Change a task's name and deadline, keeping its project and done flag
pub async fn edit_task<D: Database>(
    tracker: &Tracker<D>,
    id: Id,
    name: &str,
    deadline: &str,
) -> CliResult<String> {
    let deadline = parse_deadline(deadline)?;
    let existing = tracker.task(id).await?;
    let task = tracker
        .save_task(Some(id), existing.project_id, name, deadline)
        .await?;
    Ok(format!("✓ Updated task: {}", describe(&task)))
}

/// Mark a task done or open again
pub async fn set_done<D: Database>(tracker: &Tracker<D>, id: Id, done: bool) -> CliResult<String> {
    let task = tracker.set_done(id, done).await?;
    let state = if task.done { "done" } else { "open" };
    Ok(format!("✓ Task {} marked {}", id, state))
}

/// Delete a task
pub async fn remove_task<D: Database>(tracker: &Tracker<D>, id: Id) -> CliResult<String> {
    tracker.remove_task(id).await?;
    Ok(format!("✓ Deleted task: {}", id))
}

fn describe(task: &Task) -> String {
    format!(
        "{} ({}) due {}",
        task.name,
        task.id.map(|id| id.to_string()).unwrap_or_default(),
        format_deadline(task.deadline)
    )
}
