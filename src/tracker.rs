//! Tracker service: the session context used by the command line.
//!
//! Owns the database handle and turns form-like input (an optional id plus
//! field values) into repository calls.

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::db::{
    Database, DbResult, Id, Project, ProjectRepository, Task, TaskRepository,
};
use crate::export::Snapshot;

/// What happens to a project's tasks when the project is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Delete the project's tasks first.
    #[default]
    Cascade,
    /// Leave the tasks in place. They stay reachable through their project id.
    Orphan,
}

/// Result of removing a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub project_id: Id,
    pub tasks_removed: u64,
}

/// Project/task operations over an owned database handle.
pub struct Tracker<D: Database> {
    db: D,
}

impl<D: Database> Tracker<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    /// Give the handle back, e.g. to close it.
    pub fn into_inner(self) -> D {
        self.db
    }

    /// Create a project when `id` is `None`, otherwise rename the existing one.
    #[instrument(skip(self))]
    pub async fn save_project(&self, id: Option<Id>, name: &str) -> DbResult<Project> {
        let project = Project::new(name)?;
        let projects = self.db.projects();

        let saved = match id {
            Some(id) => {
                projects.get(id).await?;
                let project = project.with_id(id);
                projects.update(&project).await?;
                info!(id, "project updated");
                project
            }
            None => {
                let id = projects.add(&project).await?;
                info!(id, "project added");
                project.with_id(id)
            }
        };
        Ok(saved)
    }

    /// Remove a project. The project goes first: if the cascade then fails,
    /// its tasks are left as orphans for [`Tracker::sweep_orphans`].
    #[instrument(skip(self))]
    pub async fn remove_project(&self, id: Id, policy: DeletePolicy) -> DbResult<DeleteOutcome> {
        self.db.projects().delete(id).await?;
        let tasks_removed = match policy {
            DeletePolicy::Cascade => self.db.tasks().delete_by_project(id).await?,
            DeletePolicy::Orphan => 0,
        };
        info!(id, tasks_removed, "project removed");

        Ok(DeleteOutcome {
            project_id: id,
            tasks_removed,
        })
    }

    /// Create a task under `project_id` when `id` is `None`, otherwise replace
    /// the existing task's fields. An edit keeps the task's done flag.
    #[instrument(skip(self))]
    pub async fn save_task(
        &self,
        id: Option<Id>,
        project_id: Id,
        name: &str,
        deadline: NaiveDate,
    ) -> DbResult<Task> {
        let mut task = Task::new(project_id, name, deadline)?;
        self.db.projects().get(project_id).await?;
        let tasks = self.db.tasks();

        let saved = match id {
            Some(id) => {
                let existing = tasks.get(id).await?;
                task.done = existing.done;
                let task = task.with_id(id);
                tasks.update(&task).await?;
                info!(id, project_id, "task updated");
                task
            }
            None => {
                let id = tasks.add(&task).await?;
                info!(id, project_id, "task added");
                task.with_id(id)
            }
        };
        Ok(saved)
    }

    /// Set a task's done flag. The rest of the record is written back unchanged.
    #[instrument(skip(self))]
    pub async fn set_done(&self, id: Id, done: bool) -> DbResult<Task> {
        let tasks = self.db.tasks();
        let task = Task {
            done,
            ..tasks.get(id).await?
        };
        tasks.update(&task).await?;
        info!(id, done, "task toggled");
        Ok(task)
    }

    #[instrument(skip(self))]
    pub async fn remove_task(&self, id: Id) -> DbResult<()> {
        self.db.tasks().delete(id).await?;
        info!(id, "task removed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn projects(&self) -> DbResult<Vec<Project>> {
        self.db.projects().list().await
    }

    #[instrument(skip(self))]
    pub async fn task(&self, id: Id) -> DbResult<Task> {
        self.db.tasks().get(id).await
    }

    #[instrument(skip(self))]
    pub async fn tasks_for(&self, project_id: Id) -> DbResult<Vec<Task>> {
        self.db.tasks().list_by_project(project_id).await
    }

    /// Every project and task, as exported.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> DbResult<Snapshot> {
        Snapshot::capture(&self.db).await
    }

    /// Delete tasks whose project no longer exists.
    #[instrument(skip(self))]
    pub async fn sweep_orphans(&self) -> DbResult<u64> {
        let removed = self.db.tasks().delete_orphans().await?;
        info!(removed, "orphan sweep finished");
        Ok(removed)
    }
}
