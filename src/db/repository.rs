//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Every call is a single operation: it either completes or fails as a whole.

use crate::db::{
    DbResult,
    models::{Id, Project, Task},
};

/// Repository for Project operations.
pub trait ProjectRepository {
    /// Insert a project, ignoring any id it carries. Returns the new id.
    async fn add(&self, project: &Project) -> DbResult<Id>;

    /// Get a project by ID.
    async fn get(&self, id: Id) -> DbResult<Project>;

    /// Get all projects, in id order.
    async fn list(&self) -> DbResult<Vec<Project>>;

    /// Replace the project stored at `project.id` (inserted if absent).
    async fn update(&self, project: &Project) -> DbResult<Id>;

    /// Delete a project by ID. Deleting a missing id is not an error.
    /// Tasks referencing the project are left untouched.
    async fn delete(&self, id: Id) -> DbResult<()>;
}

/// Repository for Task operations.
pub trait TaskRepository {
    /// Insert a task, ignoring any id it carries. Returns the new id.
    async fn add(&self, task: &Task) -> DbResult<Id>;

    /// Get a task by ID.
    async fn get(&self, id: Id) -> DbResult<Task>;

    /// Get all tasks, in id order.
    async fn list(&self) -> DbResult<Vec<Task>>;

    /// Get the tasks of one project via the `by_project` index.
    async fn list_by_project(&self, project_id: Id) -> DbResult<Vec<Task>>;

    /// Replace the task stored at `task.id`, or insert it when it has none.
    async fn update(&self, task: &Task) -> DbResult<Id>;

    /// Delete a task by ID. Deleting a missing id is not an error.
    async fn delete(&self, id: Id) -> DbResult<()>;

    /// Delete every task of a project. Returns the number removed.
    async fn delete_by_project(&self, project_id: Id) -> DbResult<u64>;

    /// Delete tasks whose project no longer exists. Returns the number removed.
    async fn delete_orphans(&self) -> DbResult<u64>;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Projects<'a>: ProjectRepository
    where
        Self: 'a;
    type Tasks<'a>: TaskRepository
    where
        Self: 'a;

    /// Get the project repository.
    fn projects(&self) -> Self::Projects<'_>;

    /// Get the task repository.
    fn tasks(&self) -> Self::Tasks<'_>;
}
