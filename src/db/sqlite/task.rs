//! SQLite TaskRepository implementation.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::store::{Index, Record, RecordStore, SqlValue};
use crate::db::{DEADLINE_FORMAT, DbError, DbResult, Id, Task, TaskRepository};

/// Secondary index mapping tasks to their project.
pub const BY_PROJECT: Index = Index {
    name: "by_project",
    column: "project_id",
};

impl Record for Task {
    const ENTITY: &'static str = "Task";
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &["project_id", "name", "deadline", "done"];
    const INDEXES: &'static [Index] = &[BY_PROJECT];

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.project_id.into(),
            self.name.trim().into(),
            self.deadline.into(),
            self.done.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let deadline: NaiveDate = row.try_get("deadline").map_err(|e| DbError::InvalidData {
            message: format!("stored deadline is not a date: {}", e),
            help: format!("Deadlines are stored as {}", DEADLINE_FORMAT),
        })?;

        Ok(Task {
            id: Some(row.try_get("id").map_err(DbError::database)?),
            project_id: row.try_get("project_id").map_err(DbError::database)?,
            name: row.try_get("name").map_err(DbError::database)?,
            deadline,
            done: row.try_get("done").map_err(DbError::database)?,
        })
    }

    fn validate(&self) -> DbResult<()> {
        Task::validate(self)
    }
}

/// SQLx-backed task repository.
pub struct SqliteTaskRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl SqliteTaskRepository<'_> {
    fn store(&self) -> RecordStore<'_, Task> {
        RecordStore::new(self.pool)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    async fn add(&self, task: &Task) -> DbResult<Id> {
        self.store().add(task).await
    }

    async fn get(&self, id: Id) -> DbResult<Task> {
        self.store()
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found(Task::ENTITY, id))
    }

    async fn list(&self) -> DbResult<Vec<Task>> {
        self.store().get_all().await
    }

    async fn list_by_project(&self, project_id: Id) -> DbResult<Vec<Task>> {
        self.store()
            .get_all_by_index(BY_PROJECT.name, project_id)
            .await
    }

    async fn update(&self, task: &Task) -> DbResult<Id> {
        self.store().put(task).await
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        self.store().delete(id).await
    }

    async fn delete_by_project(&self, project_id: Id) -> DbResult<u64> {
        self.store()
            .delete_by_index(BY_PROJECT.name, project_id)
            .await
    }

    async fn delete_orphans(&self) -> DbResult<u64> {
        let result =
            sqlx::query("DELETE FROM tasks WHERE project_id NOT IN (SELECT id FROM projects)")
                .execute(self.pool)
                .await
                .map_err(DbError::database)?;
        Ok(result.rows_affected())
    }
}
