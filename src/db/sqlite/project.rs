//! SQLite ProjectRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::store::{Record, RecordStore, SqlValue};
use crate::db::{DbError, DbResult, Id, Project, ProjectRepository};

impl Record for Project {
    const ENTITY: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.name.trim().into()]
    }

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        Ok(Project {
            id: Some(row.try_get("id").map_err(DbError::database)?),
            name: row.try_get("name").map_err(DbError::database)?,
        })
    }

    fn validate(&self) -> DbResult<()> {
        Project::validate(self)
    }
}

/// SQLx-backed project repository.
pub struct SqliteProjectRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl SqliteProjectRepository<'_> {
    fn store(&self) -> RecordStore<'_, Project> {
        RecordStore::new(self.pool)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    async fn add(&self, project: &Project) -> DbResult<Id> {
        self.store().add(project).await
    }

    async fn get(&self, id: Id) -> DbResult<Project> {
        self.store()
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found(Project::ENTITY, id))
    }

    async fn list(&self) -> DbResult<Vec<Project>> {
        self.store().get_all().await
    }

    async fn update(&self, project: &Project) -> DbResult<Id> {
        if project.id.is_none() {
            return Err(DbError::InvalidData {
                message: "project update requires an id".to_string(),
                help: "Add the project first and update it with the returned id".to_string(),
            });
        }
        self.store().put(project).await
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        self.store().delete(id).await
    }
}
