//! Versioned schema and incremental migration.
//!
//! The stored version lives in SQLite's `user_version` header field. Opening
//! a store below the target version applies every missing step in order,
//! then a completeness pass re-creates anything still absent. Steps only
//! ever create; nothing is dropped or renamed.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::{DbError, DbResult};

/// Schema version this build migrates to.
pub const SCHEMA_VERSION: u32 = 3;

const CREATE_PROJECTS: &str = "CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)";

const CREATE_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    deadline TEXT NOT NULL,
    done INTEGER NOT NULL DEFAULT 0
)";

const CREATE_BY_PROJECT: &str = "CREATE INDEX IF NOT EXISTS by_project ON tasks (project_id)";

struct Step {
    version: u32,
    description: &'static str,
    statements: &'static [&'static str],
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        description: "create projects collection",
        statements: &[CREATE_PROJECTS],
    },
    Step {
        version: 2,
        description: "create tasks collection with by_project index",
        statements: &[CREATE_TASKS, CREATE_BY_PROJECT],
    },
];

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version found on disk (0 for a fresh store).
    pub from: u32,
    /// Version recorded after the run.
    pub to: u32,
    /// Step versions applied during this run, in order.
    pub applied: Vec<u32>,
}

impl MigrationReport {
    pub fn is_upgrade(&self) -> bool {
        self.to > self.from
    }
}

/// Applies schema steps up to a target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaManager {
    target: u32,
}

impl Default for SchemaManager {
    fn default() -> Self {
        Self::new(SCHEMA_VERSION)
    }
}

impl SchemaManager {
    pub fn new(target: u32) -> Self {
        Self { target }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Read the version recorded in the store header.
    pub async fn stored_version(pool: &SqlitePool) -> DbResult<u32> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(pool)
            .await
            .map_err(DbError::database)?;
        u32::try_from(version).map_err(|_| DbError::InvalidData {
            message: format!("stored schema version {} is negative", version),
            help: "The database header was modified by another program".to_string(),
        })
    }

    /// Bring the store up to the target version.
    ///
    /// Runs in one transaction: on any failure the store keeps its previous
    /// version and layout.
    pub async fn migrate(&self, pool: &SqlitePool) -> DbResult<MigrationReport> {
        let mut tx = pool.begin().await.map_err(migration_error)?;

        let stored: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&mut *tx)
            .await
            .map_err(migration_error)?;
        let from = u32::try_from(stored).map_err(|_| DbError::Migration {
            message: format!("stored schema version {} is negative", stored),
        })?;

        if from > self.target {
            warn!(
                stored = from,
                target = self.target,
                "store is newer than this build, leaving version untouched"
            );
        }

        let mut applied = Vec::new();
        for step in STEPS
            .iter()
            .filter(|s| s.version > from && s.version <= self.target)
        {
            debug!(version = step.version, "applying step: {}", step.description);
            for statement in step.statements {
                sqlx::query(statement)
                    .execute(&mut *tx)
                    .await
                    .map_err(migration_error)?;
            }
            applied.push(step.version);
        }

        // Completeness pass: covers tampered stores and partial earlier runs.
        for step in STEPS.iter().filter(|s| s.version <= self.target) {
            for statement in step.statements {
                sqlx::query(statement)
                    .execute(&mut *tx)
                    .await
                    .map_err(migration_error)?;
            }
        }

        let to = from.max(self.target);
        if to != from {
            // PRAGMA arguments cannot be bound.
            sqlx::query(&format!("PRAGMA user_version = {}", to))
                .execute(&mut *tx)
                .await
                .map_err(migration_error)?;
        }

        tx.commit().await.map_err(migration_error)?;

        let report = MigrationReport { from, to, applied };
        if report.is_upgrade() {
            info!(from = report.from, to = report.to, steps = ?report.applied, "schema migrated");
        } else {
            debug!(version = report.to, "schema up to date");
        }
        Ok(report)
    }
}

fn migration_error(e: sqlx::Error) -> DbError {
    DbError::Migration {
        message: e.to_string(),
    }
}
