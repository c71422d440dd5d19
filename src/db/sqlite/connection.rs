//! SQLite database connection and schema management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::project::SqliteProjectRepository;
use super::schema::{MigrationReport, SchemaManager};
use super::task::SqliteTaskRepository;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// An owned handle over a single connection. Opening it migrates the schema,
/// so a value of this type always exposes both collections. Repositories
/// borrow the handle; [`SqliteDatabase::close`] ends the session.
pub struct SqliteDatabase {
    pool: SqlitePool,
    migration: MigrationReport,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database at the given path and migrate
    /// it to the current schema version.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open_with(path, SchemaManager::default()).await
    }

    /// Open the database at the given path, migrating to `schema`'s target.
    pub async fn open_with<P: AsRef<Path>>(path: P, schema: SchemaManager) -> DbResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening database");
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options, schema).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(connection_error)?;
        Self::connect(options, SchemaManager::default()).await
    }

    async fn connect(options: SqliteConnectOptions, schema: SchemaManager) -> DbResult<Self> {
        // One connection for the whole session. It is never reaped, which
        // also keeps in-memory stores alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        let migration = match schema.migrate(&pool).await {
            Ok(report) => report,
            Err(e) => {
                pool.close().await;
                return Err(e);
            }
        };

        info!(version = migration.to, "database ready");
        Ok(Self { pool, migration })
    }

    /// Access the underlying pool (useful for testing and diagnostics).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// What the schema manager did when this handle was opened.
    pub fn migration(&self) -> &MigrationReport {
        &self.migration
    }

    /// Close the connection. Pending operations finish first.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("database closed");
    }
}

impl Database for SqliteDatabase {
    type Projects<'a> = SqliteProjectRepository<'a>;
    type Tasks<'a> = SqliteTaskRepository<'a>;

    fn projects(&self) -> Self::Projects<'_> {
        SqliteProjectRepository { pool: &self.pool }
    }

    fn tasks(&self) -> Self::Tasks<'_> {
        SqliteTaskRepository { pool: &self.pool }
    }
}

fn connection_error(e: sqlx::Error) -> DbError {
    DbError::Connection {
        message: e.to_string(),
    }
}
