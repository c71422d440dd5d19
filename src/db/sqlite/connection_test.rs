//! Tests for SQLite database connection lifecycle.

use tempfile::TempDir;

use crate::db::{
    Database, DbError, Project, ProjectRepository, SCHEMA_VERSION, SchemaManager, SqliteDatabase,
};

async fn object_names(db: &SqliteDatabase, kind: &str) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = ? ORDER BY name")
        .bind(kind)
        .fetch_all(db.pool())
        .await
        .expect("Query should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_store_exposes_both_collections() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    let tables = object_names(&db, "table").await;
    assert!(tables.iter().any(|t| t == "projects"), "{:?}", tables);
    assert!(tables.iter().any(|t| t == "tasks"), "{:?}", tables);

    let indexes = object_names(&db, "index").await;
    assert!(indexes.iter().any(|i| i == "by_project"), "{:?}", indexes);
}

#[tokio::test(flavor = "multi_thread")]
async fn fresh_store_reports_full_migration() {
    let db = SqliteDatabase::in_memory().await.unwrap();

    let report = db.migration();
    assert_eq!(report.from, 0);
    assert_eq!(report.to, SCHEMA_VERSION);
    assert_eq!(report.applied, vec![1, 2]);
    assert!(report.is_upgrade());

    let stored = SchemaManager::stored_version(db.pool()).await.unwrap();
    assert_eq!(stored, SCHEMA_VERSION);
}

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_store_survives_between_calls() {
    let db = SqliteDatabase::in_memory().await.unwrap();

    db.projects()
        .add(&Project::new("Alpha").unwrap())
        .await
        .unwrap();
    tokio::task::yield_now().await;

    let projects = db.projects().list().await.unwrap();
    assert_eq!(projects.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn file_store_keeps_records_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracker.db");

    let db = SqliteDatabase::open(&path).await.unwrap();
    let id = db
        .projects()
        .add(&Project::new("Alpha").unwrap())
        .await
        .unwrap();
    db.close().await;

    let db = SqliteDatabase::open(&path).await.unwrap();
    assert!(db.migration().applied.is_empty());
    assert!(!db.migration().is_upgrade());

    let project = db.projects().get(id).await.unwrap();
    assert_eq!(project.name, "Alpha");
    db.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn open_in_missing_directory_is_a_connection_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("tracker.db");

    let result = SqliteDatabase::open(&path).await;
    assert!(matches!(result, Err(DbError::Connection { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_non_database_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, vec![0x42u8; 4096]).unwrap();

    let result = SqliteDatabase::open(&path).await;
    assert!(matches!(
        result,
        Err(DbError::Connection { .. }) | Err(DbError::Migration { .. })
    ));
}
