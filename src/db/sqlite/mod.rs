//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod project;
mod schema;
mod store;
mod task;

#[cfg(test)]
mod connection_test;

pub use connection::SqliteDatabase;
pub use project::SqliteProjectRepository;
pub use schema::{MigrationReport, SCHEMA_VERSION, SchemaManager};
pub use store::{Index, Record, RecordStore, SqlValue};
pub use task::{BY_PROJECT, SqliteTaskRepository};
