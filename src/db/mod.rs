//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! with a SQLite implementation behind them.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Project, Task)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLite-backed schema manager, record store and repositories

mod error;
mod models;
mod repository;
pub mod sqlite;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{MigrationReport, SCHEMA_VERSION, SchemaManager, SqliteDatabase};
