//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(projtrack::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(projtrack::db::invalid_data))]
    InvalidData {
        message: String,
        #[help]
        help: String,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(projtrack::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(projtrack::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(
        code(projtrack::db::migration_error),
        help("The store was left at its previous version. Close other programs using it and retry.")
    )]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(projtrack::db::connection_error),
        help("Check that the database path is writable and is not locked by another process.")
    )]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn database(e: impl std::fmt::Display) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
