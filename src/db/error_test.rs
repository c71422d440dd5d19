//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        entity_type: "Project".to_string(),
        id: "42".to_string(),
    };
    assert_eq!(err.to_string(), "Entity not found: Project with id '42'");
}

#[test]
fn invalid_data_error_displays_message_only() {
    let err = DbError::InvalidData {
        message: "update requires an id".to_string(),
        help: "Create the project first".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid data: update requires an id");
}

#[test]
fn validation_error_displays_correctly() {
    let err = DbError::Validation {
        message: "project name cannot be empty".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Validation error: project name cannot be empty"
    );
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::database("disk I/O error");
    assert_eq!(err.to_string(), "Database error: disk I/O error");
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "failed to create table tasks".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: failed to create table tasks"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database file".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Connection error: unable to open database file"
    );
}

#[test]
fn not_found_helper_formats_integer_ids() {
    let err = DbError::not_found("Task", 7);
    assert!(matches!(
        err,
        DbError::NotFound { ref entity_type, ref id } if entity_type == "Task" && id == "7"
    ));
}

#[test]
fn db_result_propagates_with_question_mark() {
    fn inner() -> DbResult<i64> {
        Err(DbError::Validation {
            message: "nope".to_string(),
        })
    }
    fn outer() -> DbResult<i64> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert!(matches!(outer(), Err(DbError::Validation { .. })));
}
