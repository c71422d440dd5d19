//! Domain models for the tracker database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application. Field names serialize in camelCase,
//! which is also the layout of the JSON export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Store-assigned integer key used for all entities.
pub type Id = i64;

/// Calendar-day format used for deadlines, in storage and on the command line.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A named project owning a list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// `None` until the store assigns a key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

impl Project {
    /// Build a new, not yet stored project. The name is trimmed.
    pub fn new(name: &str) -> DbResult<Self> {
        let project = Self {
            id: None,
            name: name.trim().to_string(),
        };
        project.validate()?;
        Ok(project)
    }

    /// Attach a store key, e.g. when resubmitting an edited project.
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> DbResult<()> {
        require_name("project", &self.name)
    }
}

/// A dated task belonging to a project.
///
/// `project_id` is a convention only: the store does not check that the
/// project exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub project_id: Id,
    pub name: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Build a new, open task. The name is trimmed.
    pub fn new(project_id: Id, name: &str, deadline: NaiveDate) -> DbResult<Self> {
        let task = Self {
            id: None,
            project_id,
            name: name.trim().to_string(),
            deadline,
            done: false,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> DbResult<()> {
        require_name("task", &self.name)
    }
}

/// Parse a `YYYY-MM-DD` deadline.
pub fn parse_deadline(value: &str) -> DbResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DbError::Validation {
            message: "task deadline is required".to_string(),
        });
    }
    NaiveDate::parse_from_str(value, DEADLINE_FORMAT).map_err(|e| DbError::Validation {
        message: format!("invalid deadline '{}': {}", value, e),
    })
}

fn require_name(entity: &str, name: &str) -> DbResult<()> {
    if name.trim().is_empty() {
        return Err(DbError::Validation {
            message: format!("{} name cannot be empty", entity),
        });
    }
    if name.chars().any(char::is_control) {
        return Err(DbError::Validation {
            message: format!("{} name must be a single line of printable text", entity),
        });
    }
    Ok(())
}
