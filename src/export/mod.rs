//! Export module - bulk export of the tracker database.
//!
//! Both encoders work from a [`Snapshot`]: the full project and task
//! listings read at export time. Neither writes back to the store.

mod document;
#[cfg(test)]
mod document_test;
mod json;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{Database, DbError, DbResult, Id, Project, ProjectRepository, Task, TaskRepository};

pub use document::{Document, DocumentLayout, PRINT_DATE_FORMAT, export_document, render_document};
pub use json::{export_json, read_json, to_json, write_json};

/// Errors that can occur during export.
#[derive(Error, Diagnostic, Debug)]
pub enum ExportError {
    #[error("Database error: {0}")]
    #[diagnostic(code(projtrack::export::database))]
    Database(#[from] DbError),

    #[error("IO error: {0}")]
    #[diagnostic(code(projtrack::export::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(projtrack::export::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid page layout: {message}")]
    #[diagnostic(code(projtrack::export::layout))]
    Layout { message: String },
}

/// Every project and task at one point in time.
///
/// Serializes as `{ "projects": [...], "tasks": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Read both collections.
    pub async fn capture<D: Database>(db: &D) -> DbResult<Self> {
        let projects = db.projects().list().await?;
        let tasks = db.tasks().list().await?;
        Ok(Self { projects, tasks })
    }

    /// Tasks whose `project_id` is `project_id`, in stored order.
    pub fn tasks_of(&self, project_id: Id) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| t.project_id == project_id)
    }

    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            projects: self.projects.len(),
            tasks: self.tasks.len(),
        }
    }
}

/// Summary of exported entities.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub projects: usize,
    pub tasks: usize,
}

impl ExportSummary {
    pub fn total(&self) -> usize {
        self.projects + self.tasks
    }
}
