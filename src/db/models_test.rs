//! Tests for domain models.

use chrono::NaiveDate;

use crate::db::DbError;
use crate::db::models::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn project_new_trims_name() {
    let project = Project::new("  Alpha  ").unwrap();
    assert_eq!(project.name, "Alpha");
    assert_eq!(project.id, None);
}

#[test]
fn project_new_rejects_blank_name() {
    let result = Project::new("   \t");
    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[test]
fn task_new_defaults_to_open() {
    let task = Task::new(1, " Write spec ", date(2025, 6, 1)).unwrap();
    assert_eq!(task.name, "Write spec");
    assert!(!task.done);
    assert_eq!(task.id, None);
}

#[test]
fn task_new_rejects_empty_name() {
    let result = Task::new(1, "", date(2025, 6, 1));
    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[test]
fn validate_catches_records_built_by_hand() {
    let task = Task {
        id: Some(3),
        project_id: 1,
        name: "  ".to_string(),
        deadline: date(2025, 1, 1),
        done: true,
    };
    assert!(task.validate().is_err());
}

#[test]
fn task_serializes_in_export_layout() {
    let task = Task::new(1, "Write spec", date(2025, 6, 1))
        .unwrap()
        .with_id(9);
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 9,
            "projectId": 1,
            "name": "Write spec",
            "deadline": "2025-06-01",
            "done": false
        })
    );
}

#[test]
fn task_done_defaults_when_missing_from_json() {
    let task: Task = serde_json::from_str(
        r#"{"id":1,"projectId":2,"name":"x","deadline":"2025-02-03"}"#,
    )
    .unwrap();
    assert!(!task.done);
    assert_eq!(task.deadline, date(2025, 2, 3));
}

#[test]
fn unsaved_project_omits_id() {
    let json = serde_json::to_string(&Project::new("Alpha").unwrap()).unwrap();
    assert_eq!(json, r#"{"name":"Alpha"}"#);
}

#[test]
fn parse_deadline_accepts_iso_day() {
    assert_eq!(parse_deadline("2025-06-01").unwrap(), date(2025, 6, 1));
}

#[test]
fn parse_deadline_rejects_missing_or_malformed() {
    assert!(matches!(
        parse_deadline(""),
        Err(DbError::Validation { .. })
    ));
    assert!(matches!(
        parse_deadline("01/06/2025"),
        Err(DbError::Validation { .. })
    ));
}

#[test]
fn names_with_control_characters_are_rejected() {
    let deadline = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    assert!(matches!(
        Project::new("x\ny"),
        Err(DbError::Validation { .. })
    ));
    assert!(matches!(
        Task::new(1, "a\nb\nc\nd", deadline),
        Err(DbError::Validation { .. })
    ));
    assert!(matches!(
        Task::new(1, "page\u{0c}break", deadline),
        Err(DbError::Validation { .. })
    ));
    assert!(Task::new(1, "tabs\tare control too", deadline).is_err());
    assert!(Task::new(1, "Écrire la spec ✓", deadline).is_ok());
}
