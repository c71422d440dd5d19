//! Tests for the printable document export.

use chrono::NaiveDate;
use tempfile::TempDir;

use super::*;
use crate::db::{Project, SqliteDatabase, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project(id: i64, name: &str) -> Project {
    Project::new(name).unwrap().with_id(id)
}

fn task(id: i64, project_id: i64, name: &str, done: bool) -> Task {
    Task {
        done,
        ..Task::new(project_id, name, date(2025, 6, 1))
            .unwrap()
            .with_id(id)
    }
}

fn small_layout() -> DocumentLayout {
    DocumentLayout {
        lines_per_page: 8,
        width: 40,
    }
}

#[test]
fn sections_list_tasks_with_glyphs_and_dates() {
    let snapshot = Snapshot {
        projects: vec![project(1, "Alpha")],
        tasks: vec![task(1, 1, "Write spec", false), task(2, 1, "Review", true)],
    };

    let document = render_document(&snapshot, DocumentLayout::default()).unwrap();
    assert_eq!(document.page_count(), 1);
    assert_eq!(
        document.pages()[0],
        vec![
            "Alpha".to_string(),
            "=====".to_string(),
            "  [ ] Write spec (01/06/2025)".to_string(),
            "  [x] Review (01/06/2025)".to_string(),
        ]
    );
}

#[test]
fn empty_project_gets_placeholder() {
    let snapshot = Snapshot {
        projects: vec![project(1, "Alpha"), project(2, "Empty")],
        tasks: vec![task(1, 1, "Only", false)],
    };

    let document = render_document(&snapshot, DocumentLayout::default()).unwrap();
    let page = &document.pages()[0];
    assert_eq!(page[3], "");
    assert_eq!(page[4], "Empty");
    assert_eq!(page[6], "(no tasks)");
}

#[test]
fn empty_snapshot_renders_single_page() {
    let document = render_document(&Snapshot::default(), DocumentLayout::default()).unwrap();
    assert_eq!(document.page_count(), 1);
    assert_eq!(document.pages()[0], vec!["No projects.".to_string()]);
}

#[test]
fn long_project_paginates_within_budget() {
    let tasks: Vec<Task> = (1..=20)
        .map(|i| task(i, 1, &format!("task {}", i), false))
        .collect();
    let snapshot = Snapshot {
        projects: vec![project(1, "Big")],
        tasks,
    };
    let layout = small_layout();

    let document = render_document(&snapshot, layout).unwrap();
    // 2 heading lines + 20 tasks over 6 body lines per page.
    assert_eq!(document.page_count(), 4);

    let rendered = document.render();
    let pages: Vec<&str> = rendered.split('\u{0c}').collect();
    assert_eq!(pages.len(), 4);
    for (i, page) in pages.iter().enumerate() {
        assert!(page.lines().count() <= layout.lines_per_page, "{:?}", page);
        assert!(page.contains(&format!("Page {}/4", i + 1)));
    }
}

#[test]
fn heading_is_not_stranded_at_page_bottom() {
    let snapshot = Snapshot {
        projects: vec![project(1, "First"), project(2, "Second")],
        tasks: vec![
            task(1, 1, "a", false),
            task(2, 1, "b", false),
            task(3, 2, "c", false),
        ],
    };

    // Body holds 6 lines: "First", "=====", a, b, "" leaves one line, too few
    // for "Second" with its underline and first task.
    let document = render_document(&snapshot, small_layout()).unwrap();
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.pages()[1][0], "Second");
    assert_eq!(document.pages()[1][2], "  [ ] c (01/06/2025)");
}

#[test]
fn long_lines_are_cut_to_width() {
    let long_name = "x".repeat(100);
    let snapshot = Snapshot {
        projects: vec![project(1, &long_name)],
        tasks: vec![],
    };

    let document = render_document(&snapshot, small_layout()).unwrap();
    let heading = &document.pages()[0][0];
    assert_eq!(heading.chars().count(), 40);
    assert!(heading.ends_with("..."));
    assert_eq!(document.pages()[0][1].chars().count(), 40);
}

#[test]
fn orphaned_tasks_are_not_printed() {
    let snapshot = Snapshot {
        projects: vec![project(1, "Alpha")],
        tasks: vec![task(1, 9, "stray", false)],
    };

    let document = render_document(&snapshot, DocumentLayout::default()).unwrap();
    assert!(!document.render().contains("stray"));
}

#[test]
fn tiny_layouts_are_rejected() {
    let too_short = DocumentLayout {
        lines_per_page: 4,
        width: 80,
    };
    assert!(matches!(
        render_document(&Snapshot::default(), too_short),
        Err(ExportError::Layout { .. })
    ));

    let too_narrow = DocumentLayout {
        lines_per_page: 60,
        width: 10,
    };
    assert!(matches!(
        render_document(&Snapshot::default(), too_narrow),
        Err(ExportError::Layout { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn export_document_writes_file() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.txt");

    let summary = export_document(&db, &path, DocumentLayout::default())
        .await
        .unwrap();
    assert_eq!(summary.total(), 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("No projects."));
    assert!(content.contains("Page 1/1"));
}

#[test]
fn control_characters_never_add_physical_lines() {
    let multiline = |id: i64| Task {
        id: Some(id),
        project_id: 1,
        name: "a\nb\nc\u{0c}d".to_string(),
        deadline: date(2025, 6, 1),
        done: false,
    };
    let snapshot = Snapshot {
        projects: vec![Project {
            id: Some(1),
            name: "x\ny".to_string(),
        }],
        tasks: (1..=3).map(multiline).collect(),
    };
    let layout = small_layout();

    let document = render_document(&snapshot, layout).unwrap();
    let rendered = document.render();
    let pages: Vec<&str> = rendered.split('\u{0c}').collect();

    assert_eq!(pages.len(), document.page_count());
    for page in &pages {
        assert!(page.lines().count() <= layout.lines_per_page);
    }
    assert!(rendered.contains("x y"));
    assert!(rendered.contains("a b c d"));
}
