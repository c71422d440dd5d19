//! Printable document export.
//!
//! Lays the snapshot out as fixed-size text pages: one section per project
//! (heading plus underline) followed by one line per task, or a placeholder
//! when the project has none. Pages end with a footer and are separated by
//! a form feed.

use std::path::Path;

use tracing::info;

use super::{ExportError, ExportSummary, Snapshot};
use crate::db::{Database, Task};

/// Display format for deadlines in the printed document.
pub const PRINT_DATE_FORMAT: &str = "%d/%m/%Y";

const EMPTY_PROJECT: &str = "(no tasks)";
const NO_PROJECTS: &str = "No projects.";
const PAGE_BREAK: char = '\u{0c}';

// Blank separator plus "Page n/m".
const FOOTER_LINES: usize = 2;
// A heading is never printed without its first line below it.
const KEEP_TOGETHER: usize = 3;
const MIN_WIDTH: usize = 20;

/// Page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Lines per page, footer included.
    pub lines_per_page: usize,
    /// Maximum characters per line.
    pub width: usize,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            lines_per_page: 60,
            width: 80,
        }
    }
}

impl DocumentLayout {
    fn body_lines(&self) -> usize {
        self.lines_per_page.saturating_sub(FOOTER_LINES)
    }

    fn validate(&self) -> Result<(), ExportError> {
        if self.body_lines() < KEEP_TOGETHER {
            return Err(ExportError::Layout {
                message: format!(
                    "a page needs at least {} lines, got {}",
                    KEEP_TOGETHER + FOOTER_LINES,
                    self.lines_per_page
                ),
            });
        }
        if self.width < MIN_WIDTH {
            return Err(ExportError::Layout {
                message: format!("a line needs at least {} characters, got {}", MIN_WIDTH, self.width),
            });
        }
        Ok(())
    }
}

/// A paginated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    layout: DocumentLayout,
    pages: Vec<Vec<String>>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Body lines of each page, without footers.
    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    /// Full text with footers, pages separated by form feeds.
    pub fn render(&self) -> String {
        let total = self.pages.len();
        self.pages
            .iter()
            .enumerate()
            .map(|(i, lines)| {
                let footer = format!("Page {}/{}", i + 1, total);
                let mut page = lines.join("\n");
                if !page.is_empty() {
                    page.push('\n');
                }
                page.push('\n');
                page.push_str(&format!("{:>width$}", footer, width = self.layout.width));
                page.push('\n');
                page
            })
            .collect::<Vec<_>>()
            .join(&PAGE_BREAK.to_string())
    }
}

struct Section {
    heading: [String; 2],
    lines: Vec<String>,
}

/// Lay out a snapshot into pages.
pub fn render_document(
    snapshot: &Snapshot,
    layout: DocumentLayout,
) -> Result<Document, ExportError> {
    layout.validate()?;

    let sections: Vec<Section> = snapshot
        .projects
        .iter()
        .map(|project| {
            let name = fit(&project.name, layout.width);
            let underline = "=".repeat(name.chars().count());
            let mut lines: Vec<String> = project
                .id
                .map(|id| {
                    snapshot
                        .tasks_of(id)
                        .map(|t| fit(&task_line(t), layout.width))
                        .collect()
                })
                .unwrap_or_default();
            if lines.is_empty() {
                lines.push(EMPTY_PROJECT.to_string());
            }
            Section {
                heading: [name, underline],
                lines,
            }
        })
        .collect();

    let pages = if sections.is_empty() {
        vec![vec![NO_PROJECTS.to_string()]]
    } else {
        paginate(sections, layout.body_lines())
    };

    Ok(Document { layout, pages })
}

/// Render the whole database to a printable text file at `path`.
pub async fn export_document<D: Database>(
    db: &D,
    path: &Path,
    layout: DocumentLayout,
) -> Result<ExportSummary, ExportError> {
    let snapshot = Snapshot::capture(db).await?;
    let document = render_document(&snapshot, layout)?;
    std::fs::write(path, document.render())?;

    let summary = snapshot.summary();
    info!(
        path = %path.display(),
        pages = document.page_count(),
        projects = summary.projects,
        tasks = summary.tasks,
        "document export written"
    );
    Ok(summary)
}

fn task_line(task: &Task) -> String {
    let glyph = if task.done { "[x]" } else { "[ ]" };
    format!(
        "  {} {} ({})",
        glyph,
        task.name,
        task.deadline.format(PRINT_DATE_FORMAT)
    )
}

fn paginate(sections: Vec<Section>, body: usize) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut page: Vec<String> = Vec::new();

    for section in sections {
        let separator = usize::from(!page.is_empty());
        if page.len() + separator + KEEP_TOGETHER > body {
            pages.push(std::mem::take(&mut page));
        } else if separator == 1 {
            page.push(String::new());
        }

        page.extend(section.heading);
        for line in section.lines {
            if page.len() >= body {
                pages.push(std::mem::take(&mut page));
            }
            page.push(line);
        }
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

/// Flatten a line to one physical line of at most `width` characters,
/// marking a cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    // Stored records are not revalidated, so control characters can still
    // arrive here. A newline or form feed would break the page count.
    let text: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if text.chars().count() <= width {
        text
    } else {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    }
}
