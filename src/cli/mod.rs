mod commands;
pub mod error;
mod utils;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DB_ENV, DEFAULT_LOG_FILTER, get_db_path};
use crate::db::{Id, SqliteDatabase};
use crate::export::DocumentLayout;
use crate::tracker::Tracker;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "ptk")]
#[command(author, version, about = "Local project and task tracker", long_about = None)]
pub struct Cli {
    /// Database file (default: PTK_DB env or ~/.local/share/projtrack/tracker.db)
    #[arg(long, global = true, env = DB_ENV)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Export commands
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Delete tasks whose project no longer exists
    Sweep,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a project
    Add {
        /// Project name
        name: String,
    },
    /// List projects
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Rename a project
    Rename {
        /// Project ID
        id: Id,
        /// New name
        name: String,
    },
    /// Delete a project and its tasks
    Rm {
        /// Project ID
        id: Id,
        /// Keep the project's tasks (they become orphans)
        #[arg(long)]
        keep_tasks: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Create a task
    Add {
        /// Project ID
        project_id: Id,
        /// Task name
        name: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
    },
    /// List the tasks of a project
    List {
        /// Project ID
        project_id: Id,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Change a task's name and deadline
    Edit {
        /// Task ID
        id: Id,
        /// Task name
        name: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        id: Id,
    },
    /// Mark a task as not done
    Undone {
        /// Task ID
        id: Id,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: Id,
    },
}

#[derive(Subcommand)]
enum ExportCommands {
    /// Export everything as JSON
    Json {
        /// Output file
        path: PathBuf,
    },
    /// Export a paginated printable document
    Print {
        /// Output file
        path: PathBuf,
        /// Lines per page
        #[arg(long, default_value_t = 60)]
        lines: usize,
        /// Characters per line
        #[arg(long, default_value_t = 80)]
        width: usize,
    },
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let db_path = cli.db.or_else(get_db_path).ok_or(CliError::NoDataDir)?;
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(CliError::from)?;
    }
    debug!(path = %db_path.display(), "using database");

    // An open failure is fatal: nothing below runs without a migrated store.
    let db = SqliteDatabase::open(&db_path).await.map_err(CliError::from)?;
    let tracker = Tracker::new(db);

    let result = dispatch(&tracker, cli.command).await;
    tracker.into_inner().close().await;

    println!("{}", result?);
    Ok(())
}

async fn dispatch(tracker: &Tracker<SqliteDatabase>, command: Commands) -> CliResult<String> {
    match command {
        Commands::Project { command } => match command {
            ProjectCommands::Add { name } => commands::project::add_project(tracker, &name).await,
            ProjectCommands::List { format } => {
                commands::project::list_projects(tracker, &format).await
            }
            ProjectCommands::Rename { id, name } => {
                commands::project::rename_project(tracker, id, &name).await
            }
            ProjectCommands::Rm { id, keep_tasks } => {
                commands::project::remove_project(tracker, id, keep_tasks).await
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::Add {
                project_id,
                name,
                deadline,
            } => commands::task::add_task(tracker, project_id, &name, &deadline).await,
            TaskCommands::List { project_id, format } => {
                commands::task::list_tasks(tracker, project_id, &format).await
            }
            TaskCommands::Edit { id, name, deadline } => {
                commands::task::edit_task(tracker, id, &name, &deadline).await
            }
            TaskCommands::Done { id } => commands::task::set_done(tracker, id, true).await,
            TaskCommands::Undone { id } => commands::task::set_done(tracker, id, false).await,
            TaskCommands::Rm { id } => commands::task::remove_task(tracker, id).await,
        },
        Commands::Export { command } => match command {
            ExportCommands::Json { path } => commands::export::json(tracker, &path).await,
            ExportCommands::Print { path, lines, width } => {
                let layout = DocumentLayout {
                    lines_per_page: lines,
                    width,
                };
                commands::export::print(tracker, &path, layout).await
            }
        },
        Commands::Sweep => commands::project::sweep(tracker).await,
    }
}
