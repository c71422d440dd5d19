use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::export::ExportError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error("No data directory available for the database")]
    #[diagnostic(
        code(projtrack::cli::no_data_dir),
        help("Pass --db <path>, set PTK_DB, or set XDG_DATA_HOME / HOME.")
    )]
    NoDataDir,

    #[error("Failed to prepare database directory: {0}")]
    #[diagnostic(code(projtrack::cli::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    #[diagnostic(code(projtrack::cli::output))]
    Output(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
