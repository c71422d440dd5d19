//! Path and logging defaults.
//!
//! The database location is resolved from, in order: the `--db` flag, the
//! `PTK_DB` environment variable (both handled by clap), then the XDG data
//! directory.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the database path.
pub const DB_ENV: &str = "PTK_DB";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "projtrack=info";

const APP_DIR: &str = "projtrack";
const DB_FILE: &str = "tracker.db";

/// XDG-compliant data directory: `$XDG_DATA_HOME/projtrack`, falling back to
/// `~/.local/share/projtrack`. `None` when neither variable is set.
pub fn get_data_dir() -> Option<PathBuf> {
    data_dir_from(env::var("XDG_DATA_HOME").ok(), env::var("HOME").ok())
}

/// Default database file inside the data directory.
pub fn get_db_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(DB_FILE))
}

fn data_dir_from(xdg_data_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    let base = match xdg_data_home.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(home.filter(|v| !v.is_empty())?).join(".local/share"),
    };
    Some(base.join(APP_DIR))
}
