//! Local project and task tracker.
//!
//! Projects and their dated tasks live in a versioned SQLite store
//! ([`db`]). The [`tracker`] service wraps an owned database handle for the
//! command line ([`cli`]), and [`export`] renders snapshots as JSON or as a
//! paginated printable document.

pub mod cli;
pub mod config;
pub mod db;
pub mod export;
pub mod tracker;
