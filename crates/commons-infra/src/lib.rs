//! Infrastructure layer for Commons.
//!
//! Contains implementations of the repository traits defined in
//! `commons-core`: SQLite storage via sqlx, the TOML config loader, and the
//! broadcast-channel membership notification queue.

pub mod config;
pub mod notify;
pub mod sqlite;

use std::path::PathBuf;

/// Resolve the data directory: `COMMONS_DATA_DIR` env var, falling back to
/// `~/.commons`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("COMMONS_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".commons")
        }
    }
}
