mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DisplayConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/habitloop[-dev]/` based on HABITLOOP_ENV.
///
/// Set HABITLOOP_ENV=dev to use the development data directory, or
/// HABITLOOP_DATA_DIR to point at an explicit directory (used by tests).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(explicit) = std::env::var("HABITLOOP_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("habitloop-dev")
        } else {
            base_dir.join("habitloop")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
