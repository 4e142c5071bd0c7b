mod config;
pub mod database;

pub use config::{Config, GuideConfig, HistoryConfig, LoadingConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `SONKIL_DATA_DIR` wins when set. Otherwise `~/.config/sonkil`, or
/// `~/.config/sonkil-dev` when `SONKIL_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SONKIL_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SONKIL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("sonkil-dev")
            } else {
                base_dir.join("sonkil")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
