mod config;

pub use config::{Config, SessionConfig};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/mindora[-dev]/` based on MINDORA_ENV.
///
/// Set MINDORA_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDORA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindora-dev")
    } else {
        base_dir.join("mindora")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
