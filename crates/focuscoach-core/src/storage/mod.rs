//! On-disk configuration and session state.

mod config;
mod session;

pub use config::{AnalysisConfig, Config, HistoryConfig, PatternsConfig};
pub use session::SessionStore;

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `FOCUSCOACH_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/focuscoach[-dev]/`, with the `-dev` suffix when
/// `FOCUSCOACH_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSCOACH_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSCOACH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focuscoach-dev")
            } else {
                base_dir.join("focuscoach")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
