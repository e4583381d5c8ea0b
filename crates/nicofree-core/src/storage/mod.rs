pub mod database;

pub use database::Database;

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `NICOFREE_DATA_DIR` overrides the location entirely (used by tests).
/// Otherwise this is `~/.config/nicofree`, or `~/.config/nicofree-dev`
/// when `NICOFREE_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Ok(custom) = std::env::var("NICOFREE_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("NICOFREE_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("nicofree-dev")
        } else {
            base_dir.join("nicofree")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
