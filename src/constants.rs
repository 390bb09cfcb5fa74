use std::path::PathBuf;

use dirs::preference_dir;

pub const APP_NAME: &str = "setmaze";

/// Directory holding the settings, falls back to the working directory on platforms
/// without a preference directory.
pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
