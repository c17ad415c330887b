use std::path::PathBuf;

/// Centralized path management for update-full.
///
/// Nothing here creates directories: the tool only ever reads its config file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("update-full"))
}

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
