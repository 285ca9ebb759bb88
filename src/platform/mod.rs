// tabgen platform paths
// Selects the per-OS config and data directories at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/tabgen` or `~/.config/tabgen`
/// - **macOS**: `~/Library/Application Support/tabgen`
/// - **Windows**: `%APPDATA%/tabgen`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Directory holding the SQLite database and the local state file.
///
/// - **Linux**: `$XDG_DATA_HOME/tabgen` or `~/.local/share/tabgen`
/// - **macOS**: `~/Library/Application Support/tabgen`
/// - **Windows**: `%LOCALAPPDATA%/tabgen`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
