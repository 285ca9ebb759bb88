// Config: $XDG_CONFIG_HOME/tabgen or ~/.config/tabgen
// Data:   $XDG_DATA_HOME/tabgen or ~/.local/share/tabgen

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("tabgen"),
        _ => home_dir().join(".config").join("tabgen"),
    }
}

pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("tabgen"),
        _ => home_dir().join(".local").join("share").join("tabgen"),
    }
}
