use serde::{Deserialize, Serialize};

use super::configuration::DEFAULT_LIST_LIMIT;
use super::log::DEFAULT_LOG_CAPACITY;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub appearance: AppearanceSettings,
    #[serde(default)]
    pub court_room: CourtRoomSettings,
}

/// Where the database and the client-local state file live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
    pub database_file: String,
    pub state_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: "tabgen.db".to_string(),
            state_file: "state.json".to_string(),
        }
    }
}

/// Tab editor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorSettings {
    pub configuration_list_limit: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            configuration_list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Diagnostics and event-log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"tabgen=debug"`.
    pub filter: String,
    pub capacity: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

/// Appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppearanceSettings {
    pub theme: ThemeMode,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
        }
    }
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::System => "system",
        }
    }

    /// Parses a stored theme value; anything unrecognised is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

/// Court Room game settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourtRoomSettings {
    pub default_minutes: u32,
    pub session_list_limit: u32,
}

impl Default for CourtRoomSettings {
    fn default() -> Self {
        Self {
            default_minutes: 5,
            session_list_limit: 20,
        }
    }
}
