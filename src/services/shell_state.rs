//! Shell state: theme mode and the last visited page.
//!
//! Both values live in the client-local [`StateStore`]: the theme under
//! `"theme"`, the last visited page under `"lastVisitedTab"` with a 7-day
//! expiry, the way a browser cookie would hold it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::state_store::{StateStore, LAST_VISITED_KEY, THEME_KEY};
use crate::types::errors::StorageError;
use crate::types::settings::ThemeMode;

/// How long a recorded visit is remembered, in milliseconds.
pub const LAST_VISITED_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Navigation entries: (display name, route).
pub const NAVIGATION: [(&str, &str); 7] = [
    ("Home", "/"),
    ("Tabs", "/tabs"),
    ("Pre-lab Questions", "/prelab"),
    ("Escape Room", "/escape-room"),
    ("Coding Races", "/coding-races"),
    ("Court Room", "/court-room"),
    ("About", "/about"),
];

/// A remembered visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastVisited {
    pub name: String,
    /// Unix timestamp in milliseconds after which the entry is ignored.
    pub expires_at: i64,
}

/// Returns the navigation name for a route, if it is one of ours.
pub fn page_name(path: &str) -> Option<&'static str> {
    NAVIGATION
        .iter()
        .find(|(_, route)| *route == path)
        .map(|(name, _)| *name)
}

pub struct ShellState {
    store: Arc<dyn StateStore>,
}

impl ShellState {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Stored theme; missing or unrecognised values read as `System`.
    pub fn theme(&self) -> ThemeMode {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => ThemeMode::parse(&raw).unwrap_or(ThemeMode::System),
            Ok(None) => ThemeMode::System,
            Err(e) => {
                warn!(error = %e, "failed to read theme");
                ThemeMode::System
            }
        }
    }

    pub fn set_theme(&self, mode: ThemeMode) -> Result<(), StorageError> {
        self.store.set(THEME_KEY, mode.as_str())
    }

    /// Resolves `System` against the host preference.
    pub fn effective_theme(&self, prefers_dark: bool) -> ThemeMode {
        match self.theme() {
            ThemeMode::System if prefers_dark => ThemeMode::Dark,
            ThemeMode::System => ThemeMode::Light,
            other => other,
        }
    }

    /// Remembers a visit to `path`. Routes outside the navigation are
    /// ignored and return `Ok(None)`.
    pub fn record_visit(&self, path: &str, now_ms: i64) -> Result<Option<LastVisited>, StorageError> {
        let Some(name) = page_name(path) else {
            return Ok(None);
        };
        let entry = LastVisited {
            name: name.to_string(),
            expires_at: now_ms + LAST_VISITED_TTL_MS,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.store.set(LAST_VISITED_KEY, &json)?;
        Ok(Some(entry))
    }

    /// The last visited page name, unless it has expired or is unreadable.
    pub fn last_visited(&self, now_ms: i64) -> Option<String> {
        let raw = self.store.get(LAST_VISITED_KEY).ok().flatten()?;
        let entry: LastVisited = serde_json::from_str(&raw).ok()?;
        (entry.expires_at > now_ms).then_some(entry.name)
    }
}
