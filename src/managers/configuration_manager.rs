//! Configuration Manager for tabgen.
//!
//! Implements `ConfigurationManagerTrait`: named, immutable snapshots of a
//! tab set, backed by SQLite via `rusqlite`. Snapshots are created, listed
//! newest first and deleted; they are never updated.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

use crate::types::configuration::SavedConfiguration;
use crate::types::errors::PersistenceError;
use crate::types::tab::Tab;

/// Trait defining saved-configuration operations.
pub trait ConfigurationManagerTrait {
    fn create_configuration(&mut self, name: &str, tabs: &[Tab]) -> Result<SavedConfiguration, PersistenceError>;
    fn list_configurations(&self, limit: u32) -> Result<Vec<SavedConfiguration>, PersistenceError>;
    fn get_configuration(&self, id: &str) -> Result<SavedConfiguration, PersistenceError>;
    fn delete_configuration(&mut self, id: &str) -> Result<(), PersistenceError>;
}

/// Configuration manager backed by a SQLite connection.
pub struct ConfigurationManager<'a> {
    conn: &'a Connection,
}

impl<'a> ConfigurationManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Reads a raw row; the tabs column is decoded afterwards so a bad JSON
    /// payload surfaces as a serialization error instead of a SQL one.
    fn row_to_raw(row: &rusqlite::Row) -> rusqlite::Result<(String, String, String, i64)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn decode((id, name, tabs_json, created_at): (String, String, String, i64)) -> Result<SavedConfiguration, PersistenceError> {
        let tabs: Vec<Tab> = serde_json::from_str(&tabs_json).map_err(|e| {
            PersistenceError::SerializationError(format!("configuration {}: {}", id, e))
        })?;
        Ok(SavedConfiguration {
            id,
            name,
            tabs,
            created_at,
        })
    }
}

impl<'a> ConfigurationManagerTrait for ConfigurationManager<'a> {
    /// Stores a snapshot of `tabs` under `name`. Returns the stored record.
    fn create_configuration(&mut self, name: &str, tabs: &[Tab]) -> Result<SavedConfiguration, PersistenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PersistenceError::InvalidInput(
                "Configuration name is required".to_string(),
            ));
        }
        if tabs.is_empty() {
            return Err(PersistenceError::InvalidInput(
                "Configuration must contain at least one tab".to_string(),
            ));
        }

        let tabs_json = serde_json::to_string(tabs)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let record = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            tabs: tabs.to_vec(),
            created_at: Self::now_millis(),
        };

        self.conn
            .execute(
                "INSERT INTO tab_configurations (id, name, tabs, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![record.id, record.name, tabs_json, record.created_at],
            )
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        debug!(id = %record.id, tabs = record.tabs.len(), "configuration saved");
        Ok(record)
    }

    /// Lists at most `limit` configurations, most recent first.
    fn list_configurations(&self, limit: u32) -> Result<Vec<SavedConfiguration>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, tabs, created_at FROM tab_configurations
                 ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            )
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], Self::row_to_raw)
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        let mut configurations = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;
            configurations.push(Self::decode(raw)?);
        }
        Ok(configurations)
    }

    fn get_configuration(&self, id: &str) -> Result<SavedConfiguration, PersistenceError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, name, tabs, created_at FROM tab_configurations WHERE id = ?1",
                params![id],
                Self::row_to_raw,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => PersistenceError::NotFound(id.to_string()),
                other => PersistenceError::DatabaseError(other.to_string()),
            })?;
        Self::decode(raw)
    }

    fn delete_configuration(&mut self, id: &str) -> Result<(), PersistenceError> {
        let affected = self
            .conn
            .execute("DELETE FROM tab_configurations WHERE id = ?1", params![id])
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
