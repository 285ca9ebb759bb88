//! Court Room session records.
//!
//! Stores one summary row per finished (or abandoned) Court Room run.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::court_room::CourtRoomSession;
use crate::types::errors::PersistenceError;

/// Trait defining Court Room session persistence.
pub trait CourtRoomManagerTrait {
    fn create_session(
        &self,
        player_name: &str,
        time_limit: u32,
        final_score: u32,
        issues_fixed: u32,
        total_issues: u32,
        completed: bool,
    ) -> Result<CourtRoomSession, PersistenceError>;
    fn list_sessions(&self, limit: u32) -> Result<Vec<CourtRoomSession>, PersistenceError>;
    fn update_session(
        &self,
        id: &str,
        final_score: u32,
        issues_fixed: u32,
        completed: bool,
    ) -> Result<CourtRoomSession, PersistenceError>;
}

/// Session store backed by SQLite.
pub struct CourtRoomManager {
    db: Arc<Database>,
}

impl CourtRoomManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<CourtRoomSession> {
        Ok(CourtRoomSession {
            id: row.get(0)?,
            player_name: row.get(1)?,
            time_limit: row.get(2)?,
            final_score: row.get(3)?,
            issues_fixed: row.get(4)?,
            total_issues: row.get(5)?,
            completed: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn get_session(&self, id: &str) -> Result<CourtRoomSession, PersistenceError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, player_name, time_limit, final_score, issues_fixed, total_issues, completed, created_at
                 FROM court_room_sessions WHERE id = ?1",
                params![id],
                Self::row_to_session,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => PersistenceError::NotFound(id.to_string()),
                other => PersistenceError::DatabaseError(other.to_string()),
            })
    }
}

impl CourtRoomManagerTrait for CourtRoomManager {
    fn create_session(
        &self,
        player_name: &str,
        time_limit: u32,
        final_score: u32,
        issues_fixed: u32,
        total_issues: u32,
        completed: bool,
    ) -> Result<CourtRoomSession, PersistenceError> {
        let session = CourtRoomSession {
            id: Uuid::new_v4().to_string(),
            player_name: player_name.trim().to_string(),
            time_limit,
            final_score,
            issues_fixed,
            total_issues,
            completed,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as i64,
        };

        self.db
            .connection()
            .execute(
                "INSERT INTO court_room_sessions
                 (id, player_name, time_limit, final_score, issues_fixed, total_issues, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    session.id,
                    session.player_name,
                    session.time_limit,
                    session.final_score,
                    session.issues_fixed,
                    session.total_issues,
                    session.completed,
                    session.created_at
                ],
            )
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        Ok(session)
    }

    /// Most recent sessions first.
    fn list_sessions(&self, limit: u32) -> Result<Vec<CourtRoomSession>, PersistenceError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, player_name, time_limit, final_score, issues_fixed, total_issues, completed, created_at
                 FROM court_room_sessions ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            )
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        let sessions = stmt
            .query_map(params![limit], Self::row_to_session)
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        Ok(sessions)
    }

    fn update_session(
        &self,
        id: &str,
        final_score: u32,
        issues_fixed: u32,
        completed: bool,
    ) -> Result<CourtRoomSession, PersistenceError> {
        let affected = self
            .db
            .connection()
            .execute(
                "UPDATE court_room_sessions SET final_score = ?1, issues_fixed = ?2, completed = ?3 WHERE id = ?4",
                params![final_score, issues_fixed, completed, id],
            )
            .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        self.get_session(id)
    }
}
