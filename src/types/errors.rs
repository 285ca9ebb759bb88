use std::fmt;

// === TabError ===

/// Errors related to tab set editing.
#[derive(Debug, PartialEq, Eq)]
pub enum TabError {
    /// Inserting would grow the set past its maximum size.
    CapacityExceeded(usize),
    /// Removing would leave the set empty.
    MinimumSizeViolation,
    /// Tab with the given ID was not found.
    NotFound(String),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::CapacityExceeded(max) => {
                write!(f, "Maximum of {} tabs allowed", max)
            }
            TabError::MinimumSizeViolation => write!(f, "At least one tab is required"),
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
        }
    }
}

impl std::error::Error for TabError {}

// === StorageError ===

/// Errors related to the client-local key/value store.
#[derive(Debug)]
pub enum StorageError {
    /// Stored tab set state could not be parsed or violates its invariants.
    MalformedStoredState(String),
    /// Reading or writing the backing file failed.
    IoError(String),
    /// Failed to serialize or deserialize the store contents.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::MalformedStoredState(msg) => {
                write!(f, "Malformed stored state: {}", msg)
            }
            StorageError::IoError(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === PersistenceError ===

/// Errors related to saved configurations and Court Room session records.
#[derive(Debug)]
pub enum PersistenceError {
    /// Record with the given ID was not found.
    NotFound(String),
    /// The request was rejected before reaching the database.
    InvalidInput(String),
    /// Database operation failed.
    DatabaseError(String),
    /// Stored JSON could not be encoded or decoded.
    SerializationError(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::NotFound(id) => write!(f, "Record not found: {}", id),
            PersistenceError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PersistenceError::DatabaseError(msg) => {
                write!(f, "Persistence database error: {}", msg)
            }
            PersistenceError::SerializationError(msg) => {
                write!(f, "Persistence serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === CourtRoomError ===

/// Errors related to the Court Room game.
#[derive(Debug, PartialEq, Eq)]
pub enum CourtRoomError {
    /// The action needs a running game.
    NotRunning,
    /// A game is already in progress.
    AlreadyRunning,
    /// Code issue with the given ID was not found.
    IssueNotFound(String),
    /// Message with the given ID was not found.
    MessageNotFound(String),
    /// Time limit (minutes) outside the accepted range.
    InvalidTimeLimit(u32),
}

impl fmt::Display for CourtRoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourtRoomError::NotRunning => write!(f, "Court Room game is not running"),
            CourtRoomError::AlreadyRunning => write!(f, "Court Room game is already running"),
            CourtRoomError::IssueNotFound(id) => write!(f, "Code issue not found: {}", id),
            CourtRoomError::MessageNotFound(id) => write!(f, "Message not found: {}", id),
            CourtRoomError::InvalidTimeLimit(minutes) => {
                write!(f, "Invalid time limit: {} minutes", minutes)
            }
        }
    }
}

impl std::error::Error for CourtRoomError {}

// === LogError ===

/// Errors related to the event logger.
#[derive(Debug, PartialEq, Eq)]
pub enum LogError {
    /// The level string is not one of info, warn, error.
    InvalidLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLevel(level) => write!(f, "Invalid log level: {}", level),
        }
    }
}

impl std::error::Error for LogError {}
