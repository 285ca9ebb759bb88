use tabgen::types::errors::*;

// === TabError Tests ===

#[test]
fn tab_error_capacity_display() {
    assert_eq!(
        TabError::CapacityExceeded(15).to_string(),
        "Maximum of 15 tabs allowed"
    );
}

#[test]
fn tab_error_minimum_size_display() {
    assert_eq!(
        TabError::MinimumSizeViolation.to_string(),
        "At least one tab is required"
    );
}

#[test]
fn tab_error_not_found_display() {
    let err = TabError::NotFound("4".to_string());
    assert_eq!(err.to_string(), "Tab not found: 4");
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::MinimumSizeViolation);
    assert!(err.source().is_none());
}

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::MalformedStoredState("empty".to_string()).to_string(),
        "Malformed stored state: empty"
    );
    assert_eq!(
        StorageError::IoError("denied".to_string()).to_string(),
        "Storage I/O error: denied"
    );
    assert_eq!(
        StorageError::SerializationError("eof".to_string()).to_string(),
        "Storage serialization error: eof"
    );
}

// === PersistenceError Tests ===

#[test]
fn persistence_error_display_variants() {
    assert_eq!(
        PersistenceError::NotFound("abc".to_string()).to_string(),
        "Record not found: abc"
    );
    assert_eq!(
        PersistenceError::InvalidInput("no name".to_string()).to_string(),
        "Invalid input: no name"
    );
    assert_eq!(
        PersistenceError::DatabaseError("locked".to_string()).to_string(),
        "Persistence database error: locked"
    );
    assert_eq!(
        PersistenceError::SerializationError("bad json".to_string()).to_string(),
        "Persistence serialization error: bad json"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::InvalidKey("a.b".to_string()).to_string(),
        "Invalid settings key: a.b"
    );
    assert_eq!(
        SettingsError::InvalidValue("nope".to_string()).to_string(),
        "Invalid settings value: nope"
    );
}

// === CourtRoomError Tests ===

#[test]
fn court_room_error_display_variants() {
    assert_eq!(
        CourtRoomError::NotRunning.to_string(),
        "Court Room game is not running"
    );
    assert_eq!(
        CourtRoomError::AlreadyRunning.to_string(),
        "Court Room game is already running"
    );
    assert_eq!(
        CourtRoomError::IssueNotFound("9".to_string()).to_string(),
        "Code issue not found: 9"
    );
    assert_eq!(
        CourtRoomError::MessageNotFound("m9".to_string()).to_string(),
        "Message not found: m9"
    );
    assert_eq!(
        CourtRoomError::InvalidTimeLimit(0).to_string(),
        "Invalid time limit: 0 minutes"
    );
}

// === LogError Tests ===

#[test]
fn log_error_display() {
    assert_eq!(
        LogError::InvalidLevel("debug".to_string()).to_string(),
        "Invalid log level: debug"
    );
}

#[test]
fn all_errors_are_boxable() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(TabError::CapacityExceeded(15)),
        Box::new(StorageError::IoError("x".into())),
        Box::new(PersistenceError::NotFound("x".into())),
        Box::new(SettingsError::InvalidKey("x".into())),
        Box::new(CourtRoomError::NotRunning),
        Box::new(LogError::InvalidLevel("x".into())),
    ];
    assert_eq!(errors.len(), 6);
}
