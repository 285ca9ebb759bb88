//! App Core for tabgen.
//!
//! Central struct holding the database, the tab editor and the services,
//! plus the operations that cross between them (saving the current tab set
//! as a configuration, loading one back, generating the document).

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::configuration_manager::{ConfigurationManager, ConfigurationManagerTrait};
use crate::managers::court_room_manager::CourtRoomManager;
use crate::managers::tab_editor::{TabEditor, TabEditorTrait};
use crate::services::court_room::CourtRoomGame;
use crate::services::event_logger::EventLogger;
use crate::services::html_emitter::{self, GeneratedDocument};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::shell_state::ShellState;
use crate::services::state_store::{FileStateStore, StateStore};
use crate::types::configuration::SavedConfiguration;
use crate::types::errors::PersistenceError;

/// Central application struct holding all managers and services.
///
/// `ConfigurationManager` borrows the connection, so it is created on demand
/// via `ConfigurationManager::new(app.db.connection())`.
pub struct App {
    pub db: Arc<Database>,
    pub store: Arc<dyn StateStore>,
    pub tab_editor: TabEditor,
    pub event_logger: EventLogger,
    pub settings_engine: SettingsEngine,
    pub shell_state: ShellState,
    pub court_room: CourtRoomGame,
    pub court_room_manager: CourtRoomManager,
}

impl App {
    /// Creates an App keeping settings, database and local state in `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = data_dir.as_ref();
        let settings_path = data_dir.join("settings.json").to_string_lossy().to_string();
        let mut settings_engine = SettingsEngine::new(Some(settings_path));
        settings_engine.load()?;

        let storage = settings_engine.get_settings().storage.clone();
        let db_path = data_dir.join(&storage.database_file);
        let state_path = data_dir.join(&storage.state_file);
        Self::build(settings_engine, &db_path, &state_path)
    }

    /// Creates an App from already-loaded settings, using the data
    /// directory they resolve to.
    pub fn open(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let db_path = settings_engine.database_path();
        let state_path = settings_engine.state_path();
        Self::build(settings_engine, &db_path, &state_path)
    }

    fn build(
        settings_engine: SettingsEngine,
        db_path: &Path,
        state_path: &Path,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let store: Arc<dyn StateStore> = Arc::new(FileStateStore::open(state_path)?);

        let settings = settings_engine.get_settings();
        let event_logger = EventLogger::with_capacity(settings.logging.capacity);
        let tab_editor = TabEditor::load(store.clone());
        let shell_state = ShellState::new(store.clone());
        let court_room_manager = CourtRoomManager::new(db.clone());

        info!(
            database = %db_path.display(),
            state = %state_path.display(),
            tabs = tab_editor.tab_count(),
            "tabgen initialised"
        );

        Ok(Self {
            db,
            store,
            tab_editor,
            event_logger,
            settings_engine,
            shell_state,
            court_room: CourtRoomGame::new(),
            court_room_manager,
        })
    }

    /// Emits the current tab set.
    pub fn generate(&mut self) -> GeneratedDocument {
        let started = self.event_logger.time_start("generate_html");
        let document = html_emitter::generate(self.tab_editor.tabs());
        self.event_logger.time_end("generate_html", started);
        document
    }

    /// Saves the current tab set as a named configuration. The editor is
    /// left exactly as it was whether or not the save succeeds.
    pub fn save_configuration(&mut self, name: &str) -> Result<SavedConfiguration, PersistenceError> {
        let result = {
            let mut manager = ConfigurationManager::new(self.db.connection());
            manager.create_configuration(name, self.tab_editor.tabs())
        };
        match &result {
            Ok(saved) => self.event_logger.track_user_action(
                "configuration_saved",
                Some(json!({ "id": saved.id, "tabs": saved.tabs.len() })),
            ),
            Err(e) => {
                warn!(error = %e, "failed to save configuration");
                self.event_logger
                    .track_error("PersistenceError", &e.to_string(), Some("save_configuration"));
            }
        }
        result
    }

    /// Replaces the editor's tabs with a saved configuration.
    pub fn load_configuration(&mut self, id: &str) -> Result<SavedConfiguration, PersistenceError> {
        let saved = ConfigurationManager::new(self.db.connection()).get_configuration(id)?;
        self.tab_editor
            .replace_all(saved.tabs.clone())
            .map_err(|e| PersistenceError::InvalidInput(e.to_string()))?;
        self.event_logger
            .track_user_action("configuration_loaded", Some(json!({ "id": saved.id })));
        Ok(saved)
    }

    /// Startup sequence: record the session start in the event log.
    pub fn startup(&mut self) {
        let tabs = self.tab_editor.tab_count();
        self.event_logger
            .info("Application started", Some(json!({ "tabs": tabs })));
    }
}
