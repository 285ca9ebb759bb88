// tabgen services
// Services provide the HTML emitter, event log, client-local storage, settings, theme/navigation state and the Court Room game.

pub mod court_room;
pub mod event_logger;
pub mod html_emitter;
pub mod settings_engine;
pub mod shell_state;
pub mod state_store;
