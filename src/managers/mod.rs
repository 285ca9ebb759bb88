// tabgen state managers
// Managers handle stateful operations: the tab set editor, saved configurations, Court Room sessions.

pub mod configuration_manager;
pub mod court_room_manager;
pub mod tab_editor;
