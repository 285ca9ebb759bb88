//! RPC method handler for the tabgen JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! editor, the persistence managers and the services via the `App` struct.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::App;
use crate::managers::configuration_manager::{ConfigurationManager, ConfigurationManagerTrait};
use crate::managers::court_room_manager::CourtRoomManagerTrait;
use crate::managers::tab_editor::{TabEditor, TabEditorTrait};
use crate::services::event_logger::EventLoggerTrait;
use crate::services::html_emitter;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::log::{LogLevel, DEFAULT_QUERY_LIMIT};
use crate::types::settings::ThemeMode;

use serde_json::{json, Value};

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Editor state as sent to clients.
fn tab_state(editor: &TabEditor) -> Value {
    json!({
        "tabs": editor.tabs(),
        "active_tab_id": editor.active_id(),
        "can_insert": editor.can_insert(),
        "can_remove": editor.can_remove(),
    })
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn u32_param(params: &Value, name: &str) -> Option<u32> {
    params
        .get(name)
        .and_then(|v| v.as_u64())
        .map(|n| n.min(u32::MAX as u64) as u32)
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Tab editor ───
        "tabs.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.insert" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.tab_editor.insert().map_err(|e| e.to_string())?;
            a.event_logger
                .track_user_action("tab_added", Some(json!({ "tabId": id })));
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.remove" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let removed = a.tab_editor.active_id().to_string();
            a.tab_editor.remove().map_err(|e| e.to_string())?;
            a.event_logger
                .track_user_action("tab_removed", Some(json!({ "tabId": removed })));
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.activate" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let changed = a.tab_editor.set_active(id);
            let mut state = tab_state(&a.tab_editor);
            state["changed"] = json!(changed);
            Ok(state)
        }
        "tabs.rename" => {
            let id = str_param(params, "id")?;
            let header = str_param(params, "header")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tab_editor.rename_header(id, header).map_err(|e| e.to_string())?;
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.edit" => {
            let id = str_param(params, "id")?;
            let content = str_param(params, "content")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tab_editor.edit_content(id, content).map_err(|e| e.to_string())?;
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tab_editor.reset();
            Ok(tab_state(&a.tab_editor))
        }
        "tabs.generate" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let document = a.generate();
            let tabs = a.tab_editor.tab_count();
            a.event_logger
                .track_user_action("html_generated", Some(json!({ "tabCount": tabs })));
            serde_json::to_value(document).map_err(|e| e.to_string())
        }
        "tabs.preview" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let tab = match params.get("id").and_then(|v| v.as_str()) {
                Some(id) => a.tab_editor.get_tab(id).ok_or_else(|| format!("Tab not found: {}", id))?,
                None => a.tab_editor.active_tab(),
            };
            Ok(json!({ "id": tab.id, "html": html_emitter::emit_preview(&tab.content) }))
        }

        // ─── Saved configurations ───
        "config.save" => {
            let name = str_param(params, "name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let saved = a.save_configuration(name).map_err(|e| e.to_string())?;
            serde_json::to_value(saved).map_err(|e| e.to_string())
        }
        "config.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let limit = u32_param(params, "limit")
                .unwrap_or(a.settings_engine.get_settings().editor.configuration_list_limit);
            let mgr = ConfigurationManager::new(a.db.connection());
            let configs = mgr.list_configurations(limit).map_err(|e| e.to_string())?;
            serde_json::to_value(configs).map_err(|e| e.to_string())
        }
        "config.load" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.load_configuration(id).map_err(|e| e.to_string())?;
            Ok(tab_state(&a.tab_editor))
        }
        "config.delete" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = ConfigurationManager::new(a.db.connection());
            mgr.delete_configuration(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Event log ───
        "logs.get" => {
            let level = match params.get("level").and_then(|v| v.as_str()) {
                Some(raw) => Some(LogLevel::parse(raw).map_err(|e| e.to_string())?),
                None => None,
            };
            let limit = params
                .get("limit")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
                .unwrap_or(DEFAULT_QUERY_LIMIT);
            let a = app.lock().map_err(|e| e.to_string())?;
            let events = a.event_logger.get_logs(level, limit);
            serde_json::to_value(events).map_err(|e| e.to_string())
        }
        "logs.add" => {
            let message = str_param(params, "message")?;
            let level = params
                .get("level")
                .and_then(|v| v.as_str())
                .and_then(|raw| LogLevel::parse(raw).ok())
                .unwrap_or(LogLevel::Info);
            let data = params.get("data").cloned().filter(|v| !v.is_null());
            let user_id = params.get("user_id").and_then(|v| v.as_str());
            let session_id = params.get("session_id").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.event_logger.log(level, message, data, user_id, session_id);
            Ok(json!({"ok": true}))
        }
        "logs.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.event_logger.clear_logs();
            Ok(json!({"ok": true}))
        }

        // ─── Court Room ───
        "court.start" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let minutes = u32_param(params, "minutes")
                .unwrap_or(a.settings_engine.get_settings().court_room.default_minutes);
            let App { court_room, event_logger, .. } = &mut *a;
            court_room.start(minutes, event_logger).map_err(|e| e.to_string())?;
            serde_json::to_value(court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.tick" => {
            let seconds = u32_param(params, "seconds").ok_or("missing seconds")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let App { court_room, event_logger, .. } = &mut *a;
            court_room.tick(seconds, event_logger).map_err(|e| e.to_string())?;
            serde_json::to_value(court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.fix" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let App { court_room, event_logger, .. } = &mut *a;
            court_room.fix_issue(id, event_logger).map_err(|e| e.to_string())?;
            serde_json::to_value(court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.dismiss" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.court_room.dismiss_message(id).map_err(|e| e.to_string())?;
            serde_json::to_value(a.court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.analyze" => {
            let code = str_param(params, "code")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let App { court_room, event_logger, .. } = &mut *a;
            let report = court_room.analyze_code(code, event_logger).map_err(|e| e.to_string())?;
            Ok(json!({
                "analysis": report,
                "state": court_room.snapshot(),
            }))
        }
        "court.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.court_room.reset();
            serde_json::to_value(a.court_room.snapshot()).map_err(|e| e.to_string())
        }
        "court.session.save" => {
            let player_name = str_param(params, "player_name")?;
            if player_name.trim().is_empty() {
                return Err("Invalid input: player name is empty".to_string());
            }
            let a = app.lock().map_err(|e| e.to_string())?;
            let game = &a.court_room;
            let session = a
                .court_room_manager
                .create_session(
                    player_name,
                    game.time_limit_minutes(),
                    game.score(),
                    game.fixed_count() as u32,
                    game.issues().len() as u32,
                    game.phase().is_over(),
                )
                .map_err(|e| e.to_string())?;
            serde_json::to_value(session).map_err(|e| e.to_string())
        }
        "court.session.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let limit = u32_param(params, "limit")
                .unwrap_or(a.settings_engine.get_settings().court_room.session_list_limit);
            let sessions = a.court_room_manager.list_sessions(limit).map_err(|e| e.to_string())?;
            serde_json::to_value(sessions).map_err(|e| e.to_string())
        }
        "court.session.update" => {
            let id = str_param(params, "id")?;
            let final_score = u32_param(params, "final_score").ok_or("missing final_score")?;
            let issues_fixed = u32_param(params, "issues_fixed").ok_or("missing issues_fixed")?;
            let completed = params
                .get("completed")
                .and_then(|v| v.as_bool())
                .ok_or("missing completed")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let session = a
                .court_room_manager
                .update_session(id, final_score, issues_fixed, completed)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(session).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings();
            let json_val = serde_json::to_value(settings).map_err(|e| e.to_string())?;
            Ok(json_val)
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Shell ───
        "shell.theme.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"theme": a.shell_state.theme()}))
        }
        "shell.theme.set" => {
            let raw = str_param(params, "theme")?;
            let mode = ThemeMode::parse(raw).ok_or_else(|| format!("invalid theme: {}", raw))?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.shell_state.set_theme(mode).map_err(|e| e.to_string())?;
            Ok(json!({"theme": mode}))
        }
        "shell.visit" => {
            let path = str_param(params, "path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let entry = a.shell_state.record_visit(path, now_millis()).map_err(|e| e.to_string())?;
            if let Some(entry) = &entry {
                a.event_logger.track_page_view(&entry.name);
            }
            Ok(json!({"recorded": entry.is_some()}))
        }
        "shell.last_visited" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"name": a.shell_state.last_visited(now_millis())}))
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
