//! tabgen RPC server: JSON-RPC over stdin/stdout for a UI front end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tabs.insert", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Diagnostics go to stderr so stdout carries protocol lines only.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use tabgen::app::App;
use tabgen::logging;
use tabgen::rpc_handler::handle_method;
use tabgen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

fn send(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> ExitCode {
    let mut settings_engine = SettingsEngine::new(None);
    let settings_result = settings_engine.load();
    logging::init(&settings_engine.get_settings().logging.filter);
    if let Err(e) = settings_result {
        warn!(error = %e, "using default settings");
    }

    let mut app = match App::open(settings_engine) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialise tabgen");
            return ExitCode::FAILURE;
        }
    };
    app.startup();
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    if send(&mut out, &ready).is_err() {
        return ExitCode::FAILURE;
    }
    info!("rpc server ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                debug!(method, "rpc request");

                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => {
                        debug!(method, error = %err, "rpc request failed");
                        json!({"id": id, "error": err})
                    }
                }
            }
            Err(e) => json!({"id":null,"error":format!("parse error: {}",e)}),
        };

        if send(&mut out, &response).is_err() {
            break;
        }
    }

    info!("stdin closed, shutting down");
    ExitCode::SUCCESS
}
