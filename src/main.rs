//! tabgen: turns the saved tab set into a standalone HTML document.
//!
//! Reads the tab set the editor last mirrored to local storage (or the three
//! default tabs when there is none) and writes `generated-tabs.html`.
//!
//! Usage: `tabgen [--out PATH | --stdout]`

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tabgen::logging;
use tabgen::managers::tab_editor::{TabEditor, TabEditorTrait};
use tabgen::services::html_emitter::{self, DOWNLOAD_FILENAME};
use tabgen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use tabgen::services::state_store::{FileStateStore, StateStore};

use tracing::{error, info, warn};

enum Output {
    File(PathBuf),
    Stdout,
}

fn parse_args() -> Result<Option<Output>, String> {
    let mut output = Output::File(PathBuf::from(DOWNLOAD_FILENAME));
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => output = Output::Stdout,
            "--out" | "-o" => {
                let path = args.next().ok_or("--out needs a path")?;
                output = Output::File(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(Some(output))
}

fn print_usage() {
    println!("tabgen {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: tabgen [--out PATH | --stdout]");
    println!();
    println!("Writes the saved tab set as a self-contained HTML document");
    println!("(default: ./{}).", DOWNLOAD_FILENAME);
}

fn main() -> ExitCode {
    let output = match parse_args() {
        Ok(Some(output)) => output,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("tabgen: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut settings_engine = SettingsEngine::new(None);
    let settings_result = settings_engine.load();
    logging::init(&settings_engine.get_settings().logging.filter);
    if let Err(e) = settings_result {
        warn!(error = %e, "using default settings");
    }

    let state_path = settings_engine.state_path();
    let store: Arc<dyn StateStore> = match FileStateStore::open(&state_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(path = %state_path.display(), error = %e, "cannot open local state");
            return ExitCode::FAILURE;
        }
    };
    let editor = TabEditor::load(store);
    let html = html_emitter::emit_document(editor.tabs());

    let written = match &output {
        Output::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(html.as_bytes()).and_then(|_| out.flush())
        }
        Output::File(path) => std::fs::write(path, &html),
    };

    match (written, output) {
        (Ok(()), Output::File(path)) => {
            info!(path = %path.display(), tabs = editor.tab_count(), "document written");
            ExitCode::SUCCESS
        }
        (Ok(()), Output::Stdout) => ExitCode::SUCCESS,
        (Err(e), _) => {
            error!(error = %e, "failed to write document");
            ExitCode::FAILURE
        }
    }
}
