//! tabgen: builds self-contained HTML5 tab documents.
//!
//! The core is the tab set editor ([`managers::tab_editor`]) and the HTML
//! emitter ([`services::html_emitter`]). Around it sit saved configurations,
//! a bounded event log, client-local state and the Court Room exercise.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
