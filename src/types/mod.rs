// tabgen shared type definitions
// Each submodule defines types used across the application.

pub mod configuration;
pub mod court_room;
pub mod errors;
pub mod log;
pub mod settings;
pub mod tab;
