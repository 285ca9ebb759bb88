//! tabgen database layer.
//!
//! Provides SQLite connection management and schema migrations.
//!
//! ```no_run
//! use tabgen::database::Database;
//!
//! let db = Database::open("tabgen.db").expect("failed to open database");
//! let conn = db.connection();
//! # let _ = conn;
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
