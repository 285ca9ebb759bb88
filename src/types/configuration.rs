use serde::{Deserialize, Serialize};

use super::tab::Tab;

/// Default number of saved configurations returned by a listing.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Immutable named snapshot of a tab set, stored in SQLite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedConfiguration {
    pub id: String,
    pub name: String,
    pub tabs: Vec<Tab>,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}
