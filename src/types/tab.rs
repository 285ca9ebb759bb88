use serde::{Deserialize, Serialize};

/// Maximum number of tabs a tab set may hold.
pub const MAX_TABS: usize = 15;

/// Number of tabs in a freshly created tab set.
pub const DEFAULT_TAB_COUNT: usize = 3;

/// One header + content section of the generated document.
///
/// `id` is always the tab's 1-based position in its set. It is recomputed on
/// every insert/remove, so it is not a stable handle across structural edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub header: String,
    pub content: String,
}

impl Tab {
    /// Builds the placeholder tab for the given 1-based position.
    pub fn placeholder(position: usize) -> Self {
        Self {
            id: position.to_string(),
            header: auto_header(position),
            content: format!("Enter your content for step {}", position),
        }
    }
}

/// The auto-generated header text for a position.
pub fn auto_header(position: usize) -> String {
    format!("Step {}", position)
}

/// Matches `Step <number>` after trimming, case-insensitively, with at least
/// one whitespace character between the word and the digits.
pub fn is_auto_header(header: &str) -> bool {
    let trimmed = header.trim();
    if trimmed.len() < 4 || !trimmed.is_char_boundary(4) {
        return false;
    }
    let (word, rest) = trimmed.split_at(4);
    if !word.eq_ignore_ascii_case("step") {
        return false;
    }
    let digits = rest.trim_start();
    digits.len() < rest.len()
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// The three tabs every new tab set starts with.
pub fn default_tabs() -> Vec<Tab> {
    (1..=DEFAULT_TAB_COUNT).map(Tab::placeholder).collect()
}

/// Tab set snapshot mirrored to client-local storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabSetState {
    pub tabs: Vec<Tab>,
    pub active_tab_id: String,
}
