//! Tab set editor.
//!
//! Owns the ordered list of tabs and the active selection. Ids always equal
//! 1-based positions: every insert/remove renumbers the whole list, and any
//! header still shaped like `Step <n>` follows its tab to the new number.
//! Custom headers are never touched.
//!
//! When constructed with [`TabEditor::load`] the editor mirrors itself to the
//! given [`StateStore`] after every successful mutation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::state_store::{load_tab_set, save_tab_set, StateStore};
use crate::types::errors::TabError;
use crate::types::tab::{auto_header, default_tabs, is_auto_header, Tab, TabSetState, MAX_TABS};

/// Trait defining the tab editor interface.
pub trait TabEditorTrait {
    fn insert(&mut self) -> Result<String, TabError>;
    fn remove(&mut self) -> Result<(), TabError>;
    fn rename_header(&mut self, tab_id: &str, header: &str) -> Result<(), TabError>;
    fn edit_content(&mut self, tab_id: &str, content: &str) -> Result<(), TabError>;
    fn set_active(&mut self, tab_id: &str) -> bool;
    fn replace_all(&mut self, tabs: Vec<Tab>) -> Result<(), TabError>;
    fn reset(&mut self);
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn tabs(&self) -> &[Tab];
    fn active_tab(&self) -> &Tab;
    fn active_id(&self) -> &str;
    fn tab_count(&self) -> usize;
    fn can_insert(&self) -> bool;
    fn can_remove(&self) -> bool;
}

/// In-memory tab set editor.
pub struct TabEditor {
    tabs: Vec<Tab>,
    /// Index into `tabs`; always in bounds because `tabs` is never empty.
    active_index: usize,
    store: Option<Arc<dyn StateStore>>,
}

/// Reassigns ids to positions and rewrites auto-generated headers.
fn renumber(tabs: &mut [Tab]) {
    for (i, tab) in tabs.iter_mut().enumerate() {
        let position = i + 1;
        tab.id = position.to_string();
        if is_auto_header(&tab.header) {
            tab.header = auto_header(position);
        }
    }
}

impl TabEditor {
    /// Creates an editor holding the three default tabs, without storage.
    pub fn new() -> Self {
        Self {
            tabs: default_tabs(),
            active_index: 0,
            store: None,
        }
    }

    /// Restores the editor from `store`, falling back to the default tabs
    /// when nothing is stored or the stored state is malformed.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let mut editor = Self::new();
        match load_tab_set(store.as_ref()) {
            Ok(Some(state)) => {
                let mut tabs = state.tabs;
                let active_index = tabs
                    .iter()
                    .position(|t| t.id == state.active_tab_id)
                    .unwrap_or(0);
                renumber(&mut tabs);
                debug!(tabs = tabs.len(), active_index, "restored tab set");
                editor.tabs = tabs;
                editor.active_index = active_index;
            }
            Ok(None) => debug!("no stored tab set, using defaults"),
            Err(e) => warn!(error = %e, "stored tab set unusable, using defaults"),
        }
        editor.store = Some(store);
        editor.persist();
        editor
    }

    /// Snapshot of the tabs and active id, as mirrored to storage.
    pub fn state(&self) -> TabSetState {
        TabSetState {
            tabs: self.tabs.clone(),
            active_tab_id: self.active_id().to_string(),
        }
    }

    fn find_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = save_tab_set(store.as_ref(), &self.state()) {
                warn!(error = %e, "failed to mirror tab set to local storage");
            }
        }
    }
}

impl Default for TabEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TabEditorTrait for TabEditor {
    /// Insert a placeholder tab right after the active one and activate it.
    /// Returns the new tab's id.
    fn insert(&mut self) -> Result<String, TabError> {
        if self.tabs.len() >= MAX_TABS {
            return Err(TabError::CapacityExceeded(MAX_TABS));
        }

        let next = self.tabs.len() + 1;
        let mut provisional = Tab::placeholder(next);
        provisional.id = String::new();

        let at = self.active_index + 1;
        self.tabs.insert(at, provisional);
        renumber(&mut self.tabs);
        self.active_index = at;
        self.persist();

        debug!(id = %self.tabs[at].id, count = self.tabs.len(), "tab inserted");
        Ok(self.tabs[at].id.clone())
    }

    /// Remove the active tab. The tab that slides into its slot becomes
    /// active, or the new last tab if the removed one was last.
    fn remove(&mut self) -> Result<(), TabError> {
        if self.tabs.len() <= 1 {
            return Err(TabError::MinimumSizeViolation);
        }

        let at = self.active_index;
        self.tabs.remove(at);
        renumber(&mut self.tabs);
        self.active_index = at.min(self.tabs.len() - 1);
        self.persist();

        debug!(removed = at + 1, count = self.tabs.len(), "tab removed");
        Ok(())
    }

    fn rename_header(&mut self, tab_id: &str, header: &str) -> Result<(), TabError> {
        let idx = self
            .find_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        self.tabs[idx].header = header.to_string();
        self.persist();
        Ok(())
    }

    fn edit_content(&mut self, tab_id: &str, content: &str) -> Result<(), TabError> {
        let idx = self
            .find_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        self.tabs[idx].content = content.to_string();
        self.persist();
        Ok(())
    }

    /// Activate the tab with `tab_id`. Unknown ids are ignored; returns
    /// whether the selection now points at `tab_id`.
    fn set_active(&mut self, tab_id: &str) -> bool {
        match self.find_index(tab_id) {
            Some(idx) => {
                self.active_index = idx;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Replace the whole set (e.g. with a saved configuration). The first tab
    /// becomes active. Nothing changes when the list is empty or too long.
    fn replace_all(&mut self, tabs: Vec<Tab>) -> Result<(), TabError> {
        if tabs.is_empty() {
            return Err(TabError::MinimumSizeViolation);
        }
        if tabs.len() > MAX_TABS {
            return Err(TabError::CapacityExceeded(MAX_TABS));
        }
        self.tabs = tabs;
        renumber(&mut self.tabs);
        self.active_index = 0;
        self.persist();
        Ok(())
    }

    fn reset(&mut self) {
        self.tabs = default_tabs();
        self.active_index = 0;
        self.persist();
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_index]
    }

    fn active_id(&self) -> &str {
        &self.tabs[self.active_index].id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn can_insert(&self) -> bool {
        self.tabs.len() < MAX_TABS
    }

    fn can_remove(&self) -> bool {
        self.tabs.len() > 1
    }
}
