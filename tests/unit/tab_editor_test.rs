use std::sync::Arc;

use rstest::rstest;

use tabgen::managers::tab_editor::{TabEditor, TabEditorTrait};
use tabgen::services::state_store::{
    load_tab_set, MemoryStateStore, StateStore, ACTIVE_TAB_KEY, TABS_KEY,
};
use tabgen::types::errors::{StorageError, TabError};
use tabgen::types::tab::{is_auto_header, Tab, MAX_TABS};

fn headers(editor: &TabEditor) -> Vec<&str> {
    editor.tabs().iter().map(|t| t.header.as_str()).collect()
}

fn ids(editor: &TabEditor) -> Vec<&str> {
    editor.tabs().iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_new_editor_has_three_default_tabs() {
    let editor = TabEditor::new();
    assert_eq!(editor.tab_count(), 3);
    assert_eq!(ids(&editor), vec!["1", "2", "3"]);
    assert_eq!(headers(&editor), vec!["Step 1", "Step 2", "Step 3"]);
    assert_eq!(editor.tabs()[1].content, "Enter your content for step 2");
    assert_eq!(editor.active_id(), "1");
}

#[test]
fn test_insert_after_active_renumbers_following_tabs() {
    let mut editor = TabEditor::new();
    assert!(editor.set_active("2"));

    let new_id = editor.insert().unwrap();

    assert_eq!(new_id, "3");
    assert_eq!(editor.tab_count(), 4);
    assert_eq!(ids(&editor), vec!["1", "2", "3", "4"]);
    assert_eq!(headers(&editor), vec!["Step 1", "Step 2", "Step 3", "Step 4"]);
    assert_eq!(editor.active_id(), "3");
    // The inserted placeholder carries the set size at insertion time.
    assert_eq!(editor.tabs()[2].content, "Enter your content for step 4");
    // The old third tab moved to position 4 and kept its content.
    assert_eq!(editor.tabs()[3].content, "Enter your content for step 3");
}

#[test]
fn test_custom_header_survives_renumbering() {
    let mut editor = TabEditor::new();
    editor.rename_header("1", "Intro").unwrap();
    assert!(editor.set_active("1"));

    editor.insert().unwrap();

    assert_eq!(headers(&editor), vec!["Intro", "Step 2", "Step 3", "Step 4"]);
    assert_eq!(editor.active_id(), "2");
}

#[test]
fn test_insert_at_capacity_fails_without_change() {
    let mut editor = TabEditor::new();
    while editor.can_insert() {
        editor.insert().unwrap();
    }
    assert_eq!(editor.tab_count(), MAX_TABS);
    let before = editor.state();

    assert_eq!(editor.insert(), Err(TabError::CapacityExceeded(MAX_TABS)));
    assert_eq!(editor.state(), before);
}

#[test]
fn test_remove_last_remaining_tab_fails() {
    let mut editor = TabEditor::new();
    editor.remove().unwrap();
    editor.remove().unwrap();
    assert_eq!(editor.tab_count(), 1);
    assert!(!editor.can_remove());

    assert_eq!(editor.remove(), Err(TabError::MinimumSizeViolation));
    assert_eq!(editor.tab_count(), 1);
}

#[test]
fn test_remove_middle_tab_selects_successor() {
    let mut editor = TabEditor::new();
    editor.edit_content("3", "third").unwrap();
    editor.set_active("2");

    editor.remove().unwrap();

    assert_eq!(ids(&editor), vec!["1", "2"]);
    assert_eq!(headers(&editor), vec!["Step 1", "Step 2"]);
    assert_eq!(editor.active_id(), "2");
    assert_eq!(editor.active_tab().content, "third");
}

#[test]
fn test_remove_last_position_selects_new_last() {
    let mut editor = TabEditor::new();
    editor.set_active("3");
    editor.remove().unwrap();
    assert_eq!(editor.active_id(), "2");
}

#[test]
fn test_set_active_unknown_id_is_noop() {
    let mut editor = TabEditor::new();
    editor.set_active("2");
    assert!(!editor.set_active("99"));
    assert_eq!(editor.active_id(), "2");
}

#[test]
fn test_rename_and_edit_unknown_tab() {
    let mut editor = TabEditor::new();
    assert_eq!(
        editor.rename_header("7", "x"),
        Err(TabError::NotFound("7".to_string()))
    );
    assert_eq!(
        editor.edit_content("7", "x"),
        Err(TabError::NotFound("7".to_string()))
    );
}

#[test]
fn test_edit_content_is_stored_verbatim() {
    let mut editor = TabEditor::new();
    let html = "<script>alert('hi')</script>";
    editor.edit_content("2", html).unwrap();
    assert_eq!(editor.get_tab("2").unwrap().content, html);
}

#[test]
fn test_replace_all_validates_size() {
    let mut editor = TabEditor::new();
    assert_eq!(editor.replace_all(vec![]), Err(TabError::MinimumSizeViolation));

    let too_many: Vec<Tab> = (1..=MAX_TABS + 1).map(Tab::placeholder).collect();
    assert_eq!(
        editor.replace_all(too_many),
        Err(TabError::CapacityExceeded(MAX_TABS))
    );
    assert_eq!(editor.tab_count(), 3);
}

#[test]
fn test_replace_all_renumbers_and_activates_first() {
    let mut editor = TabEditor::new();
    editor.set_active("3");
    let tabs = vec![
        Tab { id: "9".into(), header: "Step 9".into(), content: "a".into() },
        Tab { id: "4".into(), header: "Setup".into(), content: "b".into() },
    ];
    editor.replace_all(tabs).unwrap();

    assert_eq!(ids(&editor), vec!["1", "2"]);
    assert_eq!(headers(&editor), vec!["Step 1", "Setup"]);
    assert_eq!(editor.active_id(), "1");
}

#[test]
fn test_reset_restores_defaults() {
    let mut editor = TabEditor::new();
    editor.insert().unwrap();
    editor.rename_header("1", "Custom").unwrap();
    editor.reset();
    assert_eq!(editor.state(), TabEditor::new().state());
}

#[test]
fn test_every_mutation_is_mirrored_to_store() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    let mut editor = TabEditor::load(store.clone());
    assert!(store.get(TABS_KEY).unwrap().is_some());

    editor.set_active("2");
    editor.insert().unwrap();
    editor.rename_header("3", "New one").unwrap();

    let stored = load_tab_set(store.as_ref()).unwrap().unwrap();
    assert_eq!(stored, editor.state());
    assert_eq!(store.get(ACTIVE_TAB_KEY).unwrap().as_deref(), Some("3"));
}

/// Store whose writes always fail, as with a full disk.
struct ReadOnlyStore;

impl StateStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::IoError("disk full".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::IoError("disk full".to_string()))
    }
}

#[test]
fn test_failed_store_write_keeps_in_memory_changes() {
    let mut editor = TabEditor::load(Arc::new(ReadOnlyStore));
    assert_eq!(editor.tab_count(), 3);

    editor.set_active("1");
    assert_eq!(editor.insert().unwrap(), "2");
    assert_eq!(editor.tab_count(), 4);
    assert_eq!(editor.active_id(), "2");

    editor.rename_header("2", "Kept").unwrap();
    editor.edit_content("2", "body").unwrap();
    assert_eq!(editor.get_tab("2").unwrap().header, "Kept");
    assert_eq!(editor.get_tab("2").unwrap().content, "body");

    editor.remove().unwrap();
    assert_eq!(editor.tab_count(), 3);
    assert_eq!(headers(&editor), vec!["Step 1", "Step 2", "Step 3"]);
    assert_eq!(editor.active_id(), "2");
}

#[test]
fn test_load_restores_previous_session() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    {
        let mut editor = TabEditor::load(store.clone());
        editor.insert().unwrap();
        editor.edit_content("2", "kept").unwrap();
    }

    let editor = TabEditor::load(store);
    assert_eq!(editor.tab_count(), 4);
    assert_eq!(editor.active_id(), "2");
    assert_eq!(editor.get_tab("2").unwrap().content, "kept");
}

#[test]
fn test_load_falls_back_to_defaults_on_malformed_state() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    store.set(TABS_KEY, "{not json").unwrap();

    let editor = TabEditor::load(store.clone());
    assert_eq!(editor.state(), TabEditor::new().state());
    // The defaults are written back over the broken value.
    assert!(load_tab_set(store.as_ref()).unwrap().is_some());
}

#[test]
fn test_load_with_unknown_active_id_selects_first() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    TabEditor::load(store.clone());
    store.set(ACTIVE_TAB_KEY, "42").unwrap();

    let editor = TabEditor::load(store);
    assert_eq!(editor.active_id(), "1");
}

#[rstest]
#[case("Step 1", true)]
#[case("step 12", true)]
#[case("  STEP\t3  ", true)]
#[case("Step", false)]
#[case("Step1", false)]
#[case("Step 2a", false)]
#[case("Intro", false)]
#[case("Stép 1", false)]
#[case("", false)]
fn test_auto_header_pattern(#[case] header: &str, #[case] expected: bool) {
    assert_eq!(is_auto_header(header), expected);
}
