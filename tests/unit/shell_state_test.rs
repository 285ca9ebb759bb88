use std::sync::Arc;

use rstest::rstest;

use tabgen::services::shell_state::{page_name, ShellState, LAST_VISITED_TTL_MS};
use tabgen::services::state_store::{MemoryStateStore, StateStore, LAST_VISITED_KEY, THEME_KEY};
use tabgen::types::settings::ThemeMode;

fn shell() -> (ShellState, Arc<dyn StateStore>) {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    (ShellState::new(store.clone()), store)
}

#[test]
fn test_theme_defaults_to_system() {
    let (shell, _) = shell();
    assert_eq!(shell.theme(), ThemeMode::System);
    assert_eq!(shell.effective_theme(true), ThemeMode::Dark);
    assert_eq!(shell.effective_theme(false), ThemeMode::Light);
}

#[test]
fn test_set_theme_is_stored() {
    let (shell, store) = shell();
    shell.set_theme(ThemeMode::Dark).unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(shell.theme(), ThemeMode::Dark);
    assert_eq!(shell.effective_theme(false), ThemeMode::Dark);
}

#[test]
fn test_unrecognised_stored_theme_reads_as_system() {
    let (shell, store) = shell();
    store.set(THEME_KEY, "sepia").unwrap();
    assert_eq!(shell.theme(), ThemeMode::System);
}

#[rstest]
#[case("/", Some("Home"))]
#[case("/tabs", Some("Tabs"))]
#[case("/court-room", Some("Court Room"))]
#[case("/about", Some("About"))]
#[case("/nowhere", None)]
fn test_page_name(#[case] path: &str, #[case] expected: Option<&str>) {
    assert_eq!(page_name(path), expected);
}

#[test]
fn test_last_visited_expires_after_seven_days() {
    let (shell, _) = shell();
    let now = 1_700_000_000_000;
    let entry = shell.record_visit("/escape-room", now).unwrap().unwrap();
    assert_eq!(entry.name, "Escape Room");
    assert_eq!(entry.expires_at, now + LAST_VISITED_TTL_MS);

    assert_eq!(shell.last_visited(now + 1).as_deref(), Some("Escape Room"));
    assert_eq!(shell.last_visited(now + LAST_VISITED_TTL_MS), None);
}

#[test]
fn test_unknown_route_is_not_recorded() {
    let (shell, store) = shell();
    assert_eq!(shell.record_visit("/admin", 0).unwrap(), None);
    assert_eq!(store.get(LAST_VISITED_KEY).unwrap(), None);
    assert_eq!(shell.last_visited(0), None);
}

#[test]
fn test_garbage_last_visited_is_ignored() {
    let (shell, store) = shell();
    store.set(LAST_VISITED_KEY, "Tabs").unwrap();
    assert_eq!(shell.last_visited(0), None);
}
