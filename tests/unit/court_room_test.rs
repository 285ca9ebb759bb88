use std::sync::Arc;

use rstest::rstest;

use tabgen::database::Database;
use tabgen::managers::court_room_manager::{CourtRoomManager, CourtRoomManagerTrait};
use tabgen::services::court_room::CourtRoomGame;
use tabgen::services::event_logger::{EventLogger, EventLoggerTrait};
use tabgen::types::court_room::{GamePhase, IssueKind, Verdict};
use tabgen::types::errors::{CourtRoomError, PersistenceError};

fn started(minutes: u32) -> (CourtRoomGame, EventLogger) {
    let mut log = EventLogger::new();
    let mut game = CourtRoomGame::new();
    game.start(minutes, &mut log).unwrap();
    (game, log)
}

fn dismiss_task(game: &mut CourtRoomGame, task: &str) {
    let ids: Vec<String> = game
        .messages()
        .iter()
        .filter(|m| m.task.as_deref() == Some(task) && !m.dismissed)
        .map(|m| m.id.clone())
        .collect();
    for id in ids {
        game.dismiss_message(&id).unwrap();
    }
}

#[test]
fn test_new_game_is_idle() {
    let game = CourtRoomGame::new();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(game.issues().is_empty());
    assert_eq!(game.verdict(), None);
}

#[test]
fn test_start_plants_three_issues() {
    let (game, log) = started(5);
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.time_remaining(), 300);
    assert_eq!(game.time_limit_minutes(), 5);
    let ids: Vec<&str> = game.issues().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(game.issues().iter().all(|i| !i.fixed));
    assert_eq!(log.len(), 1);
}

#[rstest]
#[case(0)]
#[case(61)]
fn test_start_rejects_out_of_range_limit(#[case] minutes: u32) {
    let mut log = EventLogger::new();
    let mut game = CourtRoomGame::new();
    assert_eq!(
        game.start(minutes, &mut log),
        Err(CourtRoomError::InvalidTimeLimit(minutes))
    );
    assert_eq!(game.phase(), GamePhase::Idle);
}

#[test]
fn test_start_twice_fails() {
    let (mut game, mut log) = started(5);
    assert_eq!(game.start(5, &mut log), Err(CourtRoomError::AlreadyRunning));
}

#[test]
fn test_actions_require_running_game() {
    let mut log = EventLogger::new();
    let mut game = CourtRoomGame::new();
    assert_eq!(game.tick(1, &mut log), Err(CourtRoomError::NotRunning));
    assert_eq!(game.fix_issue("1", &mut log), Err(CourtRoomError::NotRunning));
    assert_eq!(game.dismiss_message("m1"), Err(CourtRoomError::NotRunning));
    assert!(game.analyze_code("alt=", &mut log).is_err());
}

#[test]
fn test_unknown_ids() {
    let (mut game, mut log) = started(5);
    assert_eq!(
        game.fix_issue("9", &mut log),
        Err(CourtRoomError::IssueNotFound("9".to_string()))
    );
    assert_eq!(
        game.dismiss_message("m99"),
        Err(CourtRoomError::MessageNotFound("m99".to_string()))
    );
}

#[test]
fn test_messages_follow_opening_schedule() {
    let (mut game, mut log) = started(5);
    game.tick(19, &mut log).unwrap();
    assert!(game.messages().is_empty());

    game.tick(21, &mut log).unwrap();
    let ids: Vec<&str> = game.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
    let task = &game.messages()[2];
    assert!(task.critical);
    assert_eq!(task.task.as_deref(), Some("fix accessibility issue"));
    assert_eq!(task.posted_at, 40);
    assert!(!game.messages()[0].critical);
}

#[test]
fn test_fixing_everything_before_messages_wins() {
    let (mut game, mut log) = started(5);
    for id in ["1", "2", "3"] {
        game.fix_issue(id, &mut log).unwrap();
    }
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.verdict(), Some(Verdict::Compliant));
    assert_eq!(game.score(), 300 + 300);
    assert_eq!(game.tick(1, &mut log), Err(CourtRoomError::NotRunning));
}

#[test]
fn test_timeout_with_unfixed_issues_loses() {
    let (mut game, mut log) = started(1);
    let phase = game.tick(120, &mut log).unwrap();
    assert_eq!(phase, GamePhase::Lost);
    assert_eq!(game.verdict(), Some(Verdict::UnfixedIssues));
    assert_eq!(game.time_remaining(), 0);
    assert_eq!(game.snapshot().elapsed, 60);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_timeout_with_pending_critical_message_loses() {
    let (mut game, mut log) = started(1);
    game.tick(45, &mut log).unwrap();
    for id in ["1", "2", "3"] {
        game.fix_issue(id, &mut log).unwrap();
    }
    assert_eq!(game.phase(), GamePhase::Running);

    game.tick(15, &mut log).unwrap();
    assert_eq!(game.phase(), GamePhase::Lost);
    assert_eq!(game.verdict(), Some(Verdict::IgnoredMessages));
    assert_eq!(game.score(), 300);
}

#[test]
fn test_dismissing_last_critical_message_wins() {
    let (mut game, mut log) = started(1);
    game.tick(45, &mut log).unwrap();
    for id in ["1", "2", "3"] {
        game.fix_issue(id, &mut log).unwrap();
    }
    game.dismiss_message("m3").unwrap();
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.score(), 300 + 15);
}

#[test]
fn test_ignored_task_escalates_then_triggers_lawsuit() {
    let (mut game, mut log) = started(10);
    game.tick(160, &mut log).unwrap();
    let urgent = game.messages().last().unwrap();
    assert!(urgent.urgent);
    assert!(urgent.text.starts_with("URGENT: "));
    assert_eq!(urgent.task.as_deref(), Some("fix accessibility issue"));

    let phase = game.tick(120, &mut log).unwrap();
    assert_eq!(phase, GamePhase::Lost);
    assert_eq!(
        game.verdict(),
        Some(Verdict::Lawsuit(IssueKind::Accessibility))
    );
    assert_eq!(game.snapshot().elapsed, 280);
}

#[test]
fn test_dismissed_task_avoids_its_lawsuit() {
    let (mut game, mut log) = started(10);
    game.tick(45, &mut log).unwrap();
    dismiss_task(&mut game, "fix accessibility issue");
    game.tick(120, &mut log).unwrap();
    // The follow-up still arrives after the original was dismissed.
    assert!(game
        .messages()
        .iter()
        .any(|m| m.urgent && m.task.as_deref() == Some("fix accessibility issue")));
    dismiss_task(&mut game, "fix accessibility issue");

    game.tick(115, &mut log).unwrap();
    assert_eq!(game.phase(), GamePhase::Running);

    // The security task was never dismissed.
    game.tick(40, &mut log).unwrap();
    assert_eq!(game.verdict(), Some(Verdict::Lawsuit(IssueKind::Security)));
}

#[test]
fn test_analyze_code_applies_detected_fixes() {
    let (mut game, mut log) = started(5);
    game.fix_issue("3", &mut log).unwrap();

    let report = game
        .analyze_code(r#"<img src="logo.png" alt="Logo" />"#, &mut log)
        .unwrap();
    assert_eq!(report.detected, vec!["1".to_string()]);
    assert_eq!(report.already_fixed, vec!["3".to_string()]);
    assert_eq!(report.missing, vec!["2".to_string()]);
    assert_eq!(report.fixed_count, 2);
    assert_eq!(report.total, 3);
    assert_eq!(game.phase(), GamePhase::Running);

    let report = game
        .analyze_code("setUser(sanitize(value))", &mut log)
        .unwrap();
    assert_eq!(report.detected, vec!["2".to_string()]);
    assert_eq!(game.phase(), GamePhase::Won);
}

#[test]
fn test_reset_returns_to_idle() {
    let (mut game, mut log) = started(5);
    game.tick(50, &mut log).unwrap();
    game.reset();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(game.messages().is_empty());
    game.start(2, &mut log).unwrap();
    assert_eq!(game.time_remaining(), 120);
}

#[test]
fn test_snapshot_serializes_lawsuit_verdict() {
    let (mut game, mut log) = started(10);
    game.tick(280, &mut log).unwrap();
    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["phase"], "lost");
    assert_eq!(value["verdict"]["kind"], "lawsuit");
    assert_eq!(value["verdict"]["issue"], "accessibility");
}

// ─── Session records ───

#[test]
fn test_session_create_list_update() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mgr = CourtRoomManager::new(db);

    let first = mgr.create_session(" Ada ", 5, 0, 0, 3, false).unwrap();
    assert_eq!(first.player_name, "Ada");
    let second = mgr.create_session("Grace", 10, 400, 3, 3, true).unwrap();

    let list = mgr.list_sessions(10).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, second.id);
    assert_eq!(mgr.list_sessions(1).unwrap().len(), 1);

    let updated = mgr.update_session(&first.id, 250, 2, true).unwrap();
    assert_eq!(updated.final_score, 250);
    assert_eq!(updated.issues_fixed, 2);
    assert!(updated.completed);
    assert_eq!(updated.time_limit, 5);
}

#[test]
fn test_session_update_unknown_id() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mgr = CourtRoomManager::new(db);
    assert!(matches!(
        mgr.update_session("nope", 1, 1, true),
        Err(PersistenceError::NotFound(_))
    ));
}
