//! Court Room: a timed exercise where the player fixes planted code issues
//! while distraction messages keep arriving.
//!
//! The game is a finite state machine (`Idle → Running → Won | Lost`) driven
//! by [`CourtRoomGame::tick`] rather than by wall-clock callbacks, so a run is
//! fully reproducible: the caller decides how many seconds pass.
//!
//! Task messages are critical. Two minutes after one is posted an urgent
//! follow-up always arrives. Two minutes after that, if any message for the
//! task is still undismissed, the run is lost with a lawsuit verdict for the
//! task's category.

use serde_json::json;
use tracing::info;

use crate::services::event_logger::EventLogger;
use crate::types::court_room::{
    CodeAnalysis, CodeIssue, CourtRoomSnapshot, GameMessage, GamePhase, IssueKind, Sender,
    Verdict,
};
use crate::types::errors::CourtRoomError;

/// Accepted range for the time limit, in minutes.
pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 60;

/// Seconds between a task message and its urgent follow-up, and again
/// between the follow-up and the lawsuit.
pub const ESCALATION_SECS: u32 = 120;

/// Opening schedule: (seconds after start, sender, task label).
const OPENING_SCHEDULE: [(u32, Sender, Option<&str>); 7] = [
    (20, Sender::Boss, None),
    (30, Sender::Family, None),
    (40, Sender::Agile, Some("fix accessibility issue")),
    (60, Sender::Boss, None),
    (80, Sender::Agile, Some("fix security validation")),
    (100, Sender::Family, None),
    (120, Sender::Agile, Some("fix user authentication")),
];

const BOSS_LINES: [&str; 3] = [
    "Are you done with sprint 1?",
    "The client is asking for an update",
    "Can you send me the progress report?",
];
const FAMILY_LINES: [&str; 3] = [
    "Can you pick up the kids after work?",
    "Don't forget dinner tonight",
    "Please call back when you can",
];
const AGILE_LINES: [&str; 3] = [
    "Change the title colour to red",
    "Update the navigation menu layout",
    "Add more spacing between components",
];

const POINTS_PER_ISSUE: u32 = 100;

fn initial_issues() -> Vec<CodeIssue> {
    vec![
        CodeIssue {
            id: "1".to_string(),
            kind: IssueKind::Accessibility,
            description: "Missing alt attribute on image".to_string(),
            code: r#"<img src="logo.png" />"#.to_string(),
            solution: r#"<img src="logo.png" alt="Company logo" />"#.to_string(),
            violation: "Disability Discrimination Act".to_string(),
            fixed: false,
        },
        CodeIssue {
            id: "2".to_string(),
            kind: IssueKind::Security,
            description: "Input validation missing".to_string(),
            code: r#"<input type="text" onChange={e => setUser(e.target.value)} />"#.to_string(),
            solution: r#"<input type="text" onChange={e => setUser(sanitize(e.target.value))} />"#
                .to_string(),
            violation: "Data Protection Laws".to_string(),
            fixed: false,
        },
        CodeIssue {
            id: "3".to_string(),
            kind: IssueKind::Functionality,
            description: "User login system broken".to_string(),
            code: "function login() { /* not implemented */ }".to_string(),
            solution: "function login(credentials) { return authenticateUser(credentials); }"
                .to_string(),
            violation: "Contract Law - Service Unavailable".to_string(),
            fixed: false,
        },
    ]
}

#[derive(Debug, Clone)]
enum EventKind {
    Post { sender: Sender, task: Option<String> },
    Escalate { sender: Sender, task: String, text: String },
    Deadline { task: String },
}

#[derive(Debug, Clone)]
struct ScheduledEvent {
    due: u32,
    kind: EventKind,
}

/// State of one Court Room run.
pub struct CourtRoomGame {
    phase: GamePhase,
    time_limit_secs: u32,
    time_remaining: u32,
    elapsed: u32,
    issues: Vec<CodeIssue>,
    messages: Vec<GameMessage>,
    pending: Vec<ScheduledEvent>,
    verdict: Option<Verdict>,
    next_message_id: u64,
    /// Next template index per sender (boss, family, agile).
    rotation: [usize; 3],
}

impl CourtRoomGame {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            time_limit_secs: 0,
            time_remaining: 0,
            elapsed: 0,
            issues: Vec::new(),
            messages: Vec::new(),
            pending: Vec::new(),
            verdict: None,
            next_message_id: 1,
            rotation: [0; 3],
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_secs / 60
    }

    pub fn issues(&self) -> &[CodeIssue] {
        &self.issues
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn fixed_count(&self) -> usize {
        self.issues.iter().filter(|i| i.fixed).count()
    }

    /// 100 points per fixed issue, plus the seconds left on a win.
    pub fn score(&self) -> u32 {
        let base = self.fixed_count() as u32 * POINTS_PER_ISSUE;
        match self.verdict {
            Some(Verdict::Compliant) => base + self.time_remaining,
            _ => base,
        }
    }

    pub fn snapshot(&self) -> CourtRoomSnapshot {
        CourtRoomSnapshot {
            phase: self.phase,
            time_limit_secs: self.time_limit_secs,
            time_remaining: self.time_remaining,
            elapsed: self.elapsed,
            issues: self.issues.clone(),
            messages: self.messages.clone(),
            verdict: self.verdict,
            score: self.score(),
        }
    }

    /// Starts a new run with a limit of `minutes`.
    pub fn start(&mut self, minutes: u32, log: &mut EventLogger) -> Result<(), CourtRoomError> {
        if self.phase == GamePhase::Running {
            return Err(CourtRoomError::AlreadyRunning);
        }
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(CourtRoomError::InvalidTimeLimit(minutes));
        }

        *self = Self::new();
        self.phase = GamePhase::Running;
        self.time_limit_secs = minutes * 60;
        self.time_remaining = self.time_limit_secs;
        self.issues = initial_issues();
        self.pending = OPENING_SCHEDULE
            .iter()
            .map(|(due, sender, task)| ScheduledEvent {
                due: *due,
                kind: EventKind::Post {
                    sender: *sender,
                    task: task.map(str::to_string),
                },
            })
            .collect();

        info!(minutes, "court room run started");
        log.track_user_action("court_room_game_started", Some(json!({ "timeLimit": minutes })));
        Ok(())
    }

    /// Returns to `Idle`, dropping all run state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the clock by `seconds`, firing due events. Stops early once
    /// the run is over. Returns the phase afterwards.
    pub fn tick(&mut self, seconds: u32, log: &mut EventLogger) -> Result<GamePhase, CourtRoomError> {
        if self.phase != GamePhase::Running {
            return Err(CourtRoomError::NotRunning);
        }

        for _ in 0..seconds {
            self.elapsed += 1;
            self.time_remaining = self.time_remaining.saturating_sub(1);
            self.fire_due_events(log);
            if self.phase.is_over() {
                break;
            }
            if self.time_remaining == 0 {
                self.finish_on_timeout();
                break;
            }
        }
        Ok(self.phase)
    }

    /// Marks an issue fixed by hand.
    pub fn fix_issue(&mut self, issue_id: &str, log: &mut EventLogger) -> Result<(), CourtRoomError> {
        self.ensure_running()?;
        let issue = self
            .issues
            .iter_mut()
            .find(|i| i.id == issue_id)
            .ok_or_else(|| CourtRoomError::IssueNotFound(issue_id.to_string()))?;
        issue.fixed = true;
        let details = json!({
            "issueId": issue.id,
            "issueType": issue.kind,
            "description": issue.description,
            "timeRemaining": self.time_remaining,
        });
        log.track_user_action("code_issue_fixed", Some(details));
        self.check_win();
        Ok(())
    }

    /// Dismisses a message, which clears its critical flag from the win check.
    pub fn dismiss_message(&mut self, message_id: &str) -> Result<(), CourtRoomError> {
        self.ensure_running()?;
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| CourtRoomError::MessageNotFound(message_id.to_string()))?;
        message.dismissed = true;
        self.check_win();
        Ok(())
    }

    /// Looks for fixes in player-written code and applies the ones found.
    pub fn analyze_code(&mut self, code: &str, log: &mut EventLogger) -> Result<CodeAnalysis, CourtRoomError> {
        self.ensure_running()?;

        let mut report = CodeAnalysis {
            total: self.issues.len(),
            ..CodeAnalysis::default()
        };
        for issue in &mut self.issues {
            if issue.fixed {
                report.already_fixed.push(issue.id.clone());
            } else if fix_detected(issue.kind, code) {
                issue.fixed = true;
                report.detected.push(issue.id.clone());
            } else {
                report.missing.push(issue.id.clone());
            }
        }
        report.fixed_count = self.fixed_count();

        if !report.detected.is_empty() {
            log.track_user_action(
                "code_editor_auto_fix",
                Some(json!({
                    "fixedCount": report.detected.len(),
                    "fixedIssues": report.detected,
                    "codeLength": code.len(),
                })),
            );
        }
        self.check_win();
        Ok(report)
    }

    fn ensure_running(&self) -> Result<(), CourtRoomError> {
        if self.phase == GamePhase::Running {
            Ok(())
        } else {
            Err(CourtRoomError::NotRunning)
        }
    }

    fn has_pending_critical(&self) -> bool {
        self.messages.iter().any(|m| m.critical && !m.dismissed)
    }

    fn all_fixed(&self) -> bool {
        self.issues.iter().all(|i| i.fixed)
    }

    fn check_win(&mut self) {
        if self.phase == GamePhase::Running && self.all_fixed() && !self.has_pending_critical() {
            self.end(GamePhase::Won, Verdict::Compliant);
        }
    }

    fn finish_on_timeout(&mut self) {
        if !self.all_fixed() {
            self.end(GamePhase::Lost, Verdict::UnfixedIssues);
        } else if self.has_pending_critical() {
            self.end(GamePhase::Lost, Verdict::IgnoredMessages);
        } else {
            self.end(GamePhase::Won, Verdict::Compliant);
        }
    }

    fn end(&mut self, phase: GamePhase, verdict: Verdict) {
        self.phase = phase;
        self.verdict = Some(verdict);
        self.pending.clear();
        info!(?phase, ?verdict, elapsed = self.elapsed, "court room run finished");
    }

    fn next_line(&mut self, sender: Sender) -> String {
        let (slot, lines) = match sender {
            Sender::Boss => (0, &BOSS_LINES),
            Sender::Family => (1, &FAMILY_LINES),
            Sender::Agile => (2, &AGILE_LINES),
        };
        let line = lines[self.rotation[slot] % lines.len()];
        self.rotation[slot] += 1;
        line.to_string()
    }

    fn post(&mut self, sender: Sender, text: String, task: Option<String>, urgent: bool) {
        let id = format!("m{}", self.next_message_id);
        self.next_message_id += 1;
        self.messages.push(GameMessage {
            id,
            sender,
            text,
            critical: task.is_some(),
            task,
            urgent,
            dismissed: false,
            posted_at: self.elapsed,
        });
    }

    fn fire_due_events(&mut self, log: &mut EventLogger) {
        loop {
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= self.elapsed)
                .min_by_key(|(_, e)| e.due)
                .map(|(i, _)| i);
            let Some(idx) = next else { break };
            let event = self.pending.remove(idx);

            match event.kind {
                EventKind::Post { sender, task } => {
                    let text = self.next_line(sender);
                    if let Some(task) = &task {
                        self.pending.push(ScheduledEvent {
                            due: self.elapsed + ESCALATION_SECS,
                            kind: EventKind::Escalate {
                                sender,
                                task: task.clone(),
                                text: text.clone(),
                            },
                        });
                    }
                    self.post(sender, text, task, false);
                }
                EventKind::Escalate { sender, task, text } => {
                    self.post(sender, format!("URGENT: {}", text), Some(task.clone()), true);
                    self.pending.push(ScheduledEvent {
                        due: self.elapsed + ESCALATION_SECS,
                        kind: EventKind::Deadline { task },
                    });
                }
                EventKind::Deadline { task } => {
                    let ignored = self
                        .messages
                        .iter()
                        .any(|m| m.task.as_deref() == Some(task.as_str()) && m.critical && !m.dismissed);
                    if ignored {
                        let verdict = IssueKind::from_task(&task)
                            .map(Verdict::Lawsuit)
                            .unwrap_or(Verdict::IgnoredMessages);
                        log.track_user_action(
                            "court_case_triggered",
                            Some(json!({
                                "task": task,
                                "timeRemaining": self.time_remaining,
                                "issuesFixed": self.fixed_count(),
                                "totalIssues": self.issues.len(),
                            })),
                        );
                        self.end(GamePhase::Lost, verdict);
                        return;
                    }
                }
            }
        }
    }
}

impl Default for CourtRoomGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword heuristics deciding whether `code` fixes an issue of `kind`.
fn fix_detected(kind: IssueKind, code: &str) -> bool {
    match kind {
        IssueKind::Accessibility => code.contains("alt=") || code.contains("alt "),
        IssueKind::Security => {
            code.contains("sanitiz") || code.contains("validat") || code.contains("replace")
        }
        IssueKind::Functionality => {
            (code.contains("function") && code.contains("login"))
                || code.contains("authenticat")
                || code.contains("credentials")
        }
    }
}
