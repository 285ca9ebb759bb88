use serde::{Deserialize, Serialize};

/// Lifecycle of one Court Room run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Idle,
    Running,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Who a distraction message comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Boss,
    Family,
    Agile,
}

/// Category of a planted code issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Accessibility,
    Security,
    Functionality,
}

impl IssueKind {
    /// Maps a task label such as `"fix security validation"` to its category.
    pub fn from_task(task: &str) -> Option<Self> {
        if task.contains("accessibility") {
            Some(IssueKind::Accessibility)
        } else if task.contains("security") {
            Some(IssueKind::Security)
        } else if task.contains("authentication") {
            Some(IssueKind::Functionality)
        } else {
            None
        }
    }
}

/// A code issue the player has to fix before time runs out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeIssue {
    pub id: String,
    pub kind: IssueKind,
    pub description: String,
    pub code: String,
    pub solution: String,
    pub violation: String,
    pub fixed: bool,
}

/// A message posted to the player during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// Task label for critical messages, `None` for plain distractions.
    pub task: Option<String>,
    pub urgent: bool,
    pub critical: bool,
    pub dismissed: bool,
    /// Seconds since the run started.
    pub posted_at: u32,
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "issue", rename_all = "snake_case")]
pub enum Verdict {
    /// Every issue fixed and no critical message left pending.
    Compliant,
    /// Time ran out with at least one issue unfixed.
    UnfixedIssues,
    /// Time ran out with a critical message still pending.
    IgnoredMessages,
    /// A critical task was ignored through both escalations.
    Lawsuit(IssueKind),
}

/// Point-in-time view of the game, returned over RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourtRoomSnapshot {
    pub phase: GamePhase,
    pub time_limit_secs: u32,
    pub time_remaining: u32,
    pub elapsed: u32,
    pub issues: Vec<CodeIssue>,
    pub messages: Vec<GameMessage>,
    pub verdict: Option<Verdict>,
    pub score: u32,
}

/// Result of keyword analysis over player-submitted code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CodeAnalysis {
    /// Issue ids newly fixed by this analysis.
    pub detected: Vec<String>,
    /// Issue ids that were already fixed beforehand.
    pub already_fixed: Vec<String>,
    /// Issue ids still unfixed after this analysis.
    pub missing: Vec<String>,
    pub fixed_count: usize,
    pub total: usize,
}

/// Persisted summary of one Court Room run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourtRoomSession {
    pub id: String,
    pub player_name: String,
    /// Time limit in minutes.
    pub time_limit: u32,
    pub final_score: u32,
    pub issues_fixed: u32,
    pub total_issues: u32,
    pub completed: bool,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}
