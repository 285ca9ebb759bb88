//! Event Logger: bounded in-process log of application events.
//!
//! Keeps the most recent `capacity` events (oldest evicted first) so they can
//! be queried over RPC. Every event is also forwarded to `tracing`.

use std::collections::VecDeque;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};

use crate::types::log::{LogEvent, LogLevel, DEFAULT_LOG_CAPACITY};

/// Trait defining the event logger interface.
pub trait EventLoggerTrait {
    fn log(
        &mut self,
        level: LogLevel,
        message: &str,
        data: Option<Value>,
        user_id: Option<&str>,
        session_id: Option<&str>,
    );
    fn get_logs(&self, level: Option<LogLevel>, limit: usize) -> Vec<LogEvent>;
    fn clear_logs(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Ring-buffer event logger.
pub struct EventLogger {
    events: VecDeque<LogEvent>,
    capacity: usize,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Creates a logger keeping at most `capacity` events (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    pub fn info(&mut self, message: &str, data: Option<Value>) {
        self.log(LogLevel::Info, message, data, None, None);
    }

    pub fn warn(&mut self, message: &str, data: Option<Value>) {
        self.log(LogLevel::Warn, message, data, None, None);
    }

    pub fn error(&mut self, message: &str, data: Option<Value>) {
        self.log(LogLevel::Error, message, data, None, None);
    }

    /// Records a timer start and returns the instant to hand to [`time_end`](Self::time_end).
    pub fn time_start(&mut self, label: &str) -> Instant {
        self.info(&format!("Timer started: {}", label), None);
        Instant::now()
    }

    /// Records the elapsed time since `start` and returns it in milliseconds.
    pub fn time_end(&mut self, label: &str, start: Instant) -> f64 {
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.info(
            &format!("Timer ended: {}", label),
            Some(json!({ "duration": format!("{:.2}ms", duration_ms) })),
        );
        duration_ms
    }

    pub fn track_page_view(&mut self, page: &str) {
        self.info("Page view", Some(json!({ "page": page })));
    }

    /// Records a user action. Object `details` are merged next to the
    /// `action` key; any other value is stored under `details`.
    pub fn track_user_action(&mut self, action: &str, details: Option<Value>) {
        let mut data = Map::new();
        data.insert("action".to_string(), Value::String(action.to_string()));
        match details {
            Some(Value::Object(extra)) => {
                for (k, v) in extra {
                    if k != "action" {
                        data.insert(k, v);
                    }
                }
            }
            Some(other) => {
                data.insert("details".to_string(), other);
            }
            None => {}
        }
        self.info("User action", Some(Value::Object(data)));
    }

    pub fn track_error(&mut self, name: &str, message: &str, context: Option<&str>) {
        self.error(
            "Application error",
            Some(json!({ "name": name, "message": message, "context": context })),
        );
    }

    pub fn track_performance_metric(&mut self, metric: &str, value: f64, unit: &str) {
        self.info(
            "Performance metric",
            Some(json!({ "metric": metric, "value": value, "unit": unit })),
        );
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoggerTrait for EventLogger {
    fn log(
        &mut self,
        level: LogLevel,
        message: &str,
        data: Option<Value>,
        user_id: Option<&str>,
        session_id: Option<&str>,
    ) {
        match level {
            LogLevel::Info => tracing::info!(target: "tabgen::events", data = ?data, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "tabgen::events", data = ?data, "{}", message),
            LogLevel::Error => {
                tracing::error!(target: "tabgen::events", data = ?data, "{}", message)
            }
        }

        self.events.push_back(LogEvent {
            timestamp: Self::now_millis(),
            level,
            message: message.to_string(),
            data,
            user_id: user_id.map(str::to_string),
            session_id: session_id.map(str::to_string),
        });
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    /// Returns the last `limit` events matching `level` (all levels when
    /// `None`), oldest first.
    fn get_logs(&self, level: Option<LogLevel>, limit: usize) -> Vec<LogEvent> {
        let matching: Vec<&LogEvent> = self
            .events
            .iter()
            .filter(|e| level.map_or(true, |l| e.level == l))
            .collect();
        let skip = matching.len().saturating_sub(limit);
        matching.into_iter().skip(skip).cloned().collect()
    }

    fn clear_logs(&mut self) {
        self.events.clear();
    }

    fn len(&self) -> usize {
        self.events.len()
    }

    fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
