//! Activity entries recorded for mutating commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;

/// One executed command, successful or not
///
/// `output` is the serialized return value, or `{"error": "..."}` when the
/// command failed. Entries are created with the wall clock; a processor that
/// owns a clock restamps them with [`LogEntry::at`] before storing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ULID, so ids sort by creation
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// "verb noun", e.g. "move task"
    pub op: String,
    /// The command's own fields
    pub input: Value,
    pub output: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub duration_ms: u64,
}

impl LogEntry {
    /// Entry for a command that returned `output`
    pub fn success(op: impl Into<String>, input: Value, output: Value, duration_ms: u64) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor: None,
            duration_ms,
        }
    }

    /// Entry for a command that failed with `error`
    pub fn failure(
        op: impl Into<String>,
        input: Value,
        error: impl Display,
        duration_ms: u64,
    ) -> Self {
        Self::success(op, input, json!({ "error": error.to_string() }), duration_ms)
    }

    /// Restamp with `timestamp`
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The error message of a failed command
    pub fn error(&self) -> Option<&str> {
        self.output.get("error").and_then(Value::as_str)
    }

    pub fn is_failure(&self) -> bool {
        self.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_failure_carries_message() {
        let entry = LogEntry::failure("delete column", json!({"id": "ready"}), "column not found", 2);
        assert!(entry.is_failure());
        assert_eq!(entry.error(), Some("column not found"));
        assert_eq!(entry.actor, None);

        let ok = LogEntry::success("add task", json!({}), json!({"title": "x"}), 0);
        assert!(!ok.is_failure());
    }

    #[test]
    fn test_restamp_and_actor() {
        let at = Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap();
        let entry = LogEntry::success("move task", json!({}), json!({}), 0)
            .at(at)
            .with_actor("alice");
        assert_eq!(entry.timestamp, at);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["actor"], "alice");
        let back: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
