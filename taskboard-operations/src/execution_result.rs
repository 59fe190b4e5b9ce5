//! Execution result types for operations

use crate::LogEntry;
use serde::Serialize;
use std::fmt::Display;
use std::time::Instant;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Wrap the outcome of a mutating operation, logging success and failure.
    ///
    /// `input` is the normalized parameters of the operation; `started` is
    /// when execution began.
    pub fn logged(
        op: impl Into<String>,
        input: serde_json::Value,
        started: Instant,
        result: Result<T, E>,
    ) -> Self
    where
        T: Serialize,
        E: Display,
    {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => {
                let output = serde_json::to_value(&value).unwrap_or(serde_json::Value::Null);
                Self::Logged {
                    value,
                    log_entry: LogEntry::success(op, input, output, duration_ms),
                }
            }
            Err(error) => {
                let log_entry = LogEntry::failure(op, input, &error, duration_ms);
                Self::Failed {
                    error,
                    log_entry: Some(log_entry),
                }
            }
        }
    }

    /// Wrap the outcome of a read-only operation. Nothing is logged.
    pub fn unlogged(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }

    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}
