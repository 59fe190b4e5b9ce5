//! Board operation processor
//!
//! Runs operations for an actor under an effective role: checks the
//! operation's permission, executes it, stamps the actor on the log entry
//! and records the entry in the context's activity log.

use crate::error::{BoardError, Result};
use crate::permissions::{Action, RoleView};
use crate::types::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use taskboard_operations::{
    Execute, ExecutionResult, LogEntry, Operation, OperationProcessor, Value,
};

/// A context that keeps an activity log
pub trait ActivityLog {
    /// The time recorded on new entries
    fn now(&self) -> DateTime<Utc>;

    /// Record `entry` as the newest activity
    fn append_activity(&mut self, entry: LogEntry);
}

impl ActivityLog for crate::context::BoardContext {
    fn now(&self) -> DateTime<Utc> {
        crate::context::BoardContext::now(self)
    }

    fn append_activity(&mut self, entry: LogEntry) {
        crate::context::BoardContext::append_activity(self, entry)
    }
}

/// Wrap a mutation's outcome as a logged result, using the operation's own
/// fields as the logged input.
pub(crate) fn logged<O, T>(op: &O, started: Instant, result: Result<T>) -> ExecutionResult<T, BoardError>
where
    O: Operation + Serialize,
    T: Serialize,
{
    let input = serde_json::to_value(op).unwrap_or(Value::Null);
    ExecutionResult::logged(op.op_string(), input, started, result)
}

/// Processor for board operations
#[derive(Debug, Clone)]
pub struct BoardProcessor {
    actor: Option<String>,
    role: RoleView,
}

impl BoardProcessor {
    /// A processor acting with `role`, without actor attribution
    pub fn new(role: RoleView) -> Self {
        Self { actor: None, role }
    }

    /// Shorthand for a processor with no preview ceiling
    pub fn for_role(role: Role) -> Self {
        Self::new(RoleView::new(role))
    }

    /// Attribute log entries to `actor`
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    pub fn role(&self) -> &RoleView {
        &self.role
    }

    /// Toggle or clear a preview ceiling between operations
    pub fn role_mut(&mut self) -> &mut RoleView {
        &mut self.role
    }

    /// Check the operation's declared permission against the effective role
    pub fn authorize<O: Operation + ?Sized>(&self, operation: &O) -> Result<()> {
        match operation.permission() {
            Some(name) => self.role.require(name.parse::<Action>()?),
            None => Ok(()),
        }
    }
}

impl<C: ActivityLog> OperationProcessor<C, BoardError> for BoardProcessor {
    fn process<O>(&self, operation: &O, ctx: &mut C) -> Result<O::Output>
    where
        O: Operation + Execute<C, BoardError>,
    {
        let op = operation.op_string();
        if let Err(error) = self.authorize(operation) {
            tracing::warn!(%op, actor = ?self.actor, %error, "operation refused");
            return Err(error);
        }

        tracing::debug!(%op, actor = ?self.actor, role = %self.role.effective(), "processing");
        let (result, log_entry) = operation.execute(ctx).split();

        if let Some(entry) = log_entry {
            let entry = entry.at(ctx.now());
            let entry = match &self.actor {
                Some(actor) => entry.with_actor(actor.clone()),
                None => entry,
            };
            ctx.append_activity(entry);
        }

        if let Err(error) = &result {
            tracing::debug!(%op, %error, "operation failed");
        }
        result
    }
}
