//! Operation processing: run an operation and record its log entry

use crate::{Execute, Operation};

/// Runs operations against a context and takes care of cross-cutting
/// concerns (authorization, actor attribution, activity logging).
///
/// Callers that don't need those concerns can call `Execute::execute`
/// directly.
pub trait OperationProcessor<C, E> {
    /// Execute `operation` against `ctx`, returning its output.
    fn process<O>(&self, operation: &O, ctx: &mut C) -> Result<O::Output, E>
    where
        O: Operation + Execute<C, E>;
}
