//! The `Operation` metadata trait and the `Execute` trait

use crate::ExecutionResult;

/// Metadata every operation carries. Implemented by `#[operation]`.
pub trait Operation {
    /// The action word, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The entity acted on, e.g. "task"
    fn noun(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Name of the permission a caller must hold, if any
    fn permission(&self) -> Option<&'static str> {
        None
    }

    /// Canonical op string used in log entries ("move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context `C`, failing with `E`.
pub trait Execute<C, E> {
    /// The value handed back on success
    type Output;

    fn execute(&self, ctx: &mut C) -> ExecutionResult<Self::Output, E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation;

    #[operation(verb = "add", noun = "widget", description = "Add a widget")]
    struct AddWidget {
        #[allow(dead_code)]
        name: String,
    }

    #[operation(
        verb = "delete",
        noun = "widget",
        description = "Delete a widget",
        permission = "delete_widget"
    )]
    struct DeleteWidget;

    struct Counter(u32);

    impl Execute<Counter, String> for DeleteWidget {
        type Output = u32;

        fn execute(&self, ctx: &mut Counter) -> ExecutionResult<u32, String> {
            ctx.0 += 1;
            ExecutionResult::Unlogged { value: ctx.0 }
        }
    }

    #[test]
    fn test_operation_metadata() {
        let op = AddWidget {
            name: "w".into(),
        };
        assert_eq!(op.verb(), "add");
        assert_eq!(op.noun(), "widget");
        assert_eq!(op.description(), "Add a widget");
        assert_eq!(op.op_string(), "add widget");
        assert_eq!(op.permission(), None);
    }

    #[test]
    fn test_operation_permission() {
        assert_eq!(DeleteWidget.permission(), Some("delete_widget"));
    }

    #[test]
    fn test_execute_mutates_context() {
        let mut counter = Counter(0);
        let value = DeleteWidget.execute(&mut counter).into_result().unwrap();
        assert_eq!(value, 1);
        assert_eq!(counter.0, 1);
    }
}
