//! Error types for the board engine

use crate::permissions::Action;
use crate::types::Role;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Workspace not found (by id or join code)
    #[error("workspace not found: {id}")]
    WorkspaceNotFound { id: String },

    /// Member not found in a workspace
    #[error("member not found: {id}")]
    MemberNotFound { id: String },

    /// Unknown board preset
    #[error("preset not found: {id}")]
    PresetNotFound { id: String },

    /// Titles must contain something other than whitespace
    #[error("{item_type} title must not be empty")]
    EmptyTitle { item_type: String },

    /// Deleting the only remaining column
    #[error("cannot delete column '{id}': a board needs at least one column")]
    LastColumn { id: String },

    /// Column still holds tasks and no destination was given
    #[error("column '{id}' has {count} tasks; choose a column to move them to")]
    MigrationTargetRequired { id: String, count: usize },

    /// Strict preset application refused because tasks exist
    #[error("cannot apply preset '{id}' while the board has {count} tasks")]
    PresetBlocked { id: String, count: usize },

    /// Column list index out of range
    #[error("index {index} out of range for {len} columns")]
    IndexOutOfRange { index: usize, len: usize },

    /// The effective role lacks the permission an operation requires
    #[error("role '{role}' is not allowed to {action}")]
    PermissionDenied { role: Role, action: Action },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Built-in YAML data could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create an empty-title error
    pub fn empty_title(item_type: impl Into<String>) -> Self {
        Self::EmptyTitle {
            item_type: item_type.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Whether this error comes from a reference that no longer matches the
    /// board (a stale id or index). UI callers treat these as no-ops.
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. } | Self::ColumnNotFound { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

/// Turn stale-reference errors into `Ok(None)`.
///
/// The presentation layer re-derives its next action from fresh state, so a
/// stale id is safe to drop. Every other error is passed through.
pub trait StaleExt<T> {
    fn ignore_stale(self) -> Result<Option<T>>;
}

impl<T> StaleExt<T> for Result<T> {
    fn ignore_stale(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_stale() => {
                tracing::debug!(%error, "ignoring stale reference");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// Reject titles that are empty after trimming; returns the trimmed title.
pub(crate) fn require_title(item_type: &str, title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::empty_title(item_type));
    }
    Ok(trimmed.to_string())
}

/// A blank description is stored as no description
pub(crate) fn non_blank(description: Option<&str>) -> Option<String> {
    description
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");

        let err = BoardError::PermissionDenied {
            role: Role::Viewer,
            action: Action::MoveTask,
        };
        assert_eq!(err.to_string(), "role 'viewer' is not allowed to move_task");
    }

    #[test]
    fn test_is_stale() {
        assert!(BoardError::TaskNotFound { id: "x".into() }.is_stale());
        assert!(BoardError::IndexOutOfRange { index: 9, len: 3 }.is_stale());
        assert!(!BoardError::LastColumn { id: "x".into() }.is_stale());
    }

    #[test]
    fn test_ignore_stale() {
        let stale: Result<u32> = Err(BoardError::ColumnNotFound { id: "gone".into() });
        assert!(stale.ignore_stale().unwrap().is_none());

        let ok: Result<u32> = Ok(3);
        assert_eq!(ok.ignore_stale().unwrap(), Some(3));

        let hard: Result<u32> = Err(BoardError::empty_title("task"));
        assert!(hard.ignore_stale().is_err());
    }

    #[test]
    fn test_require_title() {
        assert_eq!(require_title("task", "  Fix bug ").unwrap(), "Fix bug");
        assert!(matches!(
            require_title("column", "   "),
            Err(BoardError::EmptyTitle { .. })
        ));
    }
}
