//! Role-based permission gate.
//!
//! A static `Role -> {Action}` table. `has_permission` is a pure membership
//! check; `effective_role` applies a preview ceiling that can only lower the
//! role a user acts with.

use crate::error::{BoardError, Result};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Something a workspace member may be allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateTask,
    EditTask,
    DeleteTask,
    MoveTask,
    ManageColumns,
    ManageMembers,
    ChangeRoles,
    ArchiveWorkspace,
    ApplyPreset,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::CreateTask,
        Action::EditTask,
        Action::DeleteTask,
        Action::MoveTask,
        Action::ManageColumns,
        Action::ManageMembers,
        Action::ChangeRoles,
        Action::ArchiveWorkspace,
        Action::ApplyPreset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTask => "create_task",
            Self::EditTask => "edit_task",
            Self::DeleteTask => "delete_task",
            Self::MoveTask => "move_task",
            Self::ManageColumns => "manage_columns",
            Self::ManageMembers => "manage_members",
            Self::ChangeRoles => "change_roles",
            Self::ArchiveWorkspace => "archive_workspace",
            Self::ApplyPreset => "apply_preset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| BoardError::invalid_value("action", format!("unknown action '{}'", s)))
    }
}

const OWNER: &[Action] = &Action::ALL;

const MANAGER: &[Action] = &[
    Action::CreateTask,
    Action::EditTask,
    Action::DeleteTask,
    Action::MoveTask,
    Action::ManageColumns,
    Action::ManageMembers,
    Action::ApplyPreset,
];

const CONTRIBUTOR: &[Action] = &[Action::CreateTask, Action::EditTask, Action::MoveTask];

const VIEWER: &[Action] = &[];

/// The actions granted to `role`
pub fn permissions_for(role: Role) -> &'static [Action] {
    match role {
        Role::Owner => OWNER,
        Role::Manager => MANAGER,
        Role::Contributor => CONTRIBUTOR,
        Role::Viewer => VIEWER,
    }
}

/// Whether `role` may perform `action`
pub fn has_permission(role: Role, action: Action) -> bool {
    permissions_for(role).contains(&action)
}

/// The role a user acts with while previewing as `ceiling`.
///
/// `min(actual, ceiling)` over the role order: a preview never grants more
/// than the actual role.
pub fn effective_role(actual: Role, ceiling: Option<Role>) -> Role {
    match ceiling {
        Some(ceiling) => actual.min(ceiling),
        None => actual,
    }
}

/// A user's actual role plus an optional preview ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub actual: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Role>,
}

impl RoleView {
    pub fn new(actual: Role) -> Self {
        Self {
            actual,
            preview: None,
        }
    }

    /// Preview the board as `ceiling`
    pub fn previewing(mut self, ceiling: Role) -> Self {
        self.preview = Some(ceiling);
        self
    }

    /// Stop previewing
    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    pub fn effective(&self) -> Role {
        effective_role(self.actual, self.preview)
    }

    pub fn can(&self, action: Action) -> bool {
        has_permission(self.effective(), action)
    }

    /// `Ok(())` if allowed, `PermissionDenied` otherwise
    pub fn require(&self, action: Action) -> Result<()> {
        if self.can(action) {
            Ok(())
        } else {
            Err(BoardError::PermissionDenied {
                role: self.effective(),
                action,
            })
        }
    }
}
