//! Membership commands: InviteMember, ChangeMemberRole, RemoveMember
//!
//! The owner role is fixed: it cannot be granted, changed or removed here.

use super::directory::WorkspaceDirectory;
use crate::error::{BoardError, Result};
use crate::permissions::Action;
use crate::processor::logged;
use crate::types::{MemberId, Role, Workspace, WorkspaceId, WorkspaceMember};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

fn owner_role_error(member: &MemberId) -> BoardError {
    BoardError::invalid_value(
        "role",
        format!("the owner role of '{}' cannot be changed", member),
    )
}

/// Add a member to a workspace with a non-owner role
#[operation(
    verb = "invite",
    noun = "member",
    description = "Add a member to a workspace"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InviteMember {
    pub workspace: WorkspaceId,
    pub actor: MemberId,
    pub member: WorkspaceMember,
}

impl InviteMember {
    pub fn new(
        workspace: impl Into<WorkspaceId>,
        actor: impl Into<MemberId>,
        member: WorkspaceMember,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            actor: actor.into(),
            member,
        }
    }

    fn apply(&self, dir: &mut WorkspaceDirectory) -> Result<Workspace> {
        dir.require(&self.workspace, &self.actor, Action::ManageMembers)?;
        if self.member.role == Role::Owner {
            return Err(owner_role_error(&self.member.id));
        }

        let workspace = &mut dir.find_mut(&self.workspace)?.workspace;
        if workspace.find_member(&self.member.id).is_some() {
            return Err(BoardError::duplicate_id("member", self.member.id.to_string()));
        }
        workspace.members.push(self.member.clone());
        Ok(workspace.clone())
    }
}

impl Execute<WorkspaceDirectory, BoardError> for InviteMember {
    type Output = Workspace;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<Workspace, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(dir))
    }
}

/// Change a member's role
#[operation(
    verb = "change",
    noun = "member role",
    description = "Change a workspace member's role"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChangeMemberRole {
    pub workspace: WorkspaceId,
    pub actor: MemberId,
    pub member: MemberId,
    pub role: Role,
}

impl ChangeMemberRole {
    pub fn new(
        workspace: impl Into<WorkspaceId>,
        actor: impl Into<MemberId>,
        member: impl Into<MemberId>,
        role: Role,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            actor: actor.into(),
            member: member.into(),
            role,
        }
    }

    fn apply(&self, dir: &mut WorkspaceDirectory) -> Result<WorkspaceMember> {
        dir.require(&self.workspace, &self.actor, Action::ChangeRoles)?;
        if self.role == Role::Owner {
            return Err(owner_role_error(&self.member));
        }

        let workspace = &mut dir.find_mut(&self.workspace)?.workspace;
        let member = workspace
            .find_member_mut(&self.member)
            .ok_or_else(|| BoardError::MemberNotFound {
                id: self.member.to_string(),
            })?;
        if member.role == Role::Owner {
            return Err(owner_role_error(&self.member));
        }
        member.role = self.role;
        Ok(member.clone())
    }
}

impl Execute<WorkspaceDirectory, BoardError> for ChangeMemberRole {
    type Output = WorkspaceMember;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<WorkspaceMember, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(dir))
    }
}

/// Remove a non-owner member
#[operation(
    verb = "remove",
    noun = "member",
    description = "Remove a member from a workspace"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveMember {
    pub workspace: WorkspaceId,
    pub actor: MemberId,
    pub member: MemberId,
}

impl RemoveMember {
    pub fn new(
        workspace: impl Into<WorkspaceId>,
        actor: impl Into<MemberId>,
        member: impl Into<MemberId>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            actor: actor.into(),
            member: member.into(),
        }
    }

    fn apply(&self, dir: &mut WorkspaceDirectory) -> Result<WorkspaceMember> {
        dir.require(&self.workspace, &self.actor, Action::ManageMembers)?;

        let workspace = &mut dir.find_mut(&self.workspace)?.workspace;
        let position = workspace
            .members
            .iter()
            .position(|m| m.id == self.member)
            .ok_or_else(|| BoardError::MemberNotFound {
                id: self.member.to_string(),
            })?;
        if workspace.members[position].role == Role::Owner {
            return Err(owner_role_error(&self.member));
        }
        Ok(workspace.members.remove(position))
    }
}

impl Execute<WorkspaceDirectory, BoardError> for RemoveMember {
    type Output = WorkspaceMember;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<WorkspaceMember, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(dir))
    }
}
