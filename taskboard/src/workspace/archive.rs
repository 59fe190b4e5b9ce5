//! ArchiveWorkspace and RestoreWorkspace commands

use super::directory::WorkspaceDirectory;
use crate::error::{BoardError, Result};
use crate::permissions::Action;
use crate::processor::logged;
use crate::types::{MemberId, Workspace, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

fn set_archived(
    dir: &mut WorkspaceDirectory,
    id: &WorkspaceId,
    actor: &MemberId,
    archived: bool,
) -> Result<Workspace> {
    dir.require(id, actor, Action::ArchiveWorkspace)?;
    let workspace = &mut dir.find_mut(id)?.workspace;
    workspace.archived = archived;
    Ok(workspace.clone())
}

/// Move a workspace to the archive. Its board is kept.
#[operation(
    verb = "archive",
    noun = "workspace",
    description = "Archive a workspace"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveWorkspace {
    pub id: WorkspaceId,
    pub actor: MemberId,
}

impl ArchiveWorkspace {
    pub fn new(id: impl Into<WorkspaceId>, actor: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            actor: actor.into(),
        }
    }
}

impl Execute<WorkspaceDirectory, BoardError> for ArchiveWorkspace {
    type Output = Workspace;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<Workspace, BoardError> {
        let started = Instant::now();
        logged(self, started, set_archived(dir, &self.id, &self.actor, true))
    }
}

/// Bring an archived workspace back
#[operation(
    verb = "restore",
    noun = "workspace",
    description = "Restore an archived workspace"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestoreWorkspace {
    pub id: WorkspaceId,
    pub actor: MemberId,
}

impl RestoreWorkspace {
    pub fn new(id: impl Into<WorkspaceId>, actor: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            actor: actor.into(),
        }
    }
}

impl Execute<WorkspaceDirectory, BoardError> for RestoreWorkspace {
    type Output = Workspace;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<Workspace, BoardError> {
        let started = Instant::now();
        logged(self, started, set_archived(dir, &self.id, &self.actor, false))
    }
}
