//! CreateWorkspace and JoinWorkspace commands

use super::directory::{WorkspaceDirectory, WorkspaceEntry};
use crate::error::{require_title, BoardError, Result};
use crate::processor::logged;
use crate::types::{Role, Workspace, WorkspaceMember};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Create a workspace; the creator becomes its owner
#[operation(
    verb = "create",
    noun = "workspace",
    description = "Create a workspace with the creator as owner"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateWorkspace {
    pub name: String,
    pub creator: WorkspaceMember,
    /// Column layout; defaults to the configured preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Join code; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CreateWorkspace {
    pub fn new(name: impl Into<String>, creator: WorkspaceMember) -> Self {
        Self {
            name: name.into(),
            creator,
            preset: None,
            code: None,
        }
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn apply(&self, dir: &mut WorkspaceDirectory) -> Result<Workspace> {
        let name = require_title("workspace", &self.name)?;
        let code = match &self.code {
            Some(code) => {
                let code = code.trim().to_ascii_uppercase();
                if code.is_empty() {
                    return Err(BoardError::invalid_value("code", "join code must not be empty"));
                }
                if dir.find_by_code(&code).is_ok() || dir.archived().any(|w| w.code == code) {
                    return Err(BoardError::duplicate_id("workspace code", code));
                }
                code
            }
            None => dir.generate_code(),
        };

        let mut workspace = Workspace::new(name, code);
        let mut owner = self.creator.clone();
        owner.role = Role::Owner;
        workspace.members.push(owner);

        let board = dir.new_board(&workspace.id, self.preset.as_deref())?;
        dir.insert(WorkspaceEntry {
            workspace: workspace.clone(),
            board,
        });
        tracing::debug!(id = %workspace.id, code = %workspace.code, "created workspace");
        Ok(workspace)
    }
}

impl Execute<WorkspaceDirectory, BoardError> for CreateWorkspace {
    type Output = Workspace;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<Workspace, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(dir))
    }
}

/// Join an active workspace by its code, as a contributor
///
/// Joining a workspace one already belongs to changes nothing.
#[operation(
    verb = "join",
    noun = "workspace",
    description = "Join a workspace with its join code"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JoinWorkspace {
    pub code: String,
    pub member: WorkspaceMember,
}

impl JoinWorkspace {
    pub fn new(code: impl Into<String>, member: WorkspaceMember) -> Self {
        Self {
            code: code.into(),
            member,
        }
    }

    fn apply(&self, dir: &mut WorkspaceDirectory) -> Result<Workspace> {
        let id = dir.find_by_code(&self.code)?.workspace.id.clone();
        let workspace = &mut dir.find_mut(&id)?.workspace;

        if workspace.find_member(&self.member.id).is_none() {
            let mut member = self.member.clone();
            member.role = Role::Contributor;
            workspace.members.push(member);
        }
        Ok(workspace.clone())
    }
}

impl Execute<WorkspaceDirectory, BoardError> for JoinWorkspace {
    type Output = Workspace;

    fn execute(&self, dir: &mut WorkspaceDirectory) -> ExecutionResult<Workspace, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    fn alice() -> WorkspaceMember {
        WorkspaceMember::new("alice", "Alice", "alice@example.com", Role::Viewer)
    }

    fn bob() -> WorkspaceMember {
        WorkspaceMember::new("bob", "Bob", "bob@example.com", Role::Owner)
    }

    #[test]
    fn test_create_workspace() {
        let mut dir = WorkspaceDirectory::default();
        let ws = CreateWorkspace::new("Engineering", alice())
            .execute(&mut dir)
            .into_result()
            .unwrap();

        assert_eq!(ws.name, "Engineering");
        assert!(ws.code.starts_with("WS-"));
        assert_eq!(ws.code.len(), 7);
        assert_eq!(ws.members.len(), 1);
        assert_eq!(ws.members[0].role, Role::Owner);
        assert_eq!(dir.board(&ws.id).unwrap().columns().len(), 4);
        assert_eq!(dir.board(&ws.id).unwrap().workspace_id(), &ws.id);
    }

    #[test]
    fn test_create_with_preset_and_config_default() {
        let config = BoardConfig {
            default_preset: Some("kanban".into()),
            ..BoardConfig::default()
        };
        let mut dir = WorkspaceDirectory::new(config);

        let ws = CreateWorkspace::new("Default", alice())
            .execute(&mut dir)
            .into_result()
            .unwrap();
        assert_eq!(dir.board(&ws.id).unwrap().columns().len(), 3);

        let ws = CreateWorkspace::new("Explicit", alice())
            .with_preset("sdlc")
            .execute(&mut dir)
            .into_result()
            .unwrap();
        assert_eq!(dir.board(&ws.id).unwrap().columns().len(), 6);
    }

    #[test]
    fn test_create_rejects_duplicate_code() {
        let mut dir = WorkspaceDirectory::default();
        CreateWorkspace::new("One", alice())
            .with_code("ENG-2024")
            .execute(&mut dir)
            .into_result()
            .unwrap();
        let result = CreateWorkspace::new("Two", alice())
            .with_code("eng-2024")
            .execute(&mut dir)
            .into_result();
        assert!(matches!(result, Err(BoardError::DuplicateId { .. })));
    }

    #[test]
    fn test_join_as_contributor() {
        let mut dir = WorkspaceDirectory::default();
        let ws = CreateWorkspace::new("Engineering", alice())
            .with_code("ENG-2024")
            .execute(&mut dir)
            .into_result()
            .unwrap();

        // Claimed role is ignored
        let joined = JoinWorkspace::new("eng-2024", bob())
            .execute(&mut dir)
            .into_result()
            .unwrap();
        assert_eq!(joined.id, ws.id);
        assert_eq!(joined.role_of(&"bob".into()), Role::Contributor);

        // Joining twice is a no-op
        let again = JoinWorkspace::new("ENG-2024", bob())
            .execute(&mut dir)
            .into_result()
            .unwrap();
        assert_eq!(again.member_count(), 2);
    }

    #[test]
    fn test_join_unknown_code() {
        let mut dir = WorkspaceDirectory::default();
        let result = JoinWorkspace::new("NOPE", bob()).execute(&mut dir).into_result();
        assert!(matches!(result, Err(BoardError::WorkspaceNotFound { .. })));
    }
}
