//! Workspace types: Workspace, WorkspaceMember, Role

use super::ids::{MemberId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership role. Variants are declared in privilege order, so the derived
/// `Ord` gives `Viewer < Contributor < Manager < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Viewer,
    Contributor,
    Manager,
    Owner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Viewer, Role::Contributor, Role::Manager, Role::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Contributor => "contributor",
            Self::Manager => "manager",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "contributor" => Ok(Self::Contributor),
            "manager" => Ok(Self::Manager),
            "owner" => Ok(Self::Owner),
            other => Err(crate::error::BoardError::invalid_value(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A person belonging to a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl WorkspaceMember {
    pub fn new(
        id: impl Into<MemberId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// First letter of the name, uppercased, for avatar badges
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Workspace metadata: a named container with members and a lifecycle flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    /// Join code handed out to invitees
    pub code: String,
    #[serde(default)]
    pub members: Vec<WorkspaceMember>,
    #[serde(default)]
    pub archived: bool,
}

impl Workspace {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: WorkspaceId::new(),
            name: name.into(),
            code: code.into(),
            members: Vec::new(),
            archived: false,
        }
    }

    pub fn find_member(&self, id: &MemberId) -> Option<&WorkspaceMember> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn find_member_mut(&mut self, id: &MemberId) -> Option<&mut WorkspaceMember> {
        self.members.iter_mut().find(|m| &m.id == id)
    }

    /// Role of `id` in this workspace; non-members are viewers.
    pub fn role_of(&self, id: &MemberId) -> Role {
        self.find_member(id).map(|m| m.role).unwrap_or(Role::Viewer)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_total_order() {
        assert!(Role::Viewer < Role::Contributor);
        assert!(Role::Contributor < Role::Manager);
        assert!(Role::Manager < Role::Owner);
        assert_eq!(Role::Owner.min(Role::Contributor), Role::Contributor);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_of_non_member_is_viewer() {
        let mut ws = Workspace::new("Engineering Team", "ENG-2024");
        ws.members.push(WorkspaceMember::new(
            "1",
            "you",
            "demo@taskboard.io",
            Role::Owner,
        ));
        assert_eq!(ws.role_of(&MemberId::from("1")), Role::Owner);
        assert_eq!(ws.role_of(&MemberId::from("99")), Role::Viewer);
        assert_eq!(ws.members[0].initial(), Some('Y'));
    }
}
