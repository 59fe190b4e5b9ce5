//! Workspaces: membership, lifecycle, and one board per workspace
//!
//! Workspace commands run against a [`WorkspaceDirectory`]. Their permission
//! depends on the actor's role inside the target workspace, so each command
//! names its actor and checks the role itself.

mod archive;
mod create;
mod directory;
mod member;

pub use archive::{ArchiveWorkspace, RestoreWorkspace};
pub use create::{CreateWorkspace, JoinWorkspace};
pub use directory::{WorkspaceDirectory, WorkspaceEntry};
pub use member::{ChangeMemberRole, InviteMember, RemoveMember};
