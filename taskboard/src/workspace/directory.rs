//! WorkspaceDirectory - every workspace a user can see, each with its board

use crate::config::BoardConfig;
use crate::context::{BoardContext, Clock};
use crate::error::{BoardError, Result};
use crate::permissions::{Action, RoleView};
use crate::presets::find_preset;
use crate::processor::ActivityLog;
use crate::types::{Column, MemberId, Workspace, WorkspaceId};
use chrono::{DateTime, Utc};
use taskboard_operations::LogEntry;
use ulid::Ulid;

/// A workspace and its board
#[derive(Debug, Clone)]
pub struct WorkspaceEntry {
    pub workspace: Workspace,
    pub board: BoardContext,
}

/// Active and archived workspaces
#[derive(Debug, Clone, Default)]
pub struct WorkspaceDirectory {
    config: BoardConfig,
    entries: Vec<WorkspaceEntry>,
    /// Newest first
    activity: Vec<LogEntry>,
    /// Shared with every board created here
    clock: Clock,
}

impl WorkspaceDirectory {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            activity: Vec::new(),
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Workspaces that are not archived, in creation order
    pub fn active(&self) -> impl Iterator<Item = &Workspace> {
        self.entries
            .iter()
            .map(|e| &e.workspace)
            .filter(|w| !w.archived)
    }

    pub fn archived(&self) -> impl Iterator<Item = &Workspace> {
        self.entries
            .iter()
            .map(|e| &e.workspace)
            .filter(|w| w.archived)
    }

    /// Active workspaces `member` belongs to
    pub fn workspaces_of<'a>(&'a self, member: &'a MemberId) -> impl Iterator<Item = &'a Workspace> {
        self.active().filter(move |w| w.find_member(member).is_some())
    }

    pub fn find(&self, id: &WorkspaceId) -> Result<&WorkspaceEntry> {
        self.entries
            .iter()
            .find(|e| &e.workspace.id == id)
            .ok_or_else(|| BoardError::WorkspaceNotFound { id: id.to_string() })
    }

    pub fn find_mut(&mut self, id: &WorkspaceId) -> Result<&mut WorkspaceEntry> {
        self.entries
            .iter_mut()
            .find(|e| &e.workspace.id == id)
            .ok_or_else(|| BoardError::WorkspaceNotFound { id: id.to_string() })
    }

    /// Look up an active workspace by join code (case-insensitive)
    pub fn find_by_code(&self, code: &str) -> Result<&WorkspaceEntry> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|e| !e.workspace.archived && e.workspace.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| BoardError::WorkspaceNotFound {
                id: code.to_string(),
            })
    }

    /// The board of a workspace
    pub fn board(&self, id: &WorkspaceId) -> Result<&BoardContext> {
        self.find(id).map(|e| &e.board)
    }

    pub fn board_mut(&mut self, id: &WorkspaceId) -> Result<&mut BoardContext> {
        self.find_mut(id).map(|e| &mut e.board)
    }

    /// `actor`'s permissions inside workspace `id`
    pub fn role_view(&self, id: &WorkspaceId, actor: &MemberId) -> Result<RoleView> {
        Ok(RoleView::new(self.find(id)?.workspace.role_of(actor)))
    }

    pub(crate) fn require(&self, id: &WorkspaceId, actor: &MemberId, action: Action) -> Result<()> {
        self.role_view(id, actor)?.require(action)
    }

    /// Directory-level activity, newest first
    pub fn activity(&self) -> &[LogEntry] {
        &self.activity
    }

    pub(crate) fn insert(&mut self, entry: WorkspaceEntry) {
        self.entries.push(entry);
    }

    /// A fresh board for workspace `id`, laid out per `preset` or the
    /// configured default
    pub(crate) fn new_board(&self, id: &WorkspaceId, preset: Option<&str>) -> Result<BoardContext> {
        let columns = match preset.or(self.config.default_preset.as_deref()) {
            Some(preset) => find_preset(preset)?.build_columns(),
            None => Column::default_columns(),
        };
        BoardContext::new(id.clone())
            .with_clock(self.clock.clone())
            .with_activity_limit(self.config.activity_limit)
            .with_columns(columns)
    }

    /// A join code no workspace uses yet, e.g. "WS-7K2Q"
    pub(crate) fn generate_code(&self) -> String {
        loop {
            let ulid = Ulid::new().to_string();
            let code = format!("WS-{}", &ulid[ulid.len() - 4..]);
            if !self
                .entries
                .iter()
                .any(|e| e.workspace.code.eq_ignore_ascii_case(&code))
            {
                return code;
            }
        }
    }
}

impl ActivityLog for WorkspaceDirectory {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn append_activity(&mut self, entry: LogEntry) {
        self.activity.insert(0, entry);
        self.activity.truncate(self.config.activity_limit);
    }
}
