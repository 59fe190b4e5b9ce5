//! ApplyPreset command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::presets::find_preset;
use crate::processor::logged;
use crate::types::{Column, ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Replace the column layout with a preset's
///
/// Tasks are never orphaned. Each old column's tasks go to, in order of
/// preference: the column named in `mapping`, the new column with the same
/// id, or the first new column. Tasks that change column are appended after
/// the tasks already there, keeping their relative order.
#[operation(
    verb = "apply",
    noun = "preset",
    description = "Replace the board's columns with a preset layout",
    permission = "apply_preset"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplyPreset {
    /// Preset id, e.g. "sdlc"
    pub preset: String,
    /// Old column id -> new column id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping: BTreeMap<ColumnId, ColumnId>,
    /// Refuse to apply while the board has any task
    #[serde(default)]
    pub strict: bool,
}

impl ApplyPreset {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            mapping: BTreeMap::new(),
            strict: false,
        }
    }

    /// Send the tasks of `old` to `new`
    pub fn with_mapping(mut self, old: impl Into<ColumnId>, new: impl Into<ColumnId>) -> Self {
        self.mapping.insert(old.into(), new.into());
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<Vec<Column>> {
        let preset = find_preset(&self.preset)?;

        let count = ctx.task_count();
        if self.strict && count > 0 {
            return Err(BoardError::PresetBlocked {
                id: self.preset.clone(),
                count,
            });
        }

        let new_columns = preset.build_columns();
        for (old, new) in &self.mapping {
            ctx.find_column(old)?;
            if !new_columns.iter().any(|c| &c.id == new) {
                return Err(BoardError::ColumnNotFound { id: new.to_string() });
            }
        }
        // build_columns never yields an empty layout
        let fallback = new_columns
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| BoardError::invalid_value("preset", "preset has no columns"))?;

        let target_of = |old: &ColumnId| -> ColumnId {
            if let Some(new) = self.mapping.get(old) {
                new.clone()
            } else if new_columns.iter().any(|c| &c.id == old) {
                old.clone()
            } else {
                fallback.clone()
            }
        };

        // Tasks staying in a same-id column keep the front of the bucket;
        // migrated buckets follow in old board order.
        let old_columns: Vec<ColumnId> = ctx.columns().iter().map(|c| c.id.clone()).collect();
        let mut buckets: HashMap<ColumnId, Vec<TaskId>> = HashMap::new();
        let mut migrated: Vec<TaskId> = Vec::new();
        for old in &old_columns {
            if target_of(old) == *old {
                buckets.entry(old.clone()).or_default().extend(ctx.bucket_ids(old));
            }
        }
        for old in &old_columns {
            let target = target_of(old);
            if target != *old {
                let ids = ctx.bucket_ids(old);
                migrated.extend(ids.iter().cloned());
                buckets.entry(target).or_default().extend(ids);
            }
        }

        for (column, order) in &buckets {
            ctx.assign_bucket(column, order);
        }
        let now = ctx.now();
        for id in &migrated {
            ctx.find_task_mut(id)?.touch(now);
        }
        *ctx.columns_mut() = new_columns;

        tracing::debug!(
            preset = %self.preset,
            migrated = migrated.len(),
            "applied preset"
        );
        Ok(ctx.columns().to_vec())
    }
}

impl Execute<BoardContext, BoardError> for ApplyPreset {
    type Output = Vec<Column>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<Column>, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
