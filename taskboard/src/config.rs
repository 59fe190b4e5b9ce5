//! Engine configuration loaded with Figment.
//!
//! Precedence, lowest to highest: built-in defaults, an optional YAML file,
//! then `TASKBOARD_*` environment variables (`__` separates nested keys, so
//! `TASKBOARD_DRAG__POINTER_DISTANCE=8` sets `drag.pointer_distance`).

use crate::error::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Activation thresholds for drag sensors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel (px) before a task drag starts
    pub pointer_distance: f64,
    /// Pointer travel (px) before a column drag starts
    pub column_pointer_distance: f64,
    /// Touch hold time (ms) before a drag starts
    pub touch_delay_ms: u64,
    /// Movement (px) tolerated during the touch hold
    pub touch_tolerance: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            pointer_distance: 5.0,
            column_pointer_distance: 4.0,
            touch_delay_ms: 150,
            touch_tolerance: 5.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Preset applied to new workspaces; `None` uses the built-in layout
    pub default_preset: Option<String>,
    /// Maximum activity entries kept per board (newest first)
    pub activity_limit: usize,
    pub drag: DragConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_preset: None,
            activity_limit: 500,
            drag: DragConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Defaults overridden by the environment
    pub fn load() -> Result<Self> {
        Ok(Self::figment(None).extract()?)
    }

    /// Defaults, then `path` (YAML), then the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::figment(Some(path.as_ref())).extract()?)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(BoardConfig::default()));
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading board config");
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
