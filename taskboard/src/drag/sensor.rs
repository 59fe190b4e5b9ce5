//! Drag sensors and their activation constraints

use super::geometry::Point;
use crate::config::DragConfig;
use serde::{Deserialize, Serialize};

/// Input device that started a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    Pointer,
    Touch,
    Keyboard,
}

/// When a press turns into a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// Starts on press
    Immediate,
    /// Starts once the pointer travels `distance` px
    Distance(f64),
    /// Starts after holding `delay_ms`; moving more than `tolerance` px
    /// before then aborts
    Delay { delay_ms: u64, tolerance: f64 },
}

/// Result of checking a pending press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationCheck {
    Pending,
    Activate,
    Abort,
}

impl Activation {
    /// Constraint for `sensor`; column drags use their own pointer distance
    pub fn for_sensor(sensor: Sensor, config: &DragConfig, column: bool) -> Self {
        match sensor {
            Sensor::Keyboard => Self::Immediate,
            Sensor::Pointer if column => Self::Distance(config.column_pointer_distance),
            Sensor::Pointer => Self::Distance(config.pointer_distance),
            Sensor::Touch => Self::Delay {
                delay_ms: config.touch_delay_ms,
                tolerance: config.touch_tolerance,
            },
        }
    }

    pub fn check(&self, origin: Point, current: Point, elapsed_ms: u64) -> ActivationCheck {
        let moved = origin.distance_to(current);
        match *self {
            Self::Immediate => ActivationCheck::Activate,
            Self::Distance(distance) if moved >= distance => ActivationCheck::Activate,
            Self::Distance(_) => ActivationCheck::Pending,
            Self::Delay { tolerance, .. } if moved > tolerance => ActivationCheck::Abort,
            Self::Delay { delay_ms, .. } if elapsed_ms >= delay_ms => ActivationCheck::Activate,
            Self::Delay { .. } => ActivationCheck::Pending,
        }
    }
}
