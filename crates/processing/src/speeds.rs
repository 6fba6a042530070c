//! Processor throughput.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::processor::ProcessorKind;

/// Fixed simulation ticks per second. `run_item_processors` runs once per tick.
pub const TICKS_PER_SECOND: f32 = 10.0;

/// Throughput of every processor kind, derived from the belt speed and the
/// processor upgrade level.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorSpeeds {
    /// Items per second carried by a base belt.
    pub belt_items_per_second: f32,
    /// Multiplier from the processor upgrade tier.
    pub processor_upgrade: f32,
}

impl Default for ProcessorSpeeds {
    fn default() -> Self {
        Self {
            belt_items_per_second: 2.0,
            processor_upgrade: 1.0,
        }
    }
}

impl ProcessorSpeeds {
    pub fn items_per_second(&self, kind: ProcessorKind) -> f32 {
        let divisor = match kind {
            ProcessorKind::ShapeCombiner => 6.0,
            ProcessorKind::ShapeCompressor => 10.0,
            ProcessorKind::QuadStacker => 8.0,
            ProcessorKind::LaserCutter => 2.0,
        };
        self.belt_items_per_second / divisor * self.processor_upgrade
    }

    /// Progress gained per tick, as a fraction of one charge.
    pub fn charge_per_tick(&self, kind: ProcessorKind) -> f32 {
        self.items_per_second(kind) / TICKS_PER_SECOND
    }
}
