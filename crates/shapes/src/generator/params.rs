//! Data-driven tunables for freeplay goal generation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Layer and palette parameters
// ---------------------------------------------------------------------------

/// How many layers a goal gets and which sub-shape kinds it may use.
#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct LayerParams {
    /// Levels per additional layer before clamping.
    pub levels_per_layer: u32,
    pub min_layers: u32,
    pub max_layers: u32,
    /// Rotation-only compound kinds join the palette from this level on.
    pub advanced_compound_min_level: u32,
    /// Roll below which rotation-only kinds join the palette, which also
    /// restricts symmetry to rotations.
    pub rotation_only_chance: f32,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            levels_per_layer: 25,
            min_layers: 2,
            max_layers: 4,
            advanced_compound_min_level: 75,
            rotation_only_chance: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Symmetry and link parameters
// ---------------------------------------------------------------------------

/// Relative weights of the symmetry patterns and the link roll.
#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct SymmetryParams {
    pub radial_weight: f32,
    pub full_weight: f32,
    /// Weight of each reflection pattern, when reflections are allowed.
    pub reflection_weight: f32,
    /// A group is fused when its roll lands above this.
    pub link_threshold: f32,
}

impl Default for SymmetryParams {
    fn default() -> Self {
        Self {
            radial_weight: 1.0,
            full_weight: 1.0,
            reflection_weight: 1.0,
            link_threshold: 0.75,
        }
    }
}

// ---------------------------------------------------------------------------
// Color parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct ColorParams {
    /// Uncolored joins the color wheel above this level.
    pub uncolored_min_level: u32,
    /// A layer may be painted in one color when its roll lands above this.
    pub uniform_threshold: f32,
    /// Levels at or above this lower `uniform_threshold` by `uniform_bonus`.
    pub uniform_bonus_min_level: u32,
    pub uniform_bonus: f32,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            uncolored_min_level: 50,
            uniform_threshold: 0.8,
            uniform_bonus_min_level: 500,
            uniform_bonus: 0.15,
        }
    }
}

// ---------------------------------------------------------------------------
// Hole parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct HoleParams {
    /// One quadrant per layer may go missing above this level.
    pub first_hole_min_level: u32,
    pub first_hole_threshold: f32,
    /// A second quadrant may go missing above this level, in one layer at most.
    pub second_hole_min_level: u32,
    pub second_hole_threshold: f32,
}

impl Default for HoleParams {
    fn default() -> Self {
        Self {
            first_hole_min_level: 100,
            first_hole_threshold: 0.8,
            second_hole_min_level: 150,
            second_hole_threshold: 0.9,
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratorParams resource
// ---------------------------------------------------------------------------

/// Central resource holding all generator tunables.
#[derive(
    Resource, Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode, Default,
)]
pub struct GeneratorParams {
    pub layers: LayerParams,
    pub symmetry: SymmetryParams,
    pub colors: ColorParams,
    pub holes: HoleParams,
}

impl GeneratorParams {
    /// Upper bound on layers for `level`.
    pub fn max_layers_for(&self, level: u32) -> usize {
        let step = self.layers.levels_per_layer.max(1);
        let min = self.layers.min_layers.max(1);
        let max = self.layers.max_layers.max(min);
        (level / step).clamp(min, max) as usize
    }

    /// Threshold a layer's color roll must beat to allow a single color.
    pub fn uniform_color_threshold(&self, level: u32) -> f32 {
        if level >= self.colors.uniform_bonus_min_level {
            self.colors.uniform_threshold - self.colors.uniform_bonus
        } else {
            self.colors.uniform_threshold
        }
    }
}
