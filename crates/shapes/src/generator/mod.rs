//! Procedural freeplay goal shapes.
//!
//! Generation is a pure function of `(seed, level)`, the registry and the
//! [`GeneratorParams`]. All randomness comes from a [`ShapeRng`] seeded with
//! `"<seed>/<level>"`, so a reloaded save regenerates the same goals.
//!
//! Two structural rules hold for every generated shape: no layer is ever
//! empty, and at most one layer is missing two quadrants.

mod params;
mod symmetry;

pub use params::{ColorParams, GeneratorParams, HoleParams, LayerParams, SymmetryParams};
pub use symmetry::{Symmetry, COLOR_PAIRINGS, COLOR_UNIFORM};

use std::sync::Arc;

use crate::colors::Color;
use crate::config::{quadrant_after, quadrant_before, QUADRANTS};
use crate::definition::{normalize_links, ShapeDefinition, ShapeLayer, ShapeLayerItem, EMPTY_LAYER};
use crate::operation_cache::OperationCache;
use crate::shape_rng::ShapeRng;
use crate::sub_shape::{SubShape, SubShapeCategory, SubShapeRegistry};

/// Base order of the color wheel; red and yellow appear twice.
const COLOR_WHEEL: [Color; 9] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Purple,
    Color::Red,
    Color::Yellow,
    Color::White,
];

pub struct ShapeGenerator<'a> {
    registry: &'a SubShapeRegistry,
    params: &'a GeneratorParams,
}

impl<'a> ShapeGenerator<'a> {
    pub fn new(registry: &'a SubShapeRegistry, params: &'a GeneratorParams) -> Self {
        Self { registry, params }
    }

    /// Generate the goal shape for `level` and publish it through the cache.
    pub fn generate(&self, seed: &str, level: u32, cache: &mut OperationCache) -> Arc<ShapeDefinition> {
        cache.register_or_return_handle(self.generate_definition(seed, level))
    }

    /// Generate the goal shape for `level` without publishing it.
    pub fn generate_definition(&self, seed: &str, level: u32) -> ShapeDefinition {
        let mut rng = ShapeRng::from_seed_str(&format!("{seed}/{level}"));

        let max_layers = self.params.max_layers_for(level);
        let min_layers = max_layers
            .saturating_sub(1)
            .max(self.params.layers.min_layers as usize)
            .min(max_layers);
        let layer_count = rng.next_in_range(min_layers, max_layers);

        let color_groups: Vec<&'static [&'static [usize]]> =
            (0..layer_count).map(|_| self.pick_color_groups(&mut rng, level)).collect();

        let mut wheel = self.color_wheel(level);
        let (palette, rotation_only) = self.palette(&mut rng, level);
        let symmetry = self.pick_symmetry(&mut rng, rotation_only);

        let mut any_missing_two = false;
        let layers = color_groups
            .into_iter()
            .map(|colors| {
                let mut layer = self.build_layer(&mut rng, symmetry, &palette, colors, &mut wheel, level);
                self.punch_holes(&mut rng, &mut layer, level, &mut any_missing_two);
                normalize_links(&mut layer);
                layer
            })
            .collect();

        ShapeDefinition::new(layers)
    }

    fn color_wheel(&self, level: u32) -> Vec<Color> {
        let mut wheel = COLOR_WHEEL.to_vec();
        if level > self.params.colors.uncolored_min_level {
            wheel.push(Color::Uncolored);
        }
        wheel
    }

    fn pick_color_groups(&self, rng: &mut ShapeRng, level: u32) -> &'static [&'static [usize]] {
        let allow_uniform = rng.roll_above(self.params.uniform_color_threshold(level));
        let pairings = COLOR_PAIRINGS.len();
        let choices = if allow_uniform { pairings + 1 } else { pairings };
        let pick = rng.next_in_range(0, choices - 1);
        COLOR_PAIRINGS.get(pick).copied().unwrap_or(COLOR_UNIFORM)
    }

    /// Sub-shape kinds this goal may use, and whether rotation-only kinds
    /// made it in.
    fn palette(&self, rng: &mut ShapeRng, level: u32) -> (Vec<SubShape>, bool) {
        let rotation_only = rng.next_f32() < self.params.layers.rotation_only_chance;
        let advanced = level >= self.params.layers.advanced_compound_min_level;

        let palette: Vec<SubShape> = self
            .registry
            .kinds()
            .filter(|kind| {
                if !kind.rotation_only {
                    return true;
                }
                rotation_only && (kind.category == SubShapeCategory::Base || advanced)
            })
            .map(|kind| kind.sub_shape)
            .collect();

        (palette, rotation_only)
    }

    fn pick_symmetry(&self, rng: &mut ShapeRng, rotation_only: bool) -> Symmetry {
        let weights = &self.params.symmetry;
        let mut candidates = vec![
            (Symmetry::Radial, weights.radial_weight),
            (Symmetry::Full, weights.full_weight),
        ];
        if !rotation_only {
            candidates.extend(
                Symmetry::REFLECTIONS
                    .iter()
                    .map(|&s| (s, weights.reflection_weight)),
            );
        }
        rng.choose_weighted(&candidates)
            .copied()
            .unwrap_or(Symmetry::Radial)
    }

    fn build_layer(
        &self,
        rng: &mut ShapeRng,
        symmetry: Symmetry,
        palette: &[SubShape],
        color_groups: &[&[usize]],
        wheel: &mut Vec<Color>,
        level: u32,
    ) -> ShapeLayer {
        let mut layer = EMPTY_LAYER;
        let mut fused: Vec<&[usize]> = Vec::new();
        let link_threshold = self.params.symmetry.link_threshold;

        for &group in symmetry.groups() {
            let sub_shape = rng.choose(palette).copied().unwrap_or(SubShape::CIRCLE);
            for &quadrant in group {
                layer[quadrant] = Some(ShapeLayerItem::new(sub_shape, Color::Uncolored));
            }
            if rng.roll_above(link_threshold) {
                fused.push(group);
            }
        }

        for group in color_groups {
            if wheel.is_empty() {
                *wheel = self.color_wheel(level);
            }
            let index = rng.next_in_range(0, wheel.len() - 1);
            let color = wheel.remove(index);
            for &quadrant in *group {
                if let Some(item) = layer[quadrant].as_mut() {
                    item.color = color;
                }
            }
        }

        for &group in symmetry.groups() {
            if rng.roll_above(link_threshold) && !fused.contains(&group) {
                fused.push(group);
            }
        }

        for group in fused {
            fuse_group(&mut layer, group);
        }
        layer
    }

    fn punch_holes(&self, rng: &mut ShapeRng, layer: &mut ShapeLayer, level: u32, any_missing_two: &mut bool) {
        let holes = &self.params.holes;

        if level > holes.first_hole_min_level && rng.roll_above(holes.first_hole_threshold) {
            let quadrant = rng.next_in_range(0, QUADRANTS - 1);
            layer[quadrant] = None;
        }

        if level > holes.second_hole_min_level
            && rng.roll_above(holes.second_hole_threshold)
            && !*any_missing_two
        {
            let filled: Vec<usize> = (0..QUADRANTS).filter(|&q| layer[q].is_some()).collect();
            if filled.len() > 2 {
                if let Some(&quadrant) = rng.choose(&filled) {
                    layer[quadrant] = None;
                }
            }
            *any_missing_two = filled_count(layer) <= QUADRANTS - 2;
        }
    }
}

fn filled_count(layer: &ShapeLayer) -> usize {
    layer.iter().filter(|q| q.is_some()).count()
}

/// Link neighboring members of `group` and paint the group in its first
/// member's color, so the fused outline reads as one piece.
fn fuse_group(layer: &mut ShapeLayer, group: &[usize]) {
    let Some(color) = group.first().and_then(|&q| layer[q]).map(|item| item.color) else {
        return;
    };
    for &quadrant in group {
        let before = quadrant_before(quadrant);
        let after = quadrant_after(quadrant);
        let link_before = group.contains(&before) && layer[before].is_some();
        let link_after = group.contains(&after) && layer[after].is_some();
        if let Some(item) = layer[quadrant].as_mut() {
            item.color = color;
            item.linked_before |= link_before;
            item.linked_after |= link_after;
        }
    }
}
