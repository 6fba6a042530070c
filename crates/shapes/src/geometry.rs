//! Outline metadata for shapes.
//!
//! Nothing here rasterizes. Each sub-shape kind contributes an outline hook
//! that appends path segments for one quadrant drawn in the top-right frame;
//! [`layer_outline`] rotates those into place and groups linked quadrants into
//! shared paths, so a renderer can fill every fused run with a single outline.

use std::f32::consts::PI;

use bevy::math::Vec2;

use crate::colors::Color;
use crate::config::{
    quadrant_after, quadrant_before, BASE_LAYER_SCALE, LAYER_SCALE_STEP, MIN_LAYER_SCALE,
    OUTLINE_WIDTH, QUADRANTS, QUADRANT_SIZE,
};
use crate::definition::{ShapeDefinition, ShapeLayer};
use crate::sub_shape::SubShapeRegistry;

/// One path command, mirroring the usual 2D canvas path API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Tangent arc from the current point through `corner` towards `end`.
    ArcTo {
        corner: Vec2,
        end: Vec2,
        radius: f32,
    },
    /// Circular arc around `center` from `start_angle` to `end_angle` (radians).
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

impl PathSegment {
    /// Rotate the segment around the origin by `angle` radians.
    pub fn rotated(self, angle: f32) -> Self {
        let rot = Vec2::from_angle(angle);
        match self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(rot.rotate(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(rot.rotate(p)),
            PathSegment::ArcTo {
                corner,
                end,
                radius,
            } => PathSegment::ArcTo {
                corner: rot.rotate(corner),
                end: rot.rotate(end),
                radius,
            },
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => PathSegment::Arc {
                center: rot.rotate(center),
                radius,
                start_angle: start_angle + angle,
                end_angle: end_angle + angle,
            },
            PathSegment::Close => PathSegment::Close,
        }
    }
}

/// Collects the segments emitted by an outline hook.
#[derive(Debug, Default, Clone)]
pub struct OutlineBuilder {
    segments: Vec<PathSegment>,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::LineTo(Vec2::new(x, y)));
    }

    pub fn arc_to(&mut self, corner: Vec2, end: Vec2, radius: f32) {
        self.segments.push(PathSegment::ArcTo {
            corner,
            end,
            radius,
        });
    }

    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.segments.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<PathSegment> {
        self.segments
    }
}

// ---------------------------------------------------------------------------
// Built-in outline hooks
// ---------------------------------------------------------------------------

pub fn rect_outline(b: &mut OutlineBuilder, dims: f32) {
    b.line_to(0.0, -dims);
    b.line_to(dims, -dims);
    b.line_to(dims, 0.0);
}

pub fn star_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.4;
    b.line_to(0.0, -dims + inset);
    b.line_to(dims, -dims);
    b.line_to(dims - inset, 0.0);
}

pub fn windmill_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.4;
    b.line_to(0.0, -dims + inset);
    b.line_to(dims, -dims);
    b.line_to(dims, 0.0);
}

pub fn circle_outline(b: &mut OutlineBuilder, dims: f32) {
    b.line_to(0.0, -dims);
    b.arc_to(Vec2::new(dims, -dims), Vec2::new(dims, 0.0), dims);
}

pub fn circle_star_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.1;
    let star_tip = dims * 0.55;
    b.line_to(0.0, -dims);
    b.arc(Vec2::ZERO, dims, -PI * 0.5, -PI * 0.35);
    b.line_to(dims, -dims);
    b.line_to(dims - inset, -dims + star_tip);
    b.arc(Vec2::ZERO, dims, -PI * 0.13, 0.0);
}

pub fn rect_circle_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.3;
    b.line_to(0.0, -dims);
    b.line_to(inset, -dims);
    b.arc(Vec2::new(inset, -inset), dims - inset, -PI * 0.5, 0.0);
    b.line_to(dims, 0.0);
}

pub fn star_rect_outline(b: &mut OutlineBuilder, dims: f32) {
    // Fixed bevel, independent of layer scale.
    let bevel = 0.05;
    b.line_to(0.0, -dims);
    b.line_to(bevel, -dims);
    b.line_to(dims, -bevel);
    b.line_to(dims, 0.0);
}

pub fn circle_windmill_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.5;
    b.line_to(0.0, -inset);
    b.line_to(inset, -dims);
    b.arc_to(Vec2::new(dims, -dims), Vec2::new(dims, -inset), inset);
    b.line_to(dims, 0.0);
}

pub fn rect_windmill_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.2;
    b.line_to(0.0, -dims + inset);
    b.line_to(dims, -dims + inset);
    b.line_to(dims, 0.0);
}

pub fn star_windmill_outline(b: &mut OutlineBuilder, dims: f32) {
    let inset = dims * 0.6;
    b.line_to(0.0, -dims);
    b.line_to(dims, -dims);
    b.line_to(inset, 0.0);
}

// ---------------------------------------------------------------------------
// Layer outlines
// ---------------------------------------------------------------------------

/// A closed outline covering one run of linked quadrants.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePath {
    /// Quadrants covered, in drawing order.
    pub quadrants: Vec<usize>,
    pub fill: Color,
    /// True when the run wraps all the way around the layer.
    pub circular: bool,
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerOutline {
    pub layer_index: usize,
    pub scale: f32,
    pub paths: Vec<OutlinePath>,
}

/// Relative size of layer `layer_index`: outer layers shrink towards the center.
pub fn layer_scale(layer_index: usize) -> f32 {
    (BASE_LAYER_SCALE - layer_index as f32 * LAYER_SCALE_STEP).max(MIN_LAYER_SCALE)
}

/// Rotation of quadrant `quadrant` relative to the top-right frame.
fn quadrant_angle(quadrant: usize) -> f32 {
    quadrant as f32 * PI * 0.5
}

/// Whether quadrant `index` continues its outline into the next quadrant.
fn continues_after(layer: &ShapeLayer, index: usize) -> bool {
    layer[index].is_some_and(|item| item.linked_after) && layer[quadrant_after(index)].is_some()
}

/// Group the filled quadrants of `layer` into runs of linked neighbors.
/// Returns the runs and whether the single run wraps around.
fn linked_runs(layer: &ShapeLayer) -> (Vec<Vec<usize>>, bool) {
    let starts: Vec<usize> = (0..QUADRANTS)
        .filter(|&i| layer[i].is_some() && !continues_after(layer, quadrant_before(i)))
        .collect();

    if starts.is_empty() {
        let filled: Vec<usize> = (0..QUADRANTS).filter(|&i| layer[i].is_some()).collect();
        let circular = !filled.is_empty();
        return (if circular { vec![filled] } else { Vec::new() }, circular);
    }

    let runs = starts
        .into_iter()
        .map(|start| {
            let mut run = vec![start];
            let mut current = start;
            while continues_after(layer, current) && quadrant_after(current) != start {
                current = quadrant_after(current);
                run.push(current);
            }
            run
        })
        .collect();
    (runs, false)
}

/// Outline of a single quadrant, rotated into place.
pub fn quadrant_outline(
    registry: &SubShapeRegistry,
    layer: &ShapeLayer,
    quadrant: usize,
    dims: f32,
) -> Vec<PathSegment> {
    let Some(item) = layer[quadrant] else {
        return Vec::new();
    };
    let mut builder = OutlineBuilder::new();
    registry.draw_outline(item.sub_shape, &mut builder, dims);
    let angle = quadrant_angle(quadrant);
    builder
        .into_segments()
        .into_iter()
        .map(|s| s.rotated(angle))
        .collect()
}

/// Build the outline metadata for one layer.
pub fn layer_outline(
    registry: &SubShapeRegistry,
    layer: &ShapeLayer,
    layer_index: usize,
) -> LayerOutline {
    let scale = layer_scale(layer_index);
    let dims = QUADRANT_SIZE * scale;
    let (runs, circular) = linked_runs(layer);

    let paths = runs
        .into_iter()
        .filter_map(|run| {
            let first = layer[*run.first()?]?;
            let mut segments = Vec::new();
            if !circular {
                segments.push(PathSegment::MoveTo(Vec2::ZERO));
            }
            for &quadrant in &run {
                segments.extend(quadrant_outline(registry, layer, quadrant, dims));
            }
            if circular {
                if let Some(PathSegment::LineTo(p)) = segments.first().copied() {
                    segments[0] = PathSegment::MoveTo(p);
                }
            } else if let Some(&last) = run.last() {
                let back_to_center = Vec2::new(-OUTLINE_WIDTH / 2.0, 0.0);
                segments.push(PathSegment::LineTo(back_to_center).rotated(quadrant_angle(last)));
            }
            segments.push(PathSegment::Close);
            Some(OutlinePath {
                quadrants: run,
                fill: first.color,
                circular,
                segments,
            })
        })
        .collect();

    LayerOutline {
        layer_index,
        scale,
        paths,
    }
}

/// Outline metadata for every layer of `definition`, innermost first.
pub fn shape_outline(registry: &SubShapeRegistry, definition: &ShapeDefinition) -> Vec<LayerOutline> {
    definition
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer)| layer_outline(registry, layer, index))
        .collect()
}
