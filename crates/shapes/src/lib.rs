use bevy::prelude::*;

pub mod codec;
pub mod colors;
pub mod config;
pub mod definition;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod item;
pub mod operation_cache;
pub mod operations;
pub mod shape_rng;
pub mod sub_shape;

pub use codec::{decode, encode, is_valid_short_key, ShortKeyCache};
pub use colors::Color;
pub use definition::{ShapeDefinition, ShapeLayer, ShapeLayerItem};
pub use error::ShapeError;
pub use generator::{GeneratorParams, ShapeGenerator};
pub use item::{ShapeItem, ShapeKey};
pub use operation_cache::OperationCache;
pub use operations::QuadrantSet;
pub use sub_shape::{SubShape, SubShapeRegistry};

/// Shared shape state for a game session: the sub-shape registry, the
/// operation cache, the short-key validity cache and generator tunables.
pub struct ShapesPlugin;

impl Plugin for ShapesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SubShapeRegistry>()
            .init_resource::<OperationCache>()
            .init_resource::<ShortKeyCache>()
            .init_resource::<GeneratorParams>();
    }
}
