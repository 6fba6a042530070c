//! Structured shape representation.

use std::fmt;
use std::sync::OnceLock;

use crate::codec;
use crate::colors::Color;
use crate::config::{quadrant_after, quadrant_before, MAX_LAYERS, QUADRANTS};
use crate::sub_shape::SubShape;

/// One filled quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeLayerItem {
    pub sub_shape: SubShape,
    pub color: Color,
    /// Outline fuses with the previous quadrant (going around the layer).
    pub linked_before: bool,
    /// Outline fuses with the next quadrant.
    pub linked_after: bool,
}

impl ShapeLayerItem {
    pub fn new(sub_shape: SubShape, color: Color) -> Self {
        Self {
            sub_shape,
            color,
            linked_before: false,
            linked_after: false,
        }
    }
}

/// Four quadrants: top-right, bottom-right, bottom-left, top-left.
pub type ShapeLayer = [Option<ShapeLayerItem>; QUADRANTS];

pub const EMPTY_LAYER: ShapeLayer = [None; QUADRANTS];

pub fn is_layer_empty(layer: &ShapeLayer) -> bool {
    layer.iter().all(Option::is_none)
}

/// Clear link flags that point at an empty neighbor.
pub fn clear_dangling_links(layer: &mut ShapeLayer) {
    for index in 0..QUADRANTS {
        let has_before = layer[quadrant_before(index)].is_some();
        let has_after = layer[quadrant_after(index)].is_some();
        if let Some(item) = layer[index].as_mut() {
            item.linked_before &= has_before;
            item.linked_after &= has_after;
        }
    }
}

/// Make link flags symmetric between neighbors, drop links to empty
/// quadrants, and close a layer with three or more links into a full ring.
///
/// The short key cannot express a layer fused three times without wrapping
/// around, so anything built outside the decoder goes through this before
/// its key is read.
pub fn normalize_links(layer: &mut ShapeLayer) {
    for index in 0..QUADRANTS {
        let before = quadrant_before(index);
        let fused = match (layer[before], layer[index]) {
            (Some(b), Some(item)) => b.linked_after || item.linked_before,
            _ => false,
        };
        if let Some(item) = layer[index].as_mut() {
            item.linked_before = fused;
        }
        if let Some(b) = layer[before].as_mut() {
            b.linked_after = fused;
        }
    }

    let links = layer
        .iter()
        .flatten()
        .filter(|item| item.linked_before)
        .count();
    if links >= 3 {
        for item in layer.iter_mut().flatten() {
            item.linked_before = true;
            item.linked_after = true;
        }
    }
}

/// A layered shape, innermost layer first.
///
/// The canonical short key is computed lazily and cached. Mutating layers
/// through [`ShapeDefinition::layers_mut`] does not refresh it; callers that
/// mutate a definition after its hash was read must call
/// [`ShapeDefinition::invalidate_hash`]. Definitions published through the
/// operation cache are shared and must not be mutated at all.
#[derive(Clone, Default)]
pub struct ShapeDefinition {
    layers: Vec<ShapeLayer>,
    cached_hash: OnceLock<String>,
}

impl ShapeDefinition {
    /// Build a definition from layers. Layers beyond [`MAX_LAYERS`] are dropped.
    pub fn new(mut layers: Vec<ShapeLayer>) -> Self {
        debug_assert!(
            layers.len() <= MAX_LAYERS,
            "shape has {} layers, max is {}",
            layers.len(),
            MAX_LAYERS
        );
        layers.truncate(MAX_LAYERS);
        Self {
            layers,
            cached_hash: OnceLock::new(),
        }
    }

    pub fn layers(&self) -> &[ShapeLayer] {
        &self.layers
    }

    /// Mutable access for definitions still under construction.
    pub fn layers_mut(&mut self) -> &mut Vec<ShapeLayer> {
        &mut self.layers
    }

    pub fn into_layers(self) -> Vec<ShapeLayer> {
        self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Canonical short key identifying this shape's structure and colors.
    pub fn hash(&self) -> &str {
        self.cached_hash.get_or_init(|| codec::encode(self))
    }

    /// Whether the canonical key has been computed and cached.
    pub fn has_cached_hash(&self) -> bool {
        self.cached_hash.get().is_some()
    }

    /// Drop the cached key so the next [`ShapeDefinition::hash`] recomputes it.
    pub fn invalidate_hash(&mut self) {
        self.cached_hash = OnceLock::new();
    }

    /// True when no layer holds any quadrant. Stops at the first filled quadrant.
    pub fn is_entirely_empty(&self) -> bool {
        !self
            .layers
            .iter()
            .any(|layer| layer.iter().any(Option::is_some))
    }

    /// Number of filled quadrants across all layers.
    pub fn filled_quadrants(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.iter().filter(|q| q.is_some()).count())
            .sum()
    }

    pub fn quadrant(&self, layer: usize, quadrant: usize) -> Option<&ShapeLayerItem> {
        self.layers.get(layer)?.get(quadrant)?.as_ref()
    }

    /// Recolor quadrant items in place. Invalidates the cached key, since a
    /// color-only change keeps the structure but changes the identity.
    pub fn recolor(&mut self, mut color_for: impl FnMut(usize, usize) -> Option<Color>) {
        for (layer_index, layer) in self.layers.iter_mut().enumerate() {
            for (quadrant, item) in layer.iter_mut().enumerate() {
                if let (Some(item), Some(color)) = (item.as_mut(), color_for(layer_index, quadrant))
                {
                    item.color = color;
                }
            }
        }
        self.invalidate_hash();
    }
}

impl PartialEq for ShapeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl Eq for ShapeDefinition {}

impl fmt::Debug for ShapeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeDefinition").field(&self.hash()).finish()
    }
}

impl fmt::Display for ShapeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hash())
    }
}
