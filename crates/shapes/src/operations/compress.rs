use crate::colors::Color;
use crate::config::{quadrant_after, quadrant_before, MAX_LAYERS, QUADRANTS};
use crate::definition::ShapeDefinition;

/// Melt a shape: every filled quadrant loses its color and fuses with each
/// filled neighbor. The footprint is preserved for later stacking.
pub fn compress(definition: &ShapeDefinition) -> ShapeDefinition {
    let layers = definition
        .layers()
        .iter()
        .map(|source| {
            let mut layer = *source;
            for quadrant in 0..QUADRANTS {
                let has_before = source[quadrant_before(quadrant)].is_some();
                let has_after = source[quadrant_after(quadrant)].is_some();
                if let Some(item) = layer[quadrant].as_mut() {
                    item.color = Color::Uncolored;
                    item.linked_before |= has_before;
                    item.linked_after |= has_after;
                }
            }
            layer
        })
        .collect();
    ShapeDefinition::new(layers)
}

/// Paint every filled quadrant of layer `i` with `colors[i]`, leaving layers
/// without a color untouched.
pub fn paint_layers(definition: &ShapeDefinition, colors: [Option<Color>; MAX_LAYERS]) -> ShapeDefinition {
    let mut painted = ShapeDefinition::new(definition.layers().to_vec());
    painted.recolor(|layer, _| colors.get(layer).copied().flatten());
    painted
}
