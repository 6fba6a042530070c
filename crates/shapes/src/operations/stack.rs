use crate::config::MAX_LAYERS;
use crate::definition::ShapeDefinition;

/// Put `upper` on top of `lower`: `upper`'s layers follow `lower`'s, and any
/// layer beyond [`MAX_LAYERS`] is dropped.
pub fn stack(lower: &ShapeDefinition, upper: &ShapeDefinition) -> ShapeDefinition {
    let layers = lower
        .layers()
        .iter()
        .chain(upper.layers())
        .take(MAX_LAYERS)
        .copied()
        .collect();
    ShapeDefinition::new(layers)
}
