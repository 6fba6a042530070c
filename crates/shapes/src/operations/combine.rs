use crate::config::QUADRANTS;
use crate::definition::{normalize_links, ShapeDefinition, ShapeLayer, ShapeLayerItem, EMPTY_LAYER};
use crate::sub_shape::SubShapeRegistry;

fn combine_items(
    registry: &SubShapeRegistry,
    a: Option<ShapeLayerItem>,
    b: Option<ShapeLayerItem>,
) -> Option<ShapeLayerItem> {
    match (a, b) {
        (Some(a), Some(b)) => Some(ShapeLayerItem {
            sub_shape: registry.combine(a.sub_shape, b.sub_shape),
            color: a.color.mix(b.color),
            linked_before: a.linked_before || b.linked_before,
            linked_after: a.linked_after || b.linked_after,
        }),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Overlay two shapes quadrant by quadrant.
///
/// Where both operands are filled the sub-shapes combine through the
/// registry's combination table and the colors mix; where only one is filled
/// it passes through unchanged. Link flags are OR-ed, then normalized so the
/// result has a canonical key. Layers present in only one operand pass
/// through as they are.
pub fn combine(
    registry: &SubShapeRegistry,
    a: &ShapeDefinition,
    b: &ShapeDefinition,
) -> ShapeDefinition {
    let layer_count = a.layer_count().max(b.layer_count());
    let layers = (0..layer_count)
        .map(|index| match (a.layers().get(index), b.layers().get(index)) {
            (Some(la), Some(lb)) => {
                let mut layer: ShapeLayer = EMPTY_LAYER;
                for (quadrant, slot) in layer.iter_mut().enumerate() {
                    *slot = combine_items(registry, la[quadrant], lb[quadrant]);
                }
                normalize_links(&mut layer);
                layer
            }
            (Some(only), None) | (None, Some(only)) => *only,
            (None, None) => EMPTY_LAYER,
        })
        .collect();
    ShapeDefinition::new(layers)
}

/// Whether two shapes can be combined: at every position filled in both,
/// the link flags must agree exactly. Mismatched adjacency means the outlines
/// do not fit together, and the combiner waits instead of consuming inputs.
pub fn links_compatible(a: &ShapeDefinition, b: &ShapeDefinition) -> bool {
    a.layers().iter().zip(b.layers()).all(|(la, lb)| {
        (0..QUADRANTS).all(|q| match (la[q], lb[q]) {
            (Some(x), Some(y)) => {
                x.linked_before == y.linked_before && x.linked_after == y.linked_after
            }
            _ => true,
        })
    })
}
