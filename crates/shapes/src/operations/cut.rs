use crate::config::{quadrant_after, quadrant_before, QUADRANTS};
use crate::definition::{is_layer_empty, ShapeDefinition};

/// A set of quadrant indices, one bit per quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuadrantSet(u8);

impl QuadrantSet {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self((1 << QUADRANTS) - 1);

    /// Build a set from quadrant indices. Out-of-range indices are ignored.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        indices
            .into_iter()
            .filter(|&i| i < QUADRANTS)
            .fold(Self::NONE, |set, i| Self(set.0 | 1 << i))
    }

    pub fn contains(self, quadrant: usize) -> bool {
        quadrant < QUADRANTS && self.0 & (1 << quadrant) != 0
    }

    pub fn complement(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..QUADRANTS).filter(move |&q| self.contains(q))
    }

    /// Stable label used in operation cache keys, e.g. `0101`.
    pub fn label(self) -> String {
        (0..QUADRANTS)
            .map(|q| if self.contains(q) { '1' } else { '0' })
            .collect()
    }
}

/// Keep only the quadrants in `keep`. Links across the cut are cleared and
/// layers left empty are dropped; the result may be entirely empty, which
/// callers check with [`ShapeDefinition::is_entirely_empty`].
pub fn cut_by_quadrants(definition: &ShapeDefinition, keep: QuadrantSet) -> ShapeDefinition {
    let layers = definition
        .layers()
        .iter()
        .filter_map(|source| {
            let mut layer = *source;
            for quadrant in 0..QUADRANTS {
                if keep.contains(quadrant) {
                    continue;
                }
                layer[quadrant] = None;
                if let Some(before) = layer[quadrant_before(quadrant)].as_mut() {
                    before.linked_after = false;
                }
                if let Some(after) = layer[quadrant_after(quadrant)].as_mut() {
                    after.linked_before = false;
                }
            }
            (!is_layer_empty(&layer)).then_some(layer)
        })
        .collect();
    ShapeDefinition::new(layers)
}

/// Both halves of a dual-output cut: the quadrants in `keep`, then the rest.
pub fn cut_pair(
    definition: &ShapeDefinition,
    keep: QuadrantSet,
) -> (ShapeDefinition, ShapeDefinition) {
    (
        cut_by_quadrants(definition, keep),
        cut_by_quadrants(definition, keep.complement()),
    )
}
