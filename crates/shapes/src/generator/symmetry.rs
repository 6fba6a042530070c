//! Quadrant groupings used by the generator.

/// Which quadrants of a layer must share one sub-shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Opposite quadrants match.
    Radial,
    /// All four quadrants match.
    Full,
    Horizontal,
    Vertical,
    Diagonal,
    OtherDiagonal,
}

impl Symmetry {
    pub const ROTATIONS: [Symmetry; 2] = [Symmetry::Radial, Symmetry::Full];
    pub const REFLECTIONS: [Symmetry; 4] = [
        Symmetry::Horizontal,
        Symmetry::Vertical,
        Symmetry::Diagonal,
        Symmetry::OtherDiagonal,
    ];

    pub fn groups(self) -> &'static [&'static [usize]] {
        match self {
            Self::Radial => &[&[0, 2], &[1, 3]],
            Self::Full => &[&[0, 1, 2, 3]],
            Self::Horizontal => &[&[0, 3], &[1, 2]],
            Self::Vertical => &[&[0, 1], &[2, 3]],
            Self::Diagonal => &[&[0, 2], &[1], &[3]],
            Self::OtherDiagonal => &[&[1, 3], &[0], &[2]],
        }
    }

    /// Reflections make rotation-only kinds look wrong.
    pub fn is_reflection(self) -> bool {
        Self::REFLECTIONS.contains(&self)
    }
}

/// Ways to split a layer into same-colored pairs.
pub const COLOR_PAIRINGS: [&[&[usize]]; 3] = [
    &[&[0, 1], &[2, 3]],
    &[&[1, 2], &[0, 3]],
    &[&[0, 2], &[1, 3]],
];

/// The whole layer in one color.
pub const COLOR_UNIFORM: &[&[usize]] = &[&[0, 1, 2, 3]];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QUADRANTS;

    fn covers_each_quadrant_once(groups: &[&[usize]]) -> bool {
        let mut seen = [0; QUADRANTS];
        for group in groups {
            for &q in *group {
                seen[q] += 1;
            }
        }
        seen.iter().all(|&n| n == 1)
    }

    #[test]
    fn test_symmetries_partition_the_layer() {
        for symmetry in Symmetry::ROTATIONS.iter().chain(&Symmetry::REFLECTIONS) {
            assert!(covers_each_quadrant_once(symmetry.groups()), "{symmetry:?}");
        }
    }

    #[test]
    fn test_color_pairings_partition_the_layer() {
        for pairing in COLOR_PAIRINGS {
            assert!(covers_each_quadrant_once(pairing));
        }
        assert!(covers_each_quadrant_once(COLOR_UNIFORM));
    }

    #[test]
    fn test_reflection_flag() {
        assert!(!Symmetry::Radial.is_reflection());
        assert!(!Symmetry::Full.is_reflection());
        assert!(Symmetry::Diagonal.is_reflection());
    }
}
