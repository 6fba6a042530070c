//! Sub-shape kinds and the registry that owns them.
//!
//! A [`SubShape`] is a lightweight handle identified by its one-byte short
//! code, so encoding a shape never needs the registry. Everything else about
//! a kind (id, category, outline hook, combination results) lives in the
//! [`SubShapeRegistry`] resource, which the codec, the generator and the
//! operations receive by reference. Hosts and mods extend it at startup with
//! [`SubShapeRegistry::register`] and [`SubShapeRegistry::register_compound`].

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

use crate::config::{EMPTY_CODE, KEY_LAYER_SEPARATOR, LINK_CODE};
use crate::error::ShapeError;
use crate::geometry::{self, OutlineBuilder};

/// Handle to a registered sub-shape kind, identified by its short code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubShape(u8);

impl SubShape {
    pub const RECT: SubShape = SubShape(b'R');
    pub const CIRCLE: SubShape = SubShape(b'C');
    pub const STAR: SubShape = SubShape(b'S');
    pub const WINDMILL: SubShape = SubShape(b'W');

    pub const CIRCLE_STAR: SubShape = SubShape(b'1');
    pub const RECT_CIRCLE: SubShape = SubShape(b'2');
    pub const STAR_RECT: SubShape = SubShape(b'3');
    pub const CIRCLE_WINDMILL: SubShape = SubShape(b'4');
    pub const RECT_WINDMILL: SubShape = SubShape(b'5');
    pub const STAR_WINDMILL: SubShape = SubShape(b'6');

    pub fn short_code(self) -> u8 {
        self.0
    }

    pub fn short_code_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Debug for SubShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubShape({})", self.short_code_char())
    }
}

impl fmt::Display for SubShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_code_char())
    }
}

/// Whether a kind can be mined/produced directly or only by combining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubShapeCategory {
    Base,
    /// Produced by combining two different base kinds. Absorbs every further
    /// combination: a compound combined with anything stays itself.
    Compound,
}

/// Outline hook: appends the quadrant outline for a quadrant of radius `dims`,
/// drawn in the top-right quadrant frame starting from the center.
pub type OutlineFn = Box<dyn Fn(&mut OutlineBuilder, f32) + Send + Sync>;

/// Metadata for one registered kind.
pub struct SubShapeKind {
    pub id: String,
    pub sub_shape: SubShape,
    pub category: SubShapeCategory,
    /// Kinds that only look right under rotational symmetry (windmill family).
    /// The generator never pairs them with reflection symmetries.
    pub rotation_only: bool,
    /// Compound kinds: the two base kinds that produce this one.
    pub parents: Option<(SubShape, SubShape)>,
    pub outline: OutlineFn,
}

impl fmt::Debug for SubShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubShapeKind")
            .field("id", &self.id)
            .field("sub_shape", &self.sub_shape)
            .field("category", &self.category)
            .field("rotation_only", &self.rotation_only)
            .field("parents", &self.parents)
            .finish_non_exhaustive()
    }
}

/// Registry of every sub-shape kind known to the session, in registration order.
#[derive(Resource)]
pub struct SubShapeRegistry {
    kinds: Vec<SubShapeKind>,
    by_code: HashMap<u8, usize>,
    by_id: HashMap<String, usize>,
    /// Unordered base pair -> compound kind.
    combinations: HashMap<(SubShape, SubShape), SubShape>,
}

impl Default for SubShapeRegistry {
    /// The four base kinds plus the six compounds produced by the shape combiner.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }
}

impl SubShapeRegistry {
    /// A registry without any kinds, for hosts that supply their own set.
    pub fn empty() -> Self {
        Self {
            kinds: Vec::new(),
            by_code: HashMap::new(),
            by_id: HashMap::new(),
            combinations: HashMap::new(),
        }
    }

    fn register_builtins(&mut self) {
        let base: [(&str, SubShape, bool, fn(&mut OutlineBuilder, f32)); 4] = [
            ("rect", SubShape::RECT, false, geometry::rect_outline),
            ("circle", SubShape::CIRCLE, false, geometry::circle_outline),
            ("star", SubShape::STAR, false, geometry::star_outline),
            ("windmill", SubShape::WINDMILL, true, geometry::windmill_outline),
        ];
        for (id, sub_shape, rotation_only, outline) in base {
            self.insert(SubShapeKind {
                id: id.to_string(),
                sub_shape,
                category: SubShapeCategory::Base,
                rotation_only,
                parents: None,
                outline: Box::new(outline),
            });
        }

        #[allow(clippy::type_complexity)]
        let compounds: [(&str, SubShape, (SubShape, SubShape), fn(&mut OutlineBuilder, f32)); 6] = [
            (
                "circlestar",
                SubShape::CIRCLE_STAR,
                (SubShape::CIRCLE, SubShape::STAR),
                geometry::circle_star_outline,
            ),
            (
                "rectcircle",
                SubShape::RECT_CIRCLE,
                (SubShape::RECT, SubShape::CIRCLE),
                geometry::rect_circle_outline,
            ),
            (
                "starrect",
                SubShape::STAR_RECT,
                (SubShape::STAR, SubShape::RECT),
                geometry::star_rect_outline,
            ),
            (
                "circlewindmill",
                SubShape::CIRCLE_WINDMILL,
                (SubShape::CIRCLE, SubShape::WINDMILL),
                geometry::circle_windmill_outline,
            ),
            (
                "rectwindmill",
                SubShape::RECT_WINDMILL,
                (SubShape::RECT, SubShape::WINDMILL),
                geometry::rect_windmill_outline,
            ),
            (
                "starwindmill",
                SubShape::STAR_WINDMILL,
                (SubShape::STAR, SubShape::WINDMILL),
                geometry::star_windmill_outline,
            ),
        ];
        for (id, sub_shape, parents, outline) in compounds {
            self.insert(SubShapeKind {
                id: id.to_string(),
                sub_shape,
                category: SubShapeCategory::Compound,
                rotation_only: parents.1 == SubShape::WINDMILL,
                parents: Some(parents),
                outline: Box::new(outline),
            });
        }
    }

    fn insert(&mut self, kind: SubShapeKind) {
        let index = self.kinds.len();
        let sub_shape = kind.sub_shape;
        if let Some((a, b)) = kind.parents {
            self.combinations.insert(ordered_pair(a, b), sub_shape);
        }
        self.by_code.insert(sub_shape.short_code(), index);
        self.by_id.insert(kind.id.clone(), index);
        self.kinds.push(kind);
    }

    fn check_new(&self, id: &str, short_code: &str) -> Result<SubShape, ShapeError> {
        let code = match short_code.as_bytes() {
            [c] if c.is_ascii_graphic()
                && *c != EMPTY_CODE
                && *c != LINK_CODE
                && *c != KEY_LAYER_SEPARATOR as u8 =>
            {
                *c
            }
            _ => return Err(ShapeError::InvalidShortCode(short_code.to_string())),
        };
        if self.by_code.contains_key(&code) {
            return Err(ShapeError::DuplicateShortCode(code as char));
        }
        if self.by_id.contains_key(id) {
            return Err(ShapeError::DuplicateId(id.to_string()));
        }
        Ok(SubShape(code))
    }

    /// Register a new base kind with a unique id and a single-character short code.
    pub fn register(
        &mut self,
        id: &str,
        short_code: &str,
        rotation_only: bool,
        outline: OutlineFn,
    ) -> Result<SubShape, ShapeError> {
        let sub_shape = self.check_new(id, short_code).inspect_err(|e| {
            warn!("SubShapeRegistry: rejected kind '{}': {}", id, e);
        })?;
        self.insert(SubShapeKind {
            id: id.to_string(),
            sub_shape,
            category: SubShapeCategory::Base,
            rotation_only,
            parents: None,
            outline,
        });
        info!("SubShapeRegistry: registered sub-shape '{}' ({})", id, sub_shape);
        Ok(sub_shape)
    }

    /// Register a compound kind produced by combining the two given base kinds.
    pub fn register_compound(
        &mut self,
        id: &str,
        short_code: &str,
        parents: (SubShape, SubShape),
        outline: OutlineFn,
    ) -> Result<SubShape, ShapeError> {
        for parent in [parents.0, parents.1] {
            if !self.contains(parent) {
                warn!("SubShapeRegistry: compound '{}' has unknown parent {}", id, parent);
                return Err(ShapeError::UnknownSubShape(parent.to_string()));
            }
        }
        let sub_shape = self.check_new(id, short_code).inspect_err(|e| {
            warn!("SubShapeRegistry: rejected compound '{}': {}", id, e);
        })?;
        let rotation_only = self.is_rotation_only(parents.0) || self.is_rotation_only(parents.1);
        self.insert(SubShapeKind {
            id: id.to_string(),
            sub_shape,
            category: SubShapeCategory::Compound,
            rotation_only,
            parents: Some(parents),
            outline,
        });
        info!(
            "SubShapeRegistry: registered compound '{}' ({}) = {} + {}",
            id, sub_shape, parents.0, parents.1
        );
        Ok(sub_shape)
    }

    pub fn from_short_code(&self, code: u8) -> Option<SubShape> {
        self.by_code.get(&code).map(|&i| self.kinds[i].sub_shape)
    }

    pub fn from_id(&self, id: &str) -> Result<SubShape, ShapeError> {
        self.by_id
            .get(id)
            .map(|&i| self.kinds[i].sub_shape)
            .ok_or_else(|| ShapeError::UnknownSubShape(id.to_string()))
    }

    pub fn contains(&self, sub_shape: SubShape) -> bool {
        self.by_code.contains_key(&sub_shape.short_code())
    }

    pub fn kind(&self, sub_shape: SubShape) -> Option<&SubShapeKind> {
        self.by_code.get(&sub_shape.short_code()).map(|&i| &self.kinds[i])
    }

    /// All kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &SubShapeKind> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn is_compound(&self, sub_shape: SubShape) -> bool {
        self.kind(sub_shape)
            .is_some_and(|k| k.category == SubShapeCategory::Compound)
    }

    pub fn is_rotation_only(&self, sub_shape: SubShape) -> bool {
        self.kind(sub_shape).is_some_and(|k| k.rotation_only)
    }

    /// Sub-shape produced when a quadrant of `a` is combined with a quadrant of `b`.
    ///
    /// Identical kinds stay themselves; a compound absorbs whatever it meets
    /// (the first operand wins when both are compounds); two different base
    /// kinds yield their registered compound, or `a` if none is registered.
    pub fn combine(&self, a: SubShape, b: SubShape) -> SubShape {
        if a == b || self.is_compound(a) {
            return a;
        }
        if self.is_compound(b) {
            return b;
        }
        self.combinations
            .get(&ordered_pair(a, b))
            .copied()
            .unwrap_or(a)
    }

    /// Append the outline of `sub_shape` to `builder`. Unknown kinds draw nothing.
    pub fn draw_outline(&self, sub_shape: SubShape, builder: &mut OutlineBuilder, dims: f32) {
        if let Some(kind) = self.kind(sub_shape) {
            (kind.outline)(builder, dims);
        }
    }
}

fn ordered_pair(a: SubShape, b: SubShape) -> (SubShape, SubShape) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_outline() -> OutlineFn {
        Box::new(|builder: &mut OutlineBuilder, dims: f32| {
            builder.line_to(0.0, -dims);
            builder.line_to(dims, 0.0);
        })
    }

    #[test]
    fn test_default_registry_has_builtins() {
        let registry = SubShapeRegistry::default();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.from_short_code(b'C'), Some(SubShape::CIRCLE));
        assert_eq!(registry.from_short_code(b'6'), Some(SubShape::STAR_WINDMILL));
        assert_eq!(registry.from_short_code(b'X'), None);
        assert_eq!(registry.from_id("rectcircle"), Ok(SubShape::RECT_CIRCLE));
        assert!(registry.is_compound(SubShape::CIRCLE_STAR));
        assert!(!registry.is_compound(SubShape::CIRCLE));
    }

    #[test]
    fn test_windmill_family_is_rotation_only() {
        let registry = SubShapeRegistry::default();
        assert!(registry.is_rotation_only(SubShape::WINDMILL));
        assert!(registry.is_rotation_only(SubShape::CIRCLE_WINDMILL));
        assert!(registry.is_rotation_only(SubShape::STAR_WINDMILL));
        assert!(!registry.is_rotation_only(SubShape::STAR_RECT));
    }

    #[test]
    fn test_combine_table() {
        let registry = SubShapeRegistry::default();
        let s = |a, b| registry.combine(a, b);
        assert_eq!(s(SubShape::CIRCLE, SubShape::STAR), SubShape::CIRCLE_STAR);
        assert_eq!(s(SubShape::STAR, SubShape::CIRCLE), SubShape::CIRCLE_STAR);
        assert_eq!(s(SubShape::RECT, SubShape::CIRCLE), SubShape::RECT_CIRCLE);
        assert_eq!(s(SubShape::RECT, SubShape::STAR), SubShape::STAR_RECT);
        assert_eq!(s(SubShape::WINDMILL, SubShape::RECT), SubShape::RECT_WINDMILL);
        assert_eq!(s(SubShape::CIRCLE, SubShape::CIRCLE), SubShape::CIRCLE);
    }

    #[test]
    fn test_compound_absorbs() {
        let registry = SubShapeRegistry::default();
        assert_eq!(
            registry.combine(SubShape::RECT, SubShape::CIRCLE_STAR),
            SubShape::CIRCLE_STAR
        );
        assert_eq!(
            registry.combine(SubShape::CIRCLE_STAR, SubShape::WINDMILL),
            SubShape::CIRCLE_STAR
        );
        assert_eq!(
            registry.combine(SubShape::STAR_RECT, SubShape::RECT_CIRCLE),
            SubShape::STAR_RECT
        );
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = SubShapeRegistry::default();
        let gear = registry
            .register("gear", "G", false, noop_outline())
            .expect("gear registers");
        assert_eq!(gear.short_code(), b'G');
        assert_eq!(registry.from_short_code(b'G'), Some(gear));
        assert!(!registry.is_compound(gear));
        // No compound registered for gear + circle: the first operand wins.
        assert_eq!(registry.combine(gear, SubShape::CIRCLE), gear);

        let cog = registry
            .register_compound("gearcircle", "7", (gear, SubShape::CIRCLE), noop_outline())
            .expect("compound registers");
        assert_eq!(registry.combine(SubShape::CIRCLE, gear), cog);
        assert!(registry.is_compound(cog));
    }

    #[test]
    fn test_register_rejects_bad_codes() {
        let mut registry = SubShapeRegistry::default();
        for bad in ["", "ab", "-", "_", ":", " ", "é"] {
            assert!(
                matches!(
                    registry.register("bad", bad, false, noop_outline()),
                    Err(ShapeError::InvalidShortCode(_))
                ),
                "code {bad:?} should be rejected"
            );
        }
        assert_eq!(
            registry.register("other", "C", false, noop_outline()).err(),
            Some(ShapeError::DuplicateShortCode('C'))
        );
        assert_eq!(
            registry.register("circle", "Z", false, noop_outline()).err(),
            Some(ShapeError::DuplicateId("circle".to_string()))
        );
    }

    #[test]
    fn test_compound_requires_known_parents() {
        let mut registry = SubShapeRegistry::default();
        let result = registry.register_compound(
            "ghost",
            "8",
            (SubShape::CIRCLE, SubShape(b'Q')),
            noop_outline(),
        );
        assert!(matches!(result, Err(ShapeError::UnknownSubShape(_))));
    }

    #[test]
    fn test_compound_inherits_rotation_only() {
        let mut registry = SubShapeRegistry::default();
        let spiral = registry
            .register_compound(
                "spiral",
                "9",
                (SubShape::WINDMILL, SubShape::WINDMILL),
                noop_outline(),
            )
            .expect("registers");
        assert!(registry.is_rotation_only(spiral));
    }
}
