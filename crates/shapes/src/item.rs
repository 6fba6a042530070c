//! Shape items carried through belts and processors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::definition::ShapeDefinition;
use crate::error::ShapeError;
use crate::operation_cache::OperationCache;
use crate::sub_shape::SubShapeRegistry;

/// A shape on the move. Cloning shares the definition.
#[derive(Clone, PartialEq, Eq)]
pub struct ShapeItem(Arc<ShapeDefinition>);

impl ShapeItem {
    pub fn from_definition(definition: Arc<ShapeDefinition>) -> Self {
        Self(definition)
    }

    pub fn definition(&self) -> &Arc<ShapeDefinition> {
        &self.0
    }

    /// Canonical short key of the carried shape.
    pub fn key(&self) -> &str {
        self.0.hash()
    }

    pub fn to_key(&self) -> ShapeKey {
        ShapeKey(self.key().to_owned())
    }
}

impl fmt::Debug for ShapeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeItem").field(&self.key()).finish()
    }
}

/// Items serialize as their short key; read them back as [`ShapeKey`].
impl Serialize for ShapeItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// A short key read from save data or config, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(transparent)]
pub struct ShapeKey(pub String);

impl ShapeKey {
    /// Decode into a shared item through the session cache.
    pub fn resolve(
        &self,
        cache: &mut OperationCache,
        registry: &SubShapeRegistry,
    ) -> Result<ShapeItem, ShapeError> {
        cache
            .shape_from_short_key(&self.0, registry)
            .map(ShapeItem::from_definition)
    }
}
