//! Session-wide memoization of shape operations.
//!
//! Every definition handed out by the cache is shared through an `Arc` and
//! must be treated as immutable. Entries are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::codec;
use crate::definition::ShapeDefinition;
use crate::error::ShapeError;
use crate::operations::{self, QuadrantSet};
use crate::sub_shape::SubShapeRegistry;

pub const OP_COMBINE: &str = "combine";
pub const OP_COMPRESS: &str = "compress";
pub const OP_STACK: &str = "stack";
pub const OP_CUT: &str = "cut";

/// Build the cache key for an operation over the given operand hashes.
pub fn operation_key(op: &str, operand_hashes: &[&str]) -> String {
    let mut key = String::from(op);
    for hash in operand_hashes {
        key.push('/');
        key.push_str(hash);
    }
    key
}

#[derive(Resource, Default)]
pub struct OperationCache {
    /// `op/hashA/hashB` to result.
    operations: HashMap<String, Arc<ShapeDefinition>>,
    /// Canonical hash to the one shared instance with that hash.
    handles: HashMap<String, Arc<ShapeDefinition>>,
    /// Raw (possibly non-canonical) short key to its decoded instance.
    short_keys: HashMap<String, Arc<ShapeDefinition>>,
}

impl OperationCache {
    /// Return the cached result of `op` over the operands, computing and
    /// registering it on the first request.
    pub fn get_or_compute(
        &mut self,
        op: &str,
        operand_hashes: &[&str],
        compute: impl FnOnce() -> ShapeDefinition,
    ) -> Arc<ShapeDefinition> {
        let key = operation_key(op, operand_hashes);
        if let Some(existing) = self.operations.get(&key) {
            return Arc::clone(existing);
        }
        debug!("shape operation cache miss: {key}");
        let handle = self.register_or_return_handle(compute());
        self.operations.insert(key, Arc::clone(&handle));
        handle
    }

    /// Publish a definition. If a definition with the same canonical hash was
    /// published before, that instance is returned and `definition` dropped.
    pub fn register_or_return_handle(&mut self, definition: ShapeDefinition) -> Arc<ShapeDefinition> {
        let hash = definition.hash().to_owned();
        Arc::clone(
            self.handles
                .entry(hash)
                .or_insert_with(|| Arc::new(definition)),
        )
    }

    /// Look up a published definition by its canonical hash.
    pub fn handle(&self, hash: &str) -> Option<Arc<ShapeDefinition>> {
        self.handles.get(hash).cloned()
    }

    /// Decode a short key into the shared instance for its shape.
    pub fn shape_from_short_key(
        &mut self,
        key: &str,
        registry: &SubShapeRegistry,
    ) -> Result<Arc<ShapeDefinition>, ShapeError> {
        if let Some(existing) = self.short_keys.get(key) {
            return Ok(Arc::clone(existing));
        }
        let handle = self.register_or_return_handle(codec::decode(key, registry)?);
        self.short_keys.insert(key.to_owned(), Arc::clone(&handle));
        Ok(handle)
    }

    pub fn combine(
        &mut self,
        registry: &SubShapeRegistry,
        a: &ShapeDefinition,
        b: &ShapeDefinition,
    ) -> Arc<ShapeDefinition> {
        self.get_or_compute(OP_COMBINE, &[a.hash(), b.hash()], || {
            operations::combine(registry, a, b)
        })
    }

    pub fn compress(&mut self, a: &ShapeDefinition) -> Arc<ShapeDefinition> {
        self.get_or_compute(OP_COMPRESS, &[a.hash()], || operations::compress(a))
    }

    pub fn stack(&mut self, lower: &ShapeDefinition, upper: &ShapeDefinition) -> Arc<ShapeDefinition> {
        self.get_or_compute(OP_STACK, &[lower.hash(), upper.hash()], || {
            operations::stack(lower, upper)
        })
    }

    /// Cached [`operations::cut_by_quadrants`]. The mask is part of the key.
    pub fn cut(&mut self, a: &ShapeDefinition, keep: QuadrantSet) -> Arc<ShapeDefinition> {
        let mask = keep.label();
        self.get_or_compute(OP_CUT, &[a.hash(), mask.as_str()], || {
            operations::cut_by_quadrants(a, keep)
        })
    }

    /// Number of distinct published shapes.
    pub fn shape_count(&self) -> usize {
        self.handles.len()
    }

    /// Number of memoized operation results.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}
