use std::collections::HashMap;

use bevy::prelude::*;

use super::{resolve_layer, split_layers, tokenize_layer};
use crate::sub_shape::SubShapeRegistry;

/// Check whether `key` is a well-formed short key, without building a definition.
pub fn is_valid_short_key(key: &str, registry: &SubShapeRegistry) -> bool {
    let Ok(chunks) = split_layers(key) else {
        return false;
    };
    chunks.into_iter().all(|text| {
        tokenize_layer(key, text, registry)
            .and_then(|tokens| resolve_layer(key, &tokens))
            .is_ok()
    })
}

/// Memoized [`is_valid_short_key`] results.
///
/// Free-form text (constant signal entry, pasted keys) is validated on every
/// keystroke, so each distinct key is only checked once per session. Call
/// [`ShortKeyCache::clear`] after registering new sub-shape kinds.
#[derive(Resource, Default, Debug)]
pub struct ShortKeyCache {
    results: HashMap<String, bool>,
}

impl ShortKeyCache {
    pub fn is_valid_short_key(&mut self, key: &str, registry: &SubShapeRegistry) -> bool {
        if let Some(&valid) = self.results.get(key) {
            return valid;
        }
        let valid = is_valid_short_key(key, registry);
        self.results.insert(key.to_string(), valid);
        valid
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}
