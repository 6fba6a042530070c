//! Save data for item processors.
//!
//! Shapes are stored as short keys and decoded again on load, so snapshots
//! stay valid across sessions with different caches.

use std::collections::VecDeque;

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use shapes::{OperationCache, ShapeItem, ShapeKey, SubShapeRegistry};

use crate::processor::{ItemProcessor, ProcessorKind, ProcessorOutput};

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct SavedOutput {
    pub key: ShapeKey,
    pub required_slot: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct ProcessorSnapshot {
    pub kind: ProcessorKind,
    pub inputs: Vec<Option<ShapeKey>>,
    pub outputs: Vec<SavedOutput>,
    pub progress: f32,
}

impl ProcessorSnapshot {
    pub fn capture(processor: &ItemProcessor) -> Self {
        Self {
            kind: processor.kind,
            inputs: processor
                .inputs
                .iter()
                .map(|slot| slot.as_ref().map(ShapeItem::to_key))
                .collect(),
            outputs: processor
                .outputs
                .iter()
                .map(|out| SavedOutput {
                    key: out.item.to_key(),
                    required_slot: out.required_slot.and_then(|s| u8::try_from(s).ok()),
                })
                .collect(),
            progress: processor.progress,
        }
    }

    /// Rebuild the processor. Keys that no longer decode are dropped with a
    /// warning and their slot is left empty.
    pub fn restore(&self, cache: &mut OperationCache, registry: &SubShapeRegistry) -> ItemProcessor {
        let mut processor = ItemProcessor::new(self.kind);
        processor.progress = self.progress.clamp(0.0, 1.0);

        for (slot, key) in self.inputs.iter().enumerate() {
            let Some(key) = key else {
                continue;
            };
            match key.resolve(cache, registry) {
                Ok(item) => {
                    if !processor.accept_item(slot, item) {
                        warn!("ProcessorSnapshot: {:?} has no input slot {}", self.kind, slot);
                    }
                }
                Err(e) => warn!("ProcessorSnapshot: dropping input {}: {}", slot, e),
            }
        }

        processor.outputs = self
            .outputs
            .iter()
            .filter_map(|saved| match saved.key.resolve(cache, registry) {
                Ok(item) => Some(ProcessorOutput {
                    item,
                    required_slot: saved.required_slot.map(usize::from),
                }),
                Err(e) => {
                    warn!("ProcessorSnapshot: dropping output: {}", e);
                    None
                }
            })
            .collect::<VecDeque<_>>();

        processor
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Decode snapshot bytes, warning and returning `None` on corrupt data.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bitcode::decode(bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(
                    "ProcessorSnapshot: failed to decode {} bytes: {}",
                    bytes.len(),
                    e
                );
                None
            }
        }
    }
}
