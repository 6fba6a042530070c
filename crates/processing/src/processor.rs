//! Item processors: input slots, charge progress and queued outputs.

use std::collections::VecDeque;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use shapes::operations::links_compatible;
use shapes::{OperationCache, QuadrantSet, ShapeItem, SubShapeRegistry};

use crate::handlers::{self, ProcessContext};
use crate::speeds::ProcessorSpeeds;

// =============================================================================
// ProcessorKind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum ProcessorKind {
    /// Overlays two shapes.
    ShapeCombiner,
    /// Melts a shape into one uncolored blob.
    ShapeCompressor,
    /// Stacks up to three shapes on top of a base shape.
    QuadStacker,
    /// Removes the corners flagged on its wires.
    LaserCutter,
}

impl ProcessorKind {
    pub const ALL: [ProcessorKind; 4] = [
        ProcessorKind::ShapeCombiner,
        ProcessorKind::ShapeCompressor,
        ProcessorKind::QuadStacker,
        ProcessorKind::LaserCutter,
    ];

    pub fn input_slots(self) -> usize {
        match self {
            Self::ShapeCombiner => 2,
            Self::ShapeCompressor | Self::LaserCutter => 1,
            Self::QuadStacker => 4,
        }
    }
}

// =============================================================================
// Components
// =============================================================================

/// An item waiting to leave the processor. `required_slot` pins it to one
/// ejector slot; `None` lets any slot take it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorOutput {
    pub item: ShapeItem,
    pub required_slot: Option<usize>,
}

/// Which corners a laser cutter's wire pins currently flag for removal,
/// in corner order.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WiredCorners(pub [bool; 4]);

impl WiredCorners {
    /// Corners that stay on the primary output.
    pub fn kept(self) -> QuadrantSet {
        QuadrantSet::from_indices((0..4).filter(|&i| !self.0[i]))
    }
}

#[derive(Component, Debug, Clone)]
pub struct ItemProcessor {
    pub kind: ProcessorKind,
    pub(crate) inputs: Vec<Option<ShapeItem>>,
    pub(crate) outputs: VecDeque<ProcessorOutput>,
    /// Charge in `[0, 1]`; a full charge processes one set of inputs.
    pub(crate) progress: f32,
}

impl ItemProcessor {
    pub fn new(kind: ProcessorKind) -> Self {
        Self {
            kind,
            inputs: vec![None; kind.input_slots()],
            outputs: VecDeque::new(),
            progress: 0.0,
        }
    }

    /// Put an item into an input slot. Refuses occupied or unknown slots.
    pub fn accept_item(&mut self, slot: usize, item: ShapeItem) -> bool {
        match self.inputs.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(item);
                true
            }
            _ => false,
        }
    }

    pub fn input(&self, slot: usize) -> Option<&ShapeItem> {
        self.inputs.get(slot)?.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn pending_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Hand the next output to an ejector slot, if it may leave there.
    pub fn take_output(&mut self, slot: usize) -> Option<ShapeItem> {
        let index = self
            .outputs
            .iter()
            .position(|o| o.required_slot.map_or(true, |s| s == slot))?;
        self.outputs.remove(index).map(|o| o.item)
    }

    /// Whether a charge may run now. Undelivered outputs block every kind.
    pub fn can_process(&self) -> bool {
        if !self.outputs.is_empty() {
            return false;
        }
        match self.kind {
            ProcessorKind::ShapeCombiner => match (self.input(0), self.input(1)) {
                (Some(a), Some(b)) => links_compatible(a.definition(), b.definition()),
                _ => false,
            },
            ProcessorKind::ShapeCompressor | ProcessorKind::LaserCutter => self.input(0).is_some(),
            ProcessorKind::QuadStacker => {
                self.input(0).is_some() && (1..4).any(|slot| self.input(slot).is_some())
            }
        }
    }

    /// Add one tick of charge, capped at a full charge.
    pub(crate) fn charge(&mut self, amount: f32) {
        self.progress = (self.progress + amount).min(1.0);
    }

    /// Consume the inputs and queue the results. Call only when
    /// [`ItemProcessor::can_process`] holds and the charge is full.
    pub(crate) fn process(&mut self, ctx: &mut ProcessContext) {
        let inputs: Vec<Option<ShapeItem>> = self.inputs.iter_mut().map(Option::take).collect();
        self.outputs.extend(handlers::process(self.kind, &inputs, ctx));
        self.progress -= 1.0;
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Charge every processor by one tick and run those with a full charge.
pub fn run_item_processors(
    speeds: Res<ProcessorSpeeds>,
    registry: Res<SubShapeRegistry>,
    mut cache: ResMut<OperationCache>,
    mut processors: Query<(Entity, &mut ItemProcessor, Option<&WiredCorners>)>,
) {
    for (entity, mut processor, corners) in &mut processors {
        let kind = processor.kind;
        processor.charge(speeds.charge_per_tick(kind));
        if processor.progress < 1.0 {
            continue;
        }
        if !processor.can_process() {
            debug!("processor {entity:?} ({kind:?}) blocked");
            continue;
        }
        let mut ctx = ProcessContext {
            registry: &registry,
            cache: &mut cache,
            corners: corners.copied().unwrap_or_default(),
        };
        processor.process(&mut ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes::ShapeKey;

    fn item(cache: &mut OperationCache, key: &str) -> ShapeItem {
        ShapeKey(key.to_string())
            .resolve(cache, &SubShapeRegistry::default())
            .expect("valid key")
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<ProcessorSpeeds>()
            .init_resource::<SubShapeRegistry>()
            .init_resource::<OperationCache>()
            .add_systems(Update, run_item_processors);
        app
    }

    fn spawn_with_inputs(app: &mut App, kind: ProcessorKind, keys: &[Option<&str>]) -> Entity {
        let mut processor = ItemProcessor::new(kind);
        processor.progress = 1.0;
        {
            let mut cache = app.world_mut().resource_mut::<OperationCache>();
            for (slot, key) in keys.iter().enumerate() {
                if let Some(key) = key {
                    assert!(processor.accept_item(slot, item(&mut cache, key)));
                }
            }
        }
        app.world_mut().spawn(processor).id()
    }

    fn output_keys(app: &mut App, entity: Entity, slots: usize) -> Vec<(usize, String)> {
        let mut processor = app
            .world_mut()
            .get_mut::<ItemProcessor>(entity)
            .expect("processor exists");
        let mut out = Vec::new();
        for slot in 0..slots {
            while let Some(item) = processor.take_output(slot) {
                out.push((slot, item.key().to_owned()));
            }
        }
        out
    }

    #[test]
    fn test_accept_item_refuses_occupied_slot() {
        let mut cache = OperationCache::default();
        let mut processor = ItemProcessor::new(ProcessorKind::ShapeCombiner);
        assert!(processor.accept_item(0, item(&mut cache, "CuCuCuCu")));
        assert!(!processor.accept_item(0, item(&mut cache, "RuRuRuRu")));
        assert!(!processor.accept_item(2, item(&mut cache, "RuRuRuRu")));
        assert!(processor.accept_item(1, item(&mut cache, "RuRuRuRu")));
    }

    #[test]
    fn test_capabilities() {
        let mut cache = OperationCache::default();

        let mut stacker = ItemProcessor::new(ProcessorKind::QuadStacker);
        stacker.accept_item(0, item(&mut cache, "CuCuCuCu"));
        assert!(!stacker.can_process(), "needs something to stack");
        stacker.accept_item(3, item(&mut cache, "RuRuRuRu"));
        assert!(stacker.can_process());

        let mut combiner = ItemProcessor::new(ProcessorKind::ShapeCombiner);
        combiner.accept_item(0, item(&mut cache, "CuC_----"));
        assert!(!combiner.can_process());
        combiner.accept_item(1, item(&mut cache, "RrRr----"));
        assert!(!combiner.can_process(), "link mismatch blocks");

        let mut cutter = ItemProcessor::new(ProcessorKind::LaserCutter);
        assert!(!cutter.can_process());
        cutter.accept_item(0, item(&mut cache, "CuCuCuCu"));
        assert!(cutter.can_process());
    }

    #[test]
    fn test_combiner_produces_combined_shape() {
        let mut app = test_app();
        let entity = spawn_with_inputs(
            &mut app,
            ProcessorKind::ShapeCombiner,
            &[Some("RuRu----"), Some("----CuCu")],
        );
        app.update();
        assert_eq!(output_keys(&mut app, entity, 1), vec![(0, "RuRuCuCu".to_string())]);
    }

    #[test]
    fn test_incompatible_combiner_keeps_inputs() {
        let mut app = test_app();
        let entity = spawn_with_inputs(
            &mut app,
            ProcessorKind::ShapeCombiner,
            &[Some("CuC_----"), Some("RrRr----")],
        );
        app.update();
        app.update();
        let processor = app.world().get::<ItemProcessor>(entity).expect("exists");
        assert_eq!(processor.pending_outputs(), 0);
        assert_eq!(processor.input(0).map(ShapeItem::key), Some("Cu__----"));
        assert_eq!(processor.input(1).map(ShapeItem::key), Some("RrRr----"));
    }

    #[test]
    fn test_compressor() {
        let mut app = test_app();
        let entity = spawn_with_inputs(&mut app, ProcessorKind::ShapeCompressor, &[Some("CrCgCbCy")]);
        app.update();
        assert_eq!(output_keys(&mut app, entity, 1), vec![(0, "Cu______".to_string())]);
    }

    #[test]
    fn test_quad_stacker_folds_in_slot_order() {
        let mut app = test_app();
        let entity = spawn_with_inputs(
            &mut app,
            ProcessorKind::QuadStacker,
            &[Some("CuCuCuCu"), None, Some("RrRrRrRr"), Some("SbSbSbSb")],
        );
        app.update();
        assert_eq!(
            output_keys(&mut app, entity, 1),
            vec![(0, "CuCuCuCu:RrRrRrRr:SbSbSbSb".to_string())]
        );
    }

    #[test]
    fn test_laser_cutter_splits_by_wired_corners() {
        let mut app = test_app();
        let entity = spawn_with_inputs(&mut app, ProcessorKind::LaserCutter, &[Some("CuCuCuCu")]);
        app.world_mut()
            .entity_mut(entity)
            .insert(WiredCorners([false, false, true, true]));
        app.update();
        assert_eq!(
            output_keys(&mut app, entity, 2),
            vec![(0, "CuCu----".to_string()), (1, "----CuCu".to_string())]
        );
    }

    #[test]
    fn test_laser_cutter_suppresses_empty_half() {
        let mut app = test_app();
        let entity = spawn_with_inputs(&mut app, ProcessorKind::LaserCutter, &[Some("CuCu----")]);
        app.world_mut()
            .entity_mut(entity)
            .insert(WiredCorners([false, false, true, true]));
        app.update();
        assert_eq!(output_keys(&mut app, entity, 2), vec![(0, "CuCu----".to_string())]);
    }

    #[test]
    fn test_pending_output_blocks_processing() {
        let mut app = test_app();
        let entity = spawn_with_inputs(&mut app, ProcessorKind::ShapeCompressor, &[Some("CrCr----")]);
        app.update();
        {
            let next = {
                let mut cache = app.world_mut().resource_mut::<OperationCache>();
                item(&mut cache, "SbSb----")
            };
            let mut processor = app
                .world_mut()
                .get_mut::<ItemProcessor>(entity)
                .expect("exists");
            processor.progress = 1.0;
            assert!(processor.accept_item(0, next));
        }
        app.update();
        let processor = app.world().get::<ItemProcessor>(entity).expect("exists");
        assert_eq!(processor.pending_outputs(), 1);
        assert!(processor.input(0).is_some(), "input kept while blocked");
    }

    #[test]
    fn test_processing_waits_for_full_charge() {
        let mut app = test_app();
        let mut processor = ItemProcessor::new(ProcessorKind::ShapeCompressor);
        {
            let mut cache = app.world_mut().resource_mut::<OperationCache>();
            processor.accept_item(0, item(&mut cache, "CuCuCuCu"));
        }
        let entity = app.world_mut().spawn(processor).id();

        // 0.2 items/s at 10 ticks/s: 50 ticks per charge.
        for _ in 0..49 {
            app.update();
        }
        assert_eq!(app.world().get::<ItemProcessor>(entity).expect("exists").pending_outputs(), 0);
        app.update();
        app.update();
        assert_eq!(app.world().get::<ItemProcessor>(entity).expect("exists").pending_outputs(), 1);
    }
}
