//! Per-kind processing handlers. Each takes the consumed inputs and returns
//! the outputs to queue; all shape work goes through the session cache.

mod combiner;
mod compressor;
mod cutter;
mod stacker;

use shapes::{OperationCache, ShapeItem, SubShapeRegistry};

use crate::processor::{ProcessorKind, ProcessorOutput, WiredCorners};

pub use combiner::process_combiner;
pub use compressor::process_compressor;
pub use cutter::process_laser_cutter;
pub use stacker::process_quad_stacker;

/// Shared state a handler may use.
pub struct ProcessContext<'a> {
    pub registry: &'a SubShapeRegistry,
    pub cache: &'a mut OperationCache,
    pub corners: WiredCorners,
}

/// Dispatch to the handler for `kind`. Missing required inputs produce no
/// output.
pub fn process(
    kind: ProcessorKind,
    inputs: &[Option<ShapeItem>],
    ctx: &mut ProcessContext,
) -> Vec<ProcessorOutput> {
    match kind {
        ProcessorKind::ShapeCombiner => process_combiner(inputs, ctx),
        ProcessorKind::ShapeCompressor => process_compressor(inputs, ctx),
        ProcessorKind::QuadStacker => process_quad_stacker(inputs, ctx),
        ProcessorKind::LaserCutter => process_laser_cutter(inputs, ctx),
    }
}

/// An output any ejector slot may take.
pub(crate) fn any_slot(item: ShapeItem) -> ProcessorOutput {
    ProcessorOutput {
        item,
        required_slot: None,
    }
}
