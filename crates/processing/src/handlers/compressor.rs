use shapes::ShapeItem;

use super::{any_slot, ProcessContext};
use crate::processor::ProcessorOutput;

pub fn process_compressor(
    inputs: &[Option<ShapeItem>],
    ctx: &mut ProcessContext,
) -> Vec<ProcessorOutput> {
    let Some(Some(input)) = inputs.first() else {
        return Vec::new();
    };
    let compressed = ctx.cache.compress(input.definition());
    vec![any_slot(ShapeItem::from_definition(compressed))]
}
