use shapes::ShapeItem;

use super::{any_slot, ProcessContext};
use crate::processor::ProcessorOutput;

pub fn process_combiner(
    inputs: &[Option<ShapeItem>],
    ctx: &mut ProcessContext,
) -> Vec<ProcessorOutput> {
    let (Some(Some(a)), Some(Some(b))) = (inputs.first(), inputs.get(1)) else {
        return Vec::new();
    };
    let combined = ctx.cache.combine(ctx.registry, a.definition(), b.definition());
    vec![any_slot(ShapeItem::from_definition(combined))]
}
