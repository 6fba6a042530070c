use shapes::ShapeItem;

use super::{any_slot, ProcessContext};
use crate::processor::ProcessorOutput;

/// Stack slots 1..4 onto the base in slot 0, skipping empty slots.
pub fn process_quad_stacker(
    inputs: &[Option<ShapeItem>],
    ctx: &mut ProcessContext,
) -> Vec<ProcessorOutput> {
    let Some(Some(base)) = inputs.first() else {
        return Vec::new();
    };
    let stacked = inputs
        .iter()
        .skip(1)
        .flatten()
        .fold(base.definition().clone(), |lower, upper| {
            ctx.cache.stack(&lower, upper.definition())
        });
    vec![any_slot(ShapeItem::from_definition(stacked))]
}
