use shapes::ShapeItem;

use super::ProcessContext;
use crate::processor::ProcessorOutput;

/// Cut off the wired corners. The kept part leaves on slot 0 and the removed
/// part on slot 1; empty parts are dropped.
pub fn process_laser_cutter(
    inputs: &[Option<ShapeItem>],
    ctx: &mut ProcessContext,
) -> Vec<ProcessorOutput> {
    let Some(Some(input)) = inputs.first() else {
        return Vec::new();
    };
    let kept = ctx.corners.kept();
    [kept, kept.complement()]
        .into_iter()
        .enumerate()
        .filter_map(|(slot, mask)| {
            let part = ctx.cache.cut(input.definition(), mask);
            (!part.is_entirely_empty()).then(|| ProcessorOutput {
                item: ShapeItem::from_definition(part),
                required_slot: Some(slot),
            })
        })
        .collect()
}
