use bevy::prelude::*;

pub mod handlers;
pub mod processor;
pub mod signal;
pub mod snapshot;
pub mod speeds;

pub use processor::{run_item_processors, ItemProcessor, ProcessorKind, ProcessorOutput, WiredCorners};
pub use signal::{parse_signal_code, SignalValue};
pub use snapshot::ProcessorSnapshot;
pub use speeds::{ProcessorSpeeds, TICKS_PER_SECOND};

/// Shape processing buildings. Requires `shapes::ShapesPlugin` for the
/// registry and operation cache.
pub struct ProcessingPlugin;

impl Plugin for ProcessingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProcessorSpeeds>()
            .insert_resource(Time::<Fixed>::from_hz(f64::from(TICKS_PER_SECOND)))
            .add_systems(FixedUpdate, run_item_processors);
    }
}
