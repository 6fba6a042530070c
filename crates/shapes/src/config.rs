/// Maximum number of layers a shape can hold.
pub const MAX_LAYERS: usize = 4;
/// Quadrants per layer: top-right, bottom-right, bottom-left, top-left.
pub const QUADRANTS: usize = 4;
/// Characters per layer in a short key (shape code + color code per quadrant).
pub const LAYER_KEY_LEN: usize = QUADRANTS * 2;
pub const KEY_LAYER_SEPARATOR: char = ':';

/// Shape code of an empty quadrant. Its color code must be the same character.
pub const EMPTY_CODE: u8 = b'-';
/// Link marker. As a color code it marks a quadrant fused with its predecessor;
/// as a shape code it means "same sub-shape as the predecessor".
pub const LINK_CODE: u8 = b'_';

/// Radius of a full-size quadrant in outline units.
pub const QUADRANT_SIZE: f32 = 10.0;
/// Stroke width used when closing an outline back to the center.
pub const OUTLINE_WIDTH: f32 = 0.75;
/// Scale of the innermost layer; every further layer shrinks by `LAYER_SCALE_STEP`.
pub const BASE_LAYER_SCALE: f32 = 0.9;
pub const LAYER_SCALE_STEP: f32 = 0.22;
pub const MIN_LAYER_SCALE: f32 = 0.1;

/// Quadrant index before `index`, wrapping around the layer.
#[inline]
pub fn quadrant_before(index: usize) -> usize {
    (index + QUADRANTS - 1) % QUADRANTS
}

/// Quadrant index after `index`, wrapping around the layer.
#[inline]
pub fn quadrant_after(index: usize) -> usize {
    (index + 1) % QUADRANTS
}
