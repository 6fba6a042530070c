//! Short-key codec.
//!
//! A short key is `layer0:layer1:...`, innermost layer first, each layer
//! exactly eight ASCII characters: a shape code and a color code per quadrant.
//!
//! - `--` is an empty quadrant.
//! - `Xc` is sub-shape `X` in color `c`.
//! - `X_` is sub-shape `X` fused with the previous quadrant, inheriting its color.
//! - `__` is fused with the previous quadrant, inheriting sub-shape and color.
//!
//! A layer with three or more link markers is fused all the way round. The
//! encoder keeps one concrete color in such layers so the key still decodes.
//! This key format is persisted in save games and goal tables, so the
//! encoder must stay byte-compatible.

mod validate;

pub use validate::{is_valid_short_key, ShortKeyCache};

use crate::colors::Color;
use crate::config::{
    quadrant_before, EMPTY_CODE, KEY_LAYER_SEPARATOR, LAYER_KEY_LEN, LINK_CODE, MAX_LAYERS,
    QUADRANTS,
};
use crate::definition::{ShapeDefinition, ShapeLayer, ShapeLayerItem, EMPTY_LAYER};
use crate::error::ShapeError;
use crate::sub_shape::{SubShape, SubShapeRegistry};

/// Link markers at or above this count make a layer fully circular.
const CIRCULAR_LINK_MARKERS: usize = 3;

/// A quadrant as written in the key, before links are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Empty,
    Filled { sub_shape: SubShape, color: Color },
    /// Fused with its predecessor. `None` means the sub-shape is inherited too.
    Linked { sub_shape: Option<SubShape> },
}

/// Split a key into its layer chunks, checking the layer count.
fn split_layers(key: &str) -> Result<Vec<&str>, ShapeError> {
    let chunks: Vec<&str> = key.split(KEY_LAYER_SEPARATOR).collect();
    if chunks.len() > MAX_LAYERS {
        return Err(ShapeError::invalid(
            key,
            format!("{} layers, at most {MAX_LAYERS} allowed", chunks.len()),
        ));
    }
    Ok(chunks)
}

fn tokenize_layer(
    key: &str,
    text: &str,
    registry: &SubShapeRegistry,
) -> Result<[Token; QUADRANTS], ShapeError> {
    let bytes = text.as_bytes();
    if bytes.len() != LAYER_KEY_LEN {
        return Err(ShapeError::invalid(
            key,
            format!("wrong layer length {} in '{text}'", bytes.len()),
        ));
    }

    let mut tokens = [Token::Empty; QUADRANTS];
    for (quadrant, token) in tokens.iter_mut().enumerate() {
        let shape_code = bytes[quadrant * 2];
        let color_code = bytes[quadrant * 2 + 1];

        *token = match (shape_code, color_code) {
            (EMPTY_CODE, EMPTY_CODE) => Token::Empty,
            (EMPTY_CODE, _) => {
                return Err(ShapeError::invalid(key, "shape is empty but color is not"));
            }
            (LINK_CODE, LINK_CODE) => Token::Linked { sub_shape: None },
            (LINK_CODE, _) => {
                return Err(ShapeError::invalid(key, "inherited shape must also inherit color"));
            }
            (code, color) => {
                let sub_shape = registry.from_short_code(code).ok_or_else(|| {
                    ShapeError::invalid(key, format!("unknown shape code '{}'", code as char))
                })?;
                if color == LINK_CODE {
                    Token::Linked {
                        sub_shape: Some(sub_shape),
                    }
                } else {
                    let color = Color::from_short_code(color).ok_or_else(|| {
                        ShapeError::invalid(key, format!("unknown color code '{}'", color as char))
                    })?;
                    Token::Filled { sub_shape, color }
                }
            }
        };
    }
    Ok(tokens)
}

/// Walk backwards from `quadrant` (up to three steps, wrapping) and return the
/// first value `pick` finds. An empty quadrant breaks the chain.
fn inherit<T>(
    tokens: &[Token; QUADRANTS],
    quadrant: usize,
    pick: impl Fn(Token) -> Option<T>,
) -> Option<T> {
    let mut index = quadrant;
    for _ in 1..QUADRANTS {
        index = quadrant_before(index);
        match tokens[index] {
            Token::Empty => return None,
            token => {
                if let Some(value) = pick(token) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Resolve link markers into concrete quadrants with link flags.
fn resolve_layer(key: &str, tokens: &[Token; QUADRANTS]) -> Result<ShapeLayer, ShapeError> {
    let mut layer = EMPTY_LAYER;
    let mut link_markers = 0;

    for quadrant in 0..QUADRANTS {
        layer[quadrant] = match tokens[quadrant] {
            Token::Empty => None,
            Token::Filled { sub_shape, color } => Some(ShapeLayerItem::new(sub_shape, color)),
            Token::Linked { sub_shape } => {
                link_markers += 1;
                if tokens[quadrant_before(quadrant)] == Token::Empty {
                    return Err(ShapeError::invalid(
                        key,
                        format!("quadrant {quadrant} is linked but the quadrant before is empty"),
                    ));
                }
                let sub_shape = match sub_shape {
                    Some(s) => s,
                    None => inherit(tokens, quadrant, |t| match t {
                        Token::Filled { sub_shape, .. } => Some(sub_shape),
                        Token::Linked { sub_shape } => sub_shape,
                        Token::Empty => None,
                    })
                    .ok_or_else(|| {
                        ShapeError::invalid(key, format!("quadrant {quadrant} has no shape to inherit"))
                    })?,
                };
                let color = inherit(tokens, quadrant, |t| match t {
                    Token::Filled { color, .. } => Some(color),
                    _ => None,
                })
                .ok_or_else(|| {
                    ShapeError::invalid(key, format!("quadrant {quadrant} has no color to inherit"))
                })?;
                Some(ShapeLayerItem {
                    linked_before: true,
                    ..ShapeLayerItem::new(sub_shape, color)
                })
            }
        };
    }

    for quadrant in 0..QUADRANTS {
        let linked = layer[quadrant].is_some_and(|item| item.linked_before);
        if linked {
            if let Some(before) = layer[quadrant_before(quadrant)].as_mut() {
                before.linked_after = true;
            }
        }
    }

    if link_markers >= CIRCULAR_LINK_MARKERS {
        for item in layer.iter_mut().flatten() {
            item.linked_before = true;
            item.linked_after = true;
        }
    }

    Ok(layer)
}

/// Decode a short key into a definition.
pub fn decode(key: &str, registry: &SubShapeRegistry) -> Result<ShapeDefinition, ShapeError> {
    let layers = split_layers(key)?
        .into_iter()
        .map(|text| {
            let tokens = tokenize_layer(key, text, registry)?;
            resolve_layer(key, &tokens)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ShapeDefinition::new(layers))
}

fn encode_layer(layer: &ShapeLayer, out: &mut String) {
    let mut text: Vec<u8> = Vec::with_capacity(LAYER_KEY_LEN);

    for quadrant in 0..QUADRANTS {
        let Some(item) = layer[quadrant] else {
            text.extend([EMPTY_CODE, EMPTY_CODE]);
            continue;
        };
        let shape_code = item.sub_shape.short_code();
        let color_code = item.color.short_code();

        let before = layer[quadrant_before(quadrant)];
        let Some(before) = before.filter(|_| item.linked_before) else {
            text.extend([shape_code, color_code]);
            continue;
        };

        text.push(if before.sub_shape == item.sub_shape {
            LINK_CODE
        } else {
            shape_code
        });
        text.push(LINK_CODE);

        if text == [LINK_CODE; LAYER_KEY_LEN] {
            text = vec![shape_code, color_code];
            text.extend([LINK_CODE; LAYER_KEY_LEN - 2]);
        }

        // Every color slot is a link marker: nothing to inherit from. Put this
        // quadrant's color back at the first quadrant that spells its shape.
        let all_colors_linked =
            text.len() == LAYER_KEY_LEN && text.iter().skip(1).step_by(2).all(|&c| c == LINK_CODE);
        if all_colors_linked {
            let first_shape = (0..LAYER_KEY_LEN)
                .step_by(2)
                .find(|&i| text[i] != LINK_CODE)
                .unwrap_or(0);
            text[first_shape + 1] = color_code;
        }
    }

    out.extend(text.into_iter().map(char::from));
}

/// Encode a definition into its canonical short key.
pub fn encode(definition: &ShapeDefinition) -> String {
    let layers = definition.layers();
    let mut key = String::with_capacity(layers.len() * (LAYER_KEY_LEN + 1));
    for (index, layer) in layers.iter().enumerate() {
        if index > 0 {
            key.push(KEY_LAYER_SEPARATOR);
        }
        encode_layer(layer, &mut key);
    }
    key
}
