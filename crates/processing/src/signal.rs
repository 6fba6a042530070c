//! Parsing of free-form constant signal text.

use shapes::{Color, OperationCache, ShapeItem, ShortKeyCache, SubShapeRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalValue {
    Color(Color),
    Boolean(bool),
    Shape(ShapeItem),
}

/// Interpret user-entered signal text. Color names come first, then booleans
/// for buildings with wired pins, then shape keys. Anything else is no signal.
pub fn parse_signal_code(
    code: &str,
    has_wired_pins: bool,
    key_cache: &mut ShortKeyCache,
    cache: &mut OperationCache,
    registry: &SubShapeRegistry,
) -> Option<SignalValue> {
    let code = code.trim();
    let lower = code.to_lowercase();

    if let Some(color) = Color::from_name(&lower) {
        return Some(SignalValue::Color(color));
    }

    if has_wired_pins {
        match lower.as_str() {
            "1" | "true" => return Some(SignalValue::Boolean(true)),
            "0" | "false" => return Some(SignalValue::Boolean(false)),
            _ => {}
        }
    }

    if !key_cache.is_valid_short_key(code, registry) {
        return None;
    }
    cache
        .shape_from_short_key(code, registry)
        .ok()
        .map(|definition| SignalValue::Shape(ShapeItem::from_definition(definition)))
}
