// ---------------------------------------------------------------------------
// ShapeError: failures surfaced by the codec and the sub-shape registry
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors produced while decoding short keys or registering sub-shape kinds.
///
/// Incompatible combine operands are not an error; processors check
/// `operations::links_compatible` and retry next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Malformed short key text.
    InvalidFormat { key: String, reason: String },
    /// A registered short code must be exactly one printable ASCII character
    /// that is not reserved by the key format.
    InvalidShortCode(String),
    /// Another kind already owns this short code.
    DuplicateShortCode(char),
    /// Another kind already owns this id.
    DuplicateId(String),
    /// No kind with this id has been registered.
    UnknownSubShape(String),
}

impl ShapeError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ShapeError::InvalidFormat {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::InvalidFormat { key, reason } => {
                write!(f, "Invalid shape key '{key}': {reason}")
            }
            ShapeError::InvalidShortCode(code) => write!(f, "Bad short code: '{code}'"),
            ShapeError::DuplicateShortCode(code) => {
                write!(f, "Short code '{code}' is already registered")
            }
            ShapeError::DuplicateId(id) => write!(f, "Sub-shape id '{id}' is already registered"),
            ShapeError::UnknownSubShape(id) => write!(f, "Unknown sub-shape: {id}"),
        }
    }
}

impl std::error::Error for ShapeError {}
