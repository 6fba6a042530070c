//! Shape colors, their short codes, and the color mixing table.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A quadrant color. `Uncolored` is the neutral state shapes are mined in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode,
)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
    White,
    Uncolored,
}

impl Color {
    /// All colors in short-code table order.
    pub fn all() -> &'static [Color] {
        &[
            Self::Red,
            Self::Green,
            Self::Blue,
            Self::Yellow,
            Self::Purple,
            Self::Cyan,
            Self::White,
            Self::Uncolored,
        ]
    }

    pub fn short_code(self) -> u8 {
        match self {
            Self::Red => b'r',
            Self::Green => b'g',
            Self::Blue => b'b',
            Self::Yellow => b'y',
            Self::Purple => b'p',
            Self::Cyan => b'c',
            Self::White => b'w',
            Self::Uncolored => b'u',
        }
    }

    pub fn from_short_code(code: u8) -> Option<Color> {
        Self::all().iter().copied().find(|c| c.short_code() == code)
    }

    /// Lower-case name, as typed into constant signals.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Uncolored => "uncolored",
        }
    }

    pub fn from_name(name: &str) -> Option<Color> {
        Self::all().iter().copied().find(|c| c.name() == name)
    }

    /// Additive RGB channels. `Uncolored` has none and acts as the identity.
    fn channels(self) -> u8 {
        match self {
            Self::Red => 0b100,
            Self::Green => 0b010,
            Self::Blue => 0b001,
            Self::Yellow => 0b110,
            Self::Purple => 0b101,
            Self::Cyan => 0b011,
            Self::White => 0b111,
            Self::Uncolored => 0,
        }
    }

    fn from_channels(channels: u8) -> Color {
        match channels {
            0b100 => Self::Red,
            0b010 => Self::Green,
            0b001 => Self::Blue,
            0b110 => Self::Yellow,
            0b101 => Self::Purple,
            0b011 => Self::Cyan,
            0b111 => Self::White,
            _ => Self::Uncolored,
        }
    }

    /// Mix two colors. Commutative; mixing with `Uncolored` yields the other
    /// color, mixing with `White` yields white, and everything else mixes
    /// additively (red + green = yellow, yellow + blue = white, ...).
    pub fn mix(self, other: Color) -> Color {
        Self::from_channels(self.channels() | other.channels())
    }

    /// Hex code used by painters and previews.
    pub fn hex_code(self) -> &'static str {
        match self {
            Self::Red => "#ff666a",
            Self::Green => "#78ff66",
            Self::Blue => "#66a7ff",
            Self::Yellow => "#fcf52a",
            Self::Purple => "#dd66ff",
            Self::Cyan => "#00fcff",
            Self::White => "#ffffff",
            Self::Uncolored => "#aaaaaa",
        }
    }
}
