//! B/W Color for the SSD1680 panel

use embedded_graphics::pixelcolor::{BinaryColor, PixelColor};

/// Only two colors exist on this panel.
///
/// The panel has inverted polarity compared to most SSD1680 boards:
/// a set bit is a black pixel, a `0x00` byte is eight white pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Foreground
    Black,
    /// Background
    #[default]
    White,
}

impl Color {
    /// Byte value of eight pixels of this color
    pub const fn byte_value(self) -> u8 {
        match self {
            Color::Black => 0xFF,
            Color::White => 0x00,
        }
    }

    /// Parse a frame buffer bit
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The contrasting color
    pub const fn inverse(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl PixelColor for Color {
    type Raw = ();
}

impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}
