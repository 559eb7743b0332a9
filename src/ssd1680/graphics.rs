//! In-memory frame buffer with rotation support
use crate::ssd1680::color::Color;
use crate::ssd1680::{BUFFER_SIZE, HEIGHT, WIDTH};
use core::convert::Infallible;
use embedded_graphics::prelude::*;

/// Display rotation, only 90° increments supported
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum DisplayRotation {
    /// No rotation, portrait 128x296
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise, landscape 296x128
    Rotate270,
}

/// One black/white frame for the 128x296 panel.
///
/// The buffer is laid out the way the controller RAM expects it: rows of
/// 16 bytes, MSB is the leftmost pixel. Drawing happens in logical
/// (rotated) coordinates; pixels outside the logical area are dropped.
pub struct FrameBuffer {
    buffer: [u8; BUFFER_SIZE],
    rotation: DisplayRotation,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer {
            buffer: [Color::White.byte_value(); BUFFER_SIZE],
            rotation: DisplayRotation::default(),
        }
    }
}

impl FrameBuffer {
    /// White frame, no rotation
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw frame as it is sent to the controller
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Read back a pixel in logical coordinates
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (index, mask) = self.locate(Point::new(x, y))?;
        Some(Color::from_bit(u8::from(self.buffer[index] & mask != 0)))
    }

    /// True when every pixel has the given color
    pub fn is_filled_with(&self, color: Color) -> bool {
        let byte = color.byte_value();
        self.buffer.iter().all(|b| *b == byte)
    }

    fn set_pixel(&mut self, point: Point, color: Color) {
        if let Some((index, mask)) = self.locate(point) {
            match color {
                Color::Black => self.buffer[index] |= mask,
                Color::White => self.buffer[index] &= !mask,
            }
        }
    }

    /// Byte index and bit mask of a logical point, None when out of bounds
    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        let size = self.size();
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= size.width || y >= size.height {
            return None;
        }

        let (width, height) = (u32::from(WIDTH), u32::from(HEIGHT));
        let (px, py) = match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (width - 1 - y, x),
            DisplayRotation::Rotate180 => (width - 1 - x, height - 1 - y),
            DisplayRotation::Rotate270 => (y, height - 1 - x),
        };

        let index = (py * (width / 8) + px / 8) as usize;
        Some((index, 0x80 >> (px % 8)))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => {
                Size::new(u32::from(WIDTH), u32::from(HEIGHT))
            }
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => {
                Size::new(u32::from(HEIGHT), u32::from(WIDTH))
            }
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(color.byte_value());
        Ok(())
    }
}
