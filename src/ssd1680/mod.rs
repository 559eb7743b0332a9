//! SSD1680 ePaper Display Driver
//!
//! Used for the 2.9" 128x296 black/white panel on the badge board.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but built for my needs.
//!
//! ### Usage
//! This driver does not hide that you're working with one buffer for black/white. To
//! display something you:
//!
//! 1. draw onto a [`graphics::FrameBuffer`], preferably with
//!    [`embedded_graphics`](https://github.com/jamwaffles/embedded-graphics).
//! 1. send the frame with [`driver::Ssd1680`]'s `write_frame`
//! 1. kick off a display update with `refresh`, which waits for BUSY to drop
//!    when blocking.

pub mod color;
pub mod driver;
pub mod graphics;
pub mod interface;

mod cmd;
mod flag;

/// Display height, pixels vertically (gate lines)
pub const HEIGHT: u16 = 296;

/// Display width, pixels horizontally (source lines)
pub const WIDTH: u16 = 128;

/// Size of one full black/white frame in bytes
pub const BUFFER_SIZE: usize = (WIDTH as usize / 8) * HEIGHT as usize;
