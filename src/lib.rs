//! Firmware for an e-paper name badge on an ESP32-S3.
//!
//! The board carries a 2.9" SSD1680 panel (128x296, used in landscape), five
//! buttons and a status LED. At startup the badge draws one page with a title
//! bar, then idles while the up/down buttons switch the LED from interrupts.
//!
//! Everything above the [`gpio::Gpio`] and [`display::Panel`] seams builds and
//! runs on the host, the ESP-IDF backends only exist for `target_os = "espidf"`.

pub mod config;
pub mod device;
pub mod display;
pub mod gpio;
pub mod interrupts;
pub mod lifecycle;
pub mod page;
pub mod pins;
pub mod ssd1680;

#[cfg(test)]
mod mock;

pub use crate::device::Badge;
pub use crate::pins::Pins;
pub use crate::ssd1680::color::Color;
pub use crate::ssd1680::driver::Ssd1680;
pub use crate::ssd1680::graphics::{DisplayRotation, FrameBuffer};
