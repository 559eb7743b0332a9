//! The badge as one handle: pins, status LED and display

use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::display::{AdapterError, DisplayAdapter, Panel};
use crate::gpio::{Gpio, GpioError, PinRegistry};
use crate::interrupts::StatusLed;
use crate::page::Canvas;
use crate::pins::Role;
use crate::ssd1680::color::Color;

/// Owns every piece of hardware the firmware touches.
///
/// Built once at startup; all drawing goes through it, nothing else holds the
/// display adapter.
pub struct Badge<G, P> {
    pins: PinRegistry<G>,
    led: StatusLed,
    display: DisplayAdapter<P>,
}

impl<G: Gpio, P: Panel> Badge<G, P> {
    pub fn new(pins: PinRegistry<G>, led: StatusLed, display: DisplayAdapter<P>) -> Self {
        Self { pins, led, display }
    }

    /// Current level of an input role
    pub fn read(&mut self, role: Role) -> Result<bool, GpioError> {
        self.pins.read(role)
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }

    pub fn pins(&self) -> &PinRegistry<G> {
        &self.pins
    }

    /// Read-only access to the display and its frame
    pub fn display(&self) -> &DisplayAdapter<P> {
        &self.display
    }

    pub fn clear_buffer(&mut self) {
        self.display.clear_buffer();
    }

    pub fn commit(&mut self) -> Result<(), AdapterError> {
        self.display.commit()
    }
}

impl<G: Gpio, P: Panel> Canvas for Badge<G, P> {
    fn size(&self) -> Size {
        self.display.size()
    }

    fn line_width(&self, font: &MonoFont<'_>, text: &str) -> u32 {
        self.display.line_width(font, text)
    }

    fn draw_filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), AdapterError> {
        self.display.draw_filled_rectangle(x, y, width, height, color)
    }

    fn draw_text(
        &mut self,
        font: &MonoFont<'_>,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
    ) -> Result<(), AdapterError> {
        self.display.draw_text(font, x, y, text, color)
    }

    fn draw_image(
        &mut self,
        image: &ImageRaw<'_, BinaryColor>,
        x: i32,
        y: i32,
    ) -> Result<(), AdapterError> {
        self.display.draw_image(image, x, y)
    }
}
