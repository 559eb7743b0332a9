//! Display driver adapter
//!
//! Owns the panel controller together with the in-memory frame. Drawing only
//! touches the frame; [`DisplayAdapter::commit`] is the one call that talks to
//! the panel, and it blocks until the refresh has finished.

use core::convert::Infallible;

use display_interface::DisplayError;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

use crate::page::Canvas;
use crate::ssd1680::color::Color;
use crate::ssd1680::graphics::{DisplayRotation, FrameBuffer};

/// Refresh waveform profiles, slower ones leave less ghosting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshSpeed {
    #[default]
    Default,
    Medium,
    Fast,
    Turbo,
}

/// Panel controller the adapter drives
pub trait Panel {
    /// Reset and initialise the controller
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Copy a full frame into controller RAM
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Start a refresh, optionally waiting for BUSY to drop
    fn refresh(&mut self, speed: RefreshSpeed, blocking: bool) -> Result<(), DisplayError>;
}

/// One-time display settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub rotation: DisplayRotation,
    pub speed: RefreshSpeed,
    pub blocking: bool,
}

/// Whether the frame holds anything besides background
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferState {
    Clean,
    Dirty,
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("display is already configured")]
    AlreadyConfigured,
    #[error("display is not configured")]
    NotConfigured,
    #[error("negative size {width}x{height}")]
    NegativeSize { width: i32, height: i32 },
    #[error("panel communication failed: {0:?}")]
    Panel(DisplayError),
}

impl From<DisplayError> for AdapterError {
    fn from(e: DisplayError) -> Self {
        AdapterError::Panel(e)
    }
}

impl From<Infallible> for AdapterError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

pub struct DisplayAdapter<P> {
    panel: Option<P>,
    config: Option<DisplayConfig>,
    frame: FrameBuffer,
    state: BufferState,
}

impl<P> Default for DisplayAdapter<P> {
    fn default() -> Self {
        Self {
            panel: None,
            config: None,
            frame: FrameBuffer::new(),
            state: BufferState::Clean,
        }
    }
}

impl<P: Panel> DisplayAdapter<P> {
    /// Unconfigured adapter with a white frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a panel bound to its SPI channel and control lines,
    /// apply the settings and initialise the controller.
    ///
    /// Only allowed once. A second call returns
    /// [`AdapterError::AlreadyConfigured`] without touching either panel.
    pub fn configure(&mut self, mut panel: P, config: DisplayConfig) -> Result<(), AdapterError> {
        if self.panel.is_some() {
            return Err(AdapterError::AlreadyConfigured);
        }

        log::info!(
            "Configuring display: {:?}, {:?} refresh, blocking={}",
            config.rotation,
            config.speed,
            config.blocking
        );
        panel.init()?;
        self.frame.set_rotation(config.rotation);
        self.panel = Some(panel);
        self.config = Some(config);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.panel.is_some()
    }

    pub fn buffer_state(&self) -> BufferState {
        self.state
    }

    /// Read-only view of the frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Reset the whole frame to background, the panel is not touched
    pub fn clear_buffer(&mut self) {
        self.frame.clear(Color::White).ok();
        self.state = BufferState::Clean;
    }

    /// Push the frame to the panel and refresh.
    ///
    /// With blocking configured this returns only once BUSY is released.
    /// The buffer state is left as is.
    pub fn commit(&mut self) -> Result<(), AdapterError> {
        let (Some(panel), Some(config)) = (self.panel.as_mut(), self.config.as_ref()) else {
            return Err(AdapterError::NotConfigured);
        };

        log::info!("Committing frame ({:?})", self.state);
        panel.write_frame(self.frame.buffer())?;
        panel.refresh(config.speed, config.blocking)?;
        log::info!("Frame committed");
        Ok(())
    }

    fn text_style<'f>(font: &'f MonoFont<'f>, color: Color) -> MonoTextStyle<'f, Color> {
        MonoTextStyle::new(font, color)
    }
}

impl<P: Panel> Canvas for DisplayAdapter<P> {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn line_width(&self, font: &MonoFont<'_>, text: &str) -> u32 {
        Self::text_style(font, Color::Black)
            .measure_string(text, Point::zero(), Baseline::Alphabetic)
            .bounding_box
            .size
            .width
    }

    fn draw_filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), AdapterError> {
        if width < 0 || height < 0 {
            return Err(AdapterError::NegativeSize { width, height });
        }

        Rectangle::new(Point::new(x, y), Size::new(width as u32, height as u32))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.frame)?;
        self.state = BufferState::Dirty;
        Ok(())
    }

    fn draw_text(
        &mut self,
        font: &MonoFont<'_>,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
    ) -> Result<(), AdapterError> {
        // x, y is the bottom left of the text, not the top left
        Text::with_baseline(
            text,
            Point::new(x, y),
            Self::text_style(font, color),
            Baseline::Alphabetic,
        )
        .draw(&mut self.frame)?;
        self.state = BufferState::Dirty;
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &ImageRaw<'_, BinaryColor>,
        x: i32,
        y: i32,
    ) -> Result<(), AdapterError> {
        Image::new(image, Point::new(x, y)).draw(&mut self.frame.color_converted())?;
        self.state = BufferState::Dirty;
        Ok(())
    }
}
