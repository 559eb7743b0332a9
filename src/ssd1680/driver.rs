//! SSD1680 Display Driver Implementation
//!
//! High level controller operations on top of [`DisplayInterface`]:
//! initialisation, writing the black/white RAM and triggering a refresh.
//!
//! ## Critical Implementation Details
//!
//! ### Display Update Value
//!
//! The datasheet suggests `0xC7` for Display Update Control 2, but a full
//! refresh on this hardware needs `0xF4` or `0xF7`. The value used depends on
//! the [`RefreshSpeed`] profile.
//!
//! ### Polarity Inversion
//!
//! This display has inverted polarity: `0x00` = white pixels, `0xFF` = black
//! pixels. Data is sent directly without inversion.
//!
//! ### BUSY Pin Wait
//!
//! After `MASTER_ACTIVATE` the BUSY pin stays high for the whole refresh.
//! A non-blocking refresh returns right away; the next command then waits.

pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::display::{Panel, RefreshSpeed};
use crate::ssd1680::interface::DisplayInterface;
use crate::ssd1680::{cmd::Cmd, flag::Flag, BUFFER_SIZE, HEIGHT, WIDTH};

/// SSD1680 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Ssd1680<SPI, BSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
    /// A refresh was started without waiting for it
    refresh_pending: bool,
}

impl<SPI, BSY, DC, RST, DELAY> Ssd1680<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Wrap the lines, the controller is initialised by [`Panel::init`]
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        Ssd1680 {
            interface: DisplayInterface::new(spi, busy, dc, rst, delay),
            refresh_pending: false,
        }
    }

    /// Display Update Control 2 sequence for a speed profile
    pub const fn update_sequence(speed: RefreshSpeed) -> u8 {
        match speed {
            RefreshSpeed::Default => Flag::DISPLAY_MODE_1,
            RefreshSpeed::Medium => Flag::DISPLAY_UPDATE_FULL,
            RefreshSpeed::Fast => Flag::DISPLAY_UPDATE_PARTIAL_2,
            RefreshSpeed::Turbo => Flag::DISPLAY_UPDATE_FAST,
        }
    }

    /// Execute command followed by data
    fn cmd_data(&mut self, cmd: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.interface.cmd_with_data(cmd, data)
    }

    /// Wait out a refresh started without blocking
    fn settle(&mut self) -> Result<(), DisplayError> {
        if self.refresh_pending {
            log::debug!("Waiting for previous refresh");
            self.interface.wait_until_idle()?;
            self.refresh_pending = false;
        }
        Ok(())
    }

    /// Set RAM window to full frame (0-15 for X, 0-295 for Y)
    fn set_full_ram_window(&mut self) -> Result<(), DisplayError> {
        let x_end = (WIDTH / 8 - 1) as u8;
        let y_end = HEIGHT - 1;
        self.cmd_data(Cmd::SET_RAMX_START_END, &[0x00, x_end])?;
        self.cmd_data(
            Cmd::SET_RAMY_START_END,
            &[0x00, 0x00, (y_end & 0xFF) as u8, (y_end >> 8) as u8],
        )
    }

    /// Set RAM X and Y counters to origin (0, 0)
    fn reset_ram_counters(&mut self) -> Result<(), DisplayError> {
        self.cmd_data(Cmd::SET_RAMX_COUNTER, &[0x00])?;
        self.cmd_data(Cmd::SET_RAMY_COUNTER, &[0x00, 0x00])
    }
}

impl<SPI, BSY, DC, RST, DELAY> Panel for Ssd1680<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Hardware reset followed by the minimal init sequence
    fn init(&mut self) -> Result<(), DisplayError> {
        log::info!("Initializing SSD1680");

        self.interface.reset()?;

        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle()?;

        // 296 gate lines, scan from G0
        self.cmd_data(
            Cmd::DRIVER_CONTROL,
            &[
                Flag::DRIVER_OUTPUT_MUX_LSB,
                Flag::DRIVER_OUTPUT_MUX_MSB,
                Flag::DRIVER_OUTPUT_GATE_SCAN_FROM_G0,
            ],
        )?;
        self.cmd_data(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;
        self.set_full_ram_window()?;
        self.cmd_data(Cmd::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_LUT1])?;
        self.cmd_data(Cmd::TEMP_CONTROL, &[Flag::INTERNAL_TEMP_SENSOR])?;
        self.reset_ram_counters()?;

        self.interface.wait_until_idle()?;
        self.refresh_pending = false;
        log::info!("SSD1680 ready");
        Ok(())
    }

    /// Write a full frame to the B/W RAM
    ///
    /// Frame format: rows of 16 bytes, MSB first, bit 1 = black.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if frame.len() != BUFFER_SIZE {
            log::error!("Frame is {} bytes, expected {}", frame.len(), BUFFER_SIZE);
            return Err(DisplayError::OutOfBoundsError);
        }

        self.settle()?;
        self.reset_ram_counters()?;
        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        self.interface.data(frame)
    }

    fn refresh(&mut self, speed: RefreshSpeed, blocking: bool) -> Result<(), DisplayError> {
        self.settle()?;
        self.cmd_data(Cmd::UPDATE_DISPLAY_CTRL2, &[Self::update_sequence(speed)])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;

        if blocking {
            self.interface.wait_until_idle()?;
        } else {
            self.refresh_pending = true;
        }
        Ok(())
    }
}
