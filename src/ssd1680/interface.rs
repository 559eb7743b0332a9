//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

const RESET_PULSE_MS: u32 = 2;
const RESET_SETTLE_MS: u32 = 20;
const BUSY_POLL_MS: u32 = 1;

/// The connection to the SSD1680 controller
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device, chip select is handled by the device
    spi: SPI,
    /// High for busy, wait until display is ready!
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    pub(crate) delay: DELAY,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Bundle the bus and control lines, no I/O happens here
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
        }
    }
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        self.spi.write(&[command]).map_err(|e| {
            log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
            DisplayError::BusWriteError
        })
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Pulse the reset line low
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Whether the controller currently reports busy
    pub fn is_busy(&mut self) -> Result<bool, DisplayError> {
        // DisplayError has no variant for a status line, the read is a bus failure
        self.busy.is_high().map_err(|_| DisplayError::BusWriteError)
    }

    /// Block until BUSY goes low. No timeout, a full refresh takes 1-3 seconds.
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), DisplayError> {
        let mut polls = 0u32;
        while self.is_busy()? {
            self.delay.delay_ms(BUSY_POLL_MS);
            polls = polls.wrapping_add(1);
        }
        log::debug!("BUSY released after {} polls", polls);
        Ok(())
    }
}
