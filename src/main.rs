#[cfg(target_os = "espidf")]
mod board {
    use anyhow::{Context, Result};

    use esp_idf_svc::hal::delay::Delay;
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::prelude::*;
    use esp_idf_svc::hal::spi;

    use epd_badge::config;
    use epd_badge::gpio::esp::EspGpio;
    use epd_badge::lifecycle::{idle, start};
    use epd_badge::Ssd1680;

    pub fn run() -> Result<()> {
        let peripherals = Peripherals::take().context("taking peripherals")?;
        let pins = peripherals.pins;

        let badge = start(
            EspGpio::new(),
            || {
                log::info!("Opening SPI at {} Hz", config::SPI_CLOCK_HZ);
                let driver = spi::SpiDeviceDriver::new_single(
                    peripherals.spi2,
                    pins.gpio12,                    // Pins::SCK
                    pins.gpio11,                    // Pins::MOSI
                    Option::<gpio::AnyIOPin>::None, // write only
                    Some(pins.gpio45),              // Pins::CS
                    &spi::SpiDriverConfig::new(),
                    &spi::SpiConfig::new().baudrate(config::SPI_CLOCK_HZ.Hz().into()),
                )
                .context("initializing spi2")?;

                let busy = gpio::PinDriver::input(pins.gpio48).context("initializing display pins")?;
                let dc = gpio::PinDriver::output(pins.gpio46).context("initializing display pins")?;
                let rst = gpio::PinDriver::output(pins.gpio47).context("initializing display pins")?;

                Ok(Ssd1680::new(driver, busy, dc, rst, Delay::default()))
            },
            config::DISPLAY,
            &config::about_me_page(),
        )?;

        let mut delay = Delay::default();
        idle(&badge, &mut delay, config::HEARTBEAT_INTERVAL_MS)
    }
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    if let Err(err) = board::run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("epd-badge runs on the ESP32-S3 only, build it for an espidf target");
    std::process::exit(1);
}
