//! Startup sequence and idle loop

use anyhow::{Context, Result};
use embedded_hal::delay::DelayNs;

use crate::device::Badge;
use crate::display::{DisplayAdapter, DisplayConfig, Panel};
use crate::gpio::{Gpio, PinRegistry};
use crate::interrupts::{bind_led_buttons, StatusLed};
use crate::page::AboutMePage;
use crate::pins::{PinMode, Role};

/// Power the board, configure every pin and bind the button interrupts
pub fn setup_pins<G: Gpio>(gpio: G) -> Result<(PinRegistry<G>, StatusLed)> {
    let mut pins = PinRegistry::new(gpio);

    pins.configure(Role::Enable3v3, PinMode::Output)
        .and_then(|_| pins.write(Role::Enable3v3, true))
        .context("enabling 3V3 rail")?;

    pins.configure(Role::Led, PinMode::Output)
        .context("configuring status LED")?;

    for role in [Role::ButtonA, Role::ButtonB, Role::ButtonC] {
        pins.configure(role, PinMode::Input)
            .with_context(|| format!("configuring {}", role))?;
    }
    for role in [Role::Up, Role::Down] {
        pins.configure(role, PinMode::InputPulldown)
            .with_context(|| format!("configuring {}", role))?;
    }

    let led = StatusLed::new(
        pins.level_writer(Role::Led)
            .context("configuring status LED")?,
    );
    bind_led_buttons(&mut pins, &led)?;

    Ok((pins, led))
}

/// Configure the display adapter around an opened panel
pub fn setup_display<P: Panel>(panel: P, config: DisplayConfig) -> Result<DisplayAdapter<P>> {
    let mut display = DisplayAdapter::new();
    display
        .configure(panel, config)
        .context("initializing display")?;
    Ok(display)
}

/// Bring the badge up and put the page on the panel.
///
/// Pins come first, then `open_panel` is called to open the SPI channel and
/// build the controller. The panel is committed twice: blank, then the page.
pub fn start<G, P, F>(
    gpio: G,
    open_panel: F,
    config: DisplayConfig,
    page: &AboutMePage<'_>,
) -> Result<Badge<G, P>>
where
    G: Gpio,
    P: Panel,
    F: FnOnce() -> Result<P>,
{
    log::info!("Setting up pins");
    let (pins, led) = setup_pins(gpio)?;

    log::info!("Setting up display");
    let panel = open_panel()?;
    let display = setup_display(panel, config)?;

    let mut badge = Badge::new(pins, led, display);

    badge.clear_buffer();
    badge.commit().context("committing blank frame")?;

    page.render(&mut badge).context("rendering page")?;
    badge.commit().context("committing page")?;

    log::info!("Page displayed");
    Ok(badge)
}

/// One idle tick: sleep, then log that we are alive
pub fn heartbeat<G: Gpio, P: Panel>(badge: &Badge<G, P>, delay: &mut impl DelayNs, interval_ms: u32) {
    delay.delay_ms(interval_ms);
    log::info!(
        "Hello from badge, led {}",
        if badge.led().is_lit() { "on" } else { "off" }
    );
}

/// Idle forever, interrupts keep driving the LED
pub fn idle<G: Gpio, P: Panel>(badge: &Badge<G, P>, delay: &mut impl DelayNs, interval_ms: u32) -> ! {
    loop {
        heartbeat(badge, delay, interval_ms);
    }
}
