//! [`Gpio`] on top of the ESP-IDF GPIO driver
//!
//! Lines are driven through the C driver directly so an interrupt stays armed
//! after it fires, unlike `PinDriver::subscribe` which needs a re-enable.

use std::ffi::c_void;
use std::sync::Arc;

use esp_idf_svc::sys::{self, esp, EspError};

use super::{EdgeHandler, Gpio, GpioError, LevelWriter};
use crate::pins::{Edge, PinMode};

fn platform(line: u8, err: EspError) -> GpioError {
    GpioError::Platform {
        line,
        reason: err.to_string(),
    }
}

/// Entry point registered with `gpio_isr_handler_add`, `arg` is a leaked
/// `EdgeHandler`
unsafe extern "C" fn on_edge(arg: *mut c_void) {
    let handler = &mut *(arg as *mut EdgeHandler);
    handler();
}

struct EspLevel {
    pin: sys::gpio_num_t,
}

impl LevelWriter for EspLevel {
    #[inline]
    fn set_level(&self, high: bool) {
        // Only fails for an invalid pin, which was validated on configure
        unsafe {
            sys::gpio_set_level(self.pin, high as u32);
        }
    }
}

#[derive(Default)]
pub struct EspGpio {
    isr_service: bool,
    /// Bit per line that already has a handler
    subscribed: u64,
}

impl EspGpio {
    pub fn new() -> Self {
        Self::default()
    }

    fn install_isr_service(&mut self, line: u8) -> Result<(), GpioError> {
        if self.isr_service {
            return Ok(());
        }
        let code = unsafe { sys::gpio_install_isr_service(0) };
        match EspError::from(code) {
            // Someone else installed it first
            Some(err) if err.code() == sys::ESP_ERR_INVALID_STATE as sys::esp_err_t => {}
            Some(err) => return Err(platform(line, err)),
            None => {}
        }
        self.isr_service = true;
        log::debug!("GPIO ISR service installed");
        Ok(())
    }
}

impl Gpio for EspGpio {
    fn configure(&mut self, line: u8, mode: PinMode) -> Result<(), GpioError> {
        let (direction, pull_up, pull_down) = match mode {
            PinMode::Input => (sys::gpio_mode_t_GPIO_MODE_INPUT, false, false),
            PinMode::InputPulldown => (sys::gpio_mode_t_GPIO_MODE_INPUT, false, true),
            PinMode::InputPullup => (sys::gpio_mode_t_GPIO_MODE_INPUT, true, false),
            PinMode::Output => (sys::gpio_mode_t_GPIO_MODE_OUTPUT, false, false),
        };
        let config = sys::gpio_config_t {
            pin_bit_mask: 1u64 << line,
            mode: direction,
            pull_up_en: pull_up as sys::gpio_pullup_t,
            pull_down_en: pull_down as sys::gpio_pulldown_t,
            intr_type: sys::gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        esp!(unsafe { sys::gpio_config(&config) }).map_err(|err| GpioError::Rejected {
            line,
            mode,
            reason: err.to_string(),
        })
    }

    fn read(&mut self, line: u8) -> Result<bool, GpioError> {
        Ok(unsafe { sys::gpio_get_level(line as sys::gpio_num_t) } != 0)
    }

    fn write(&mut self, line: u8, high: bool) -> Result<(), GpioError> {
        esp!(unsafe { sys::gpio_set_level(line as sys::gpio_num_t, high as u32) })
            .map_err(|err| platform(line, err))
    }

    fn subscribe(&mut self, line: u8, edge: Edge, handler: EdgeHandler) -> Result<(), GpioError> {
        let mask = 1u64 << line;
        if self.subscribed & mask != 0 {
            return Err(GpioError::NoFreeSlot { line });
        }
        self.install_isr_service(line)?;

        let pin = line as sys::gpio_num_t;
        let trigger = match edge {
            Edge::Rising => sys::gpio_int_type_t_GPIO_INTR_POSEDGE,
            Edge::Falling => sys::gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        esp!(unsafe { sys::gpio_set_intr_type(pin, trigger) }).map_err(|err| platform(line, err))?;

        // Handlers stay registered for the lifetime of the firmware
        let arg = Box::into_raw(Box::new(handler));
        if let Err(err) = esp!(unsafe { sys::gpio_isr_handler_add(pin, Some(on_edge), arg as *mut c_void) }) {
            drop(unsafe { Box::from_raw(arg) });
            return Err(platform(line, err));
        }
        esp!(unsafe { sys::gpio_intr_enable(pin) }).map_err(|err| platform(line, err))?;

        self.subscribed |= mask;
        Ok(())
    }

    fn level_writer(&mut self, line: u8) -> Result<Arc<dyn LevelWriter>, GpioError> {
        Ok(Arc::new(EspLevel {
            pin: line as sys::gpio_num_t,
        }))
    }
}
