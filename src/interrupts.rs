//! Button interrupts driving the status LED
//!
//! The up button switches the LED on, the down button switches it off. The
//! handlers run in interrupt context, so the LED update is one atomic store
//! plus one register write and never takes a lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::gpio::{Gpio, LevelWriter, PinRegistry};
use crate::pins::{Edge, Role};

/// Status LED shared between interrupt handlers and the main loop
#[derive(Clone)]
pub struct StatusLed {
    writer: Arc<dyn LevelWriter>,
    lit: Arc<AtomicBool>,
}

impl StatusLed {
    pub fn new(writer: Arc<dyn LevelWriter>) -> Self {
        Self {
            writer,
            lit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Safe to call from an interrupt handler
    #[inline]
    pub fn set(&self, on: bool) {
        self.lit.store(on, Ordering::Release);
        self.writer.set_level(on);
    }

    /// Level last written by anyone holding this LED
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::Acquire)
    }
}

/// Couple the up/down buttons' rising edges to the LED
pub fn bind_led_buttons<G: Gpio>(pins: &mut PinRegistry<G>, led: &StatusLed) -> Result<()> {
    let on = led.clone();
    pins.bind_interrupt(Role::Up, Edge::Rising, Box::new(move || on.set(true)))
        .context("setting up interrupt")?;

    let off = led.clone();
    pins.bind_interrupt(Role::Down, Edge::Rising, Box::new(move || off.set(false)))
        .context("setting up interrupt")?;

    Ok(())
}
