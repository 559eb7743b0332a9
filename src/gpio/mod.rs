//! Pin registry
//!
//! Maps board roles to GPIO lines on top of a line-numbered [`Gpio`] platform
//! and remembers how each line was configured.

use std::sync::Arc;

use crate::pins::{Edge, PinMode, Role};

#[cfg(target_os = "espidf")]
pub mod esp;

/// Callback run from interrupt context on an edge
pub type EdgeHandler = Box<dyn FnMut() + Send + 'static>;

/// Output handle usable from interrupt context.
///
/// `set_level` is a single register write: it must not block or allocate.
pub trait LevelWriter: Send + Sync {
    fn set_level(&self, high: bool);
}

/// GPIO platform, addressed by line number
pub trait Gpio {
    fn configure(&mut self, line: u8, mode: PinMode) -> Result<(), GpioError>;

    fn read(&mut self, line: u8) -> Result<bool, GpioError>;

    fn write(&mut self, line: u8, high: bool) -> Result<(), GpioError>;

    /// Run `handler` on every `edge` seen on an input line
    fn subscribe(&mut self, line: u8, edge: Edge, handler: EdgeHandler) -> Result<(), GpioError>;

    /// ISR-safe writer for an output line
    fn level_writer(&mut self, line: u8) -> Result<Arc<dyn LevelWriter>, GpioError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error("gpio{line}: mode {mode:?} rejected: {reason}")]
    Rejected {
        line: u8,
        mode: PinMode,
        reason: String,
    },
    #[error("gpio{line}: {reason}")]
    Platform { line: u8, reason: String },
    #[error("gpio{line}: no free interrupt slot")]
    NoFreeSlot { line: u8 },
    #[error("{0} is not configured as an input")]
    NotInput(Role),
    #[error("{0} is not configured as an output")]
    NotOutput(Role),
    #[error("{0} is not interrupt capable")]
    NotInterruptCapable(Role),
}

pub struct PinRegistry<G> {
    gpio: G,
    modes: [Option<PinMode>; Role::COUNT],
}

impl<G: Gpio> PinRegistry<G> {
    pub fn new(gpio: G) -> Self {
        Self {
            gpio,
            modes: [None; Role::COUNT],
        }
    }

    /// Set direction and pull of the line behind `role`.
    ///
    /// A mode the platform rejects is returned as is, nothing is retried.
    pub fn configure(&mut self, role: Role, mode: PinMode) -> Result<(), GpioError> {
        self.gpio.configure(role.line(), mode)?;
        self.modes[role.index()] = Some(mode);
        log::debug!("{} configured as {:?}", role, mode);
        Ok(())
    }

    pub fn mode(&self, role: Role) -> Option<PinMode> {
        self.modes[role.index()]
    }

    /// Logic level of an input
    pub fn read(&mut self, role: Role) -> Result<bool, GpioError> {
        match self.mode(role) {
            Some(mode) if mode.is_input() => self.gpio.read(role.line()),
            _ => Err(GpioError::NotInput(role)),
        }
    }

    /// Drive an output. Writes to a role not configured as output are ignored.
    pub fn write(&mut self, role: Role, high: bool) -> Result<(), GpioError> {
        if self.mode(role) != Some(PinMode::Output) {
            log::warn!("Ignoring write to {}, not an output", role);
            return Ok(());
        }
        self.gpio.write(role.line(), high)
    }

    /// Register `handler` for `edge` transitions of an input role
    pub fn bind_interrupt(
        &mut self,
        role: Role,
        edge: Edge,
        handler: EdgeHandler,
    ) -> Result<(), GpioError> {
        if !self.mode(role).is_some_and(PinMode::is_input) {
            return Err(GpioError::NotInput(role));
        }
        if !role.is_interrupt_capable() {
            return Err(GpioError::NotInterruptCapable(role));
        }
        self.gpio.subscribe(role.line(), edge, handler)?;
        log::info!("Interrupt bound on {} ({:?} edge)", role, edge);
        Ok(())
    }

    /// ISR-safe writer for an output role
    pub fn level_writer(&mut self, role: Role) -> Result<Arc<dyn LevelWriter>, GpioError> {
        if self.mode(role) != Some(PinMode::Output) {
            return Err(GpioError::NotOutput(role));
        }
        self.gpio.level_writer(role.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGpio;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry() -> (PinRegistry<MockGpio>, MockGpio) {
        let gpio = MockGpio::new();
        (PinRegistry::new(gpio.clone()), gpio)
    }

    #[test]
    fn configure_records_mode() {
        let (mut pins, gpio) = registry();
        pins.configure(Role::Up, PinMode::InputPulldown).unwrap();
        assert_eq!(pins.mode(Role::Up), Some(PinMode::InputPulldown));
        assert_eq!(gpio.mode(Role::Up.line()), Some(PinMode::InputPulldown));
        assert_eq!(pins.mode(Role::Down), None);
    }

    #[test]
    fn rejected_mode_is_propagated() {
        let (mut pins, gpio) = registry();
        gpio.reject(PinMode::InputPullup);
        let err = pins.configure(Role::ButtonA, PinMode::InputPullup).unwrap_err();
        assert!(matches!(err, GpioError::Rejected { line: 2, .. }));
        assert_eq!(pins.mode(Role::ButtonA), None);
    }

    #[test]
    fn read_returns_input_level() {
        let (mut pins, gpio) = registry();
        pins.configure(Role::ButtonB, PinMode::Input).unwrap();
        assert!(!pins.read(Role::ButtonB).unwrap());
        gpio.set_input(Role::ButtonB.line(), true);
        assert!(pins.read(Role::ButtonB).unwrap());
    }

    #[test]
    fn read_requires_input() {
        let (mut pins, _) = registry();
        assert!(matches!(pins.read(Role::Up), Err(GpioError::NotInput(Role::Up))));
        pins.configure(Role::Led, PinMode::Output).unwrap();
        assert!(matches!(pins.read(Role::Led), Err(GpioError::NotInput(Role::Led))));
    }

    #[test]
    fn write_drives_outputs_only() {
        let (mut pins, gpio) = registry();
        pins.configure(Role::Led, PinMode::Output).unwrap();
        pins.write(Role::Led, true).unwrap();
        assert_eq!(gpio.level(Role::Led.line()), Some(true));

        pins.configure(Role::ButtonC, PinMode::Input).unwrap();
        pins.write(Role::ButtonC, true).unwrap();
        assert_eq!(gpio.level(Role::ButtonC.line()), None);
    }

    #[test]
    fn interrupt_runs_handler_on_matching_edge() {
        let (mut pins, gpio) = registry();
        pins.configure(Role::Up, PinMode::InputPulldown).unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        pins.bind_interrupt(
            Role::Up,
            Edge::Rising,
            Box::new(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            }),
        )
        .unwrap();

        gpio.fire(Role::Up.line(), Edge::Rising);
        gpio.fire(Role::Up.line(), Edge::Falling);
        gpio.fire(Role::Down.line(), Edge::Rising);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn interrupt_requires_capable_input() {
        let (mut pins, _) = registry();
        let err = pins
            .bind_interrupt(Role::Up, Edge::Rising, Box::new(|| {}))
            .unwrap_err();
        assert!(matches!(err, GpioError::NotInput(Role::Up)));

        // An input that isn't wired for interrupts
        pins.configure(Role::Led, PinMode::Input).unwrap();
        let err = pins
            .bind_interrupt(Role::Led, Edge::Rising, Box::new(|| {}))
            .unwrap_err();
        assert!(matches!(err, GpioError::NotInterruptCapable(Role::Led)));
    }

    #[test]
    fn second_handler_on_a_line_has_no_slot() {
        let (mut pins, _) = registry();
        pins.configure(Role::Down, PinMode::InputPulldown).unwrap();
        pins.bind_interrupt(Role::Down, Edge::Rising, Box::new(|| {}))
            .unwrap();
        let err = pins
            .bind_interrupt(Role::Down, Edge::Falling, Box::new(|| {}))
            .unwrap_err();
        assert!(matches!(err, GpioError::NoFreeSlot { line: 4 }));
    }

    #[test]
    fn level_writer_requires_output() {
        let (mut pins, gpio) = registry();
        assert!(matches!(
            pins.level_writer(Role::Led),
            Err(GpioError::NotOutput(Role::Led))
        ));

        pins.configure(Role::Led, PinMode::Output).unwrap();
        let led = pins.level_writer(Role::Led).unwrap();
        led.set_level(true);
        assert_eq!(gpio.level(Role::Led.line()), Some(true));
    }
}
