//! Test doubles for the hardware seams

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::display::{Panel, RefreshSpeed};
use crate::gpio::{EdgeHandler, Gpio, GpioError, LevelWriter};
use crate::pins::{Edge, PinMode};

// ---------------------------------------------------------------- GPIO

#[derive(Default)]
struct GpioState {
    modes: HashMap<u8, PinMode>,
    inputs: HashMap<u8, bool>,
    handlers: HashMap<u8, (Edge, EdgeHandler)>,
    rejected: Vec<PinMode>,
    no_interrupts: bool,
}

/// In-memory GPIO platform. Clones share state so a test can keep a probe.
#[derive(Clone, Default)]
pub struct MockGpio {
    state: Arc<Mutex<GpioState>>,
    levels: Arc<Mutex<HashMap<u8, bool>>>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the platform refuse a mode
    pub fn reject(&self, mode: PinMode) {
        self.state.lock().unwrap().rejected.push(mode);
    }

    /// Make every subscription fail
    pub fn without_interrupts(&self) {
        self.state.lock().unwrap().no_interrupts = true;
    }

    pub fn set_input(&self, line: u8, high: bool) {
        self.state.lock().unwrap().inputs.insert(line, high);
    }

    pub fn mode(&self, line: u8) -> Option<PinMode> {
        self.state.lock().unwrap().modes.get(&line).copied()
    }

    /// Last level driven on a line, None when never written
    pub fn level(&self, line: u8) -> Option<bool> {
        self.levels.lock().unwrap().get(&line).copied()
    }

    /// Simulate a transition, runs the handler when the edge matches
    pub fn fire(&self, line: u8, edge: Edge) {
        let mut state = self.state.lock().unwrap();
        if let Some((bound, handler)) = state.handlers.get_mut(&line) {
            if *bound == edge {
                handler();
            }
        }
    }
}

struct MockLevel {
    line: u8,
    levels: Arc<Mutex<HashMap<u8, bool>>>,
}

impl LevelWriter for MockLevel {
    fn set_level(&self, high: bool) {
        self.levels.lock().unwrap().insert(self.line, high);
    }
}

impl Gpio for MockGpio {
    fn configure(&mut self, line: u8, mode: PinMode) -> Result<(), GpioError> {
        let mut state = self.state.lock().unwrap();
        if state.rejected.contains(&mode) {
            return Err(GpioError::Rejected {
                line,
                mode,
                reason: "unsupported".into(),
            });
        }
        state.modes.insert(line, mode);
        Ok(())
    }

    fn read(&mut self, line: u8) -> Result<bool, GpioError> {
        let state = self.state.lock().unwrap();
        Ok(state.inputs.get(&line).copied().unwrap_or(false))
    }

    fn write(&mut self, line: u8, high: bool) -> Result<(), GpioError> {
        self.levels.lock().unwrap().insert(line, high);
        Ok(())
    }

    fn subscribe(&mut self, line: u8, edge: Edge, handler: EdgeHandler) -> Result<(), GpioError> {
        let mut state = self.state.lock().unwrap();
        if state.no_interrupts {
            return Err(GpioError::Platform {
                line,
                reason: "interrupt service unavailable".into(),
            });
        }
        if state.handlers.contains_key(&line) {
            return Err(GpioError::NoFreeSlot { line });
        }
        state.handlers.insert(line, (edge, handler));
        Ok(())
    }

    fn level_writer(&mut self, line: u8) -> Result<Arc<dyn LevelWriter>, GpioError> {
        Ok(Arc::new(MockLevel {
            line,
            levels: self.levels.clone(),
        }))
    }
}

// ---------------------------------------------------------------- Panel

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Init,
    Frame,
    Refresh(RefreshSpeed, bool),
}

#[derive(Default)]
struct PanelLog {
    events: Vec<PanelEvent>,
    frames: Vec<Vec<u8>>,
    fail_init: bool,
    fail_writes: bool,
}

/// Panel that records what it was asked to do
#[derive(Clone, Default)]
pub struct MockPanel {
    log: Rc<RefCell<PanelLog>>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel whose init fails
    pub fn failing() -> Self {
        let panel = Self::default();
        panel.log.borrow_mut().fail_init = true;
        panel
    }

    pub fn fail_writes(&self) {
        self.log.borrow_mut().fail_writes = true;
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.log.borrow().events.clone()
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.log.borrow().frames.clone()
    }
}

impl Panel for MockPanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        let mut log = self.log.borrow_mut();
        if log.fail_init {
            return Err(DisplayError::RSError);
        }
        log.events.push(PanelEvent::Init);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        let mut log = self.log.borrow_mut();
        if log.fail_writes {
            return Err(DisplayError::BusWriteError);
        }
        log.events.push(PanelEvent::Frame);
        log.frames.push(frame.to_vec());
        Ok(())
    }

    fn refresh(&mut self, speed: RefreshSpeed, blocking: bool) -> Result<(), DisplayError> {
        self.log
            .borrow_mut()
            .events
            .push(PanelEvent::Refresh(speed, blocking));
        Ok(())
    }
}

// ---------------------------------------------------------------- SPI bus

/// What went over the wire, split by the DC line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Cmd(u8),
    Data(Vec<u8>),
    Reset(bool),
}

pub type BusLog = Rc<RefCell<Vec<BusEvent>>>;

pub struct MockSpi {
    log: BusLog,
    dc: Rc<Cell<bool>>,
    fail: bool,
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(spi::ErrorKind::Other);
        }
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                let event = if self.dc.get() {
                    BusEvent::Data(bytes.to_vec())
                } else {
                    BusEvent::Cmd(bytes[0])
                };
                self.log.borrow_mut().push(event);
            }
        }
        Ok(())
    }
}

pub struct MockDc {
    level: Rc<Cell<bool>>,
}

impl digital::ErrorType for MockDc {
    type Error = Infallible;
}

impl OutputPin for MockDc {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}

pub struct MockRst {
    log: BusLog,
}

impl digital::ErrorType for MockRst {
    type Error = Infallible;
}

impl OutputPin for MockRst {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Reset(true));
        Ok(())
    }
}

/// BUSY line that stays high for a number of reads
pub struct MockBusy {
    remaining: Rc<Cell<u32>>,
}

impl digital::ErrorType for MockBusy {
    type Error = Infallible;
}

impl InputPin for MockBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let left = self.remaining.get();
        if left == 0 {
            return Ok(false);
        }
        self.remaining.set(left - 1);
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

/// Handles into a mock bus after its parts were moved into a driver
pub struct BusProbe {
    pub log: BusLog,
    pub busy_reads: Rc<Cell<u32>>,
    pub delay_ns: Rc<Cell<u64>>,
}

impl BusProbe {
    /// Keep BUSY high for the next `reads` polls
    pub fn hold_busy(&self, reads: u32) {
        self.busy_reads.set(reads);
    }

    pub fn commands(&self) -> Vec<u8> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                BusEvent::Cmd(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Data bytes sent right after `cmd`, first occurrence
    pub fn data_after(&self, cmd: u8) -> Option<Vec<u8>> {
        let log = self.log.borrow();
        let at = log.iter().position(|e| *e == BusEvent::Cmd(cmd))?;
        let mut data = Vec::new();
        for event in &log[at + 1..] {
            match event {
                BusEvent::Data(bytes) => data.extend_from_slice(bytes),
                _ => break,
            }
        }
        Some(data)
    }
}

/// A complete set of mock display lines
pub fn mock_bus(fail_spi: bool) -> (MockSpi, MockBusy, MockDc, MockRst, MockDelay, BusProbe) {
    let log: BusLog = Rc::default();
    let dc = Rc::new(Cell::new(false));
    let busy_reads = Rc::new(Cell::new(0));
    let delay = MockDelay::default();
    let probe = BusProbe {
        log: log.clone(),
        busy_reads: busy_reads.clone(),
        delay_ns: delay.total_ns.clone(),
    };
    (
        MockSpi {
            log: log.clone(),
            dc: dc.clone(),
            fail: fail_spi,
        },
        MockBusy {
            remaining: busy_reads,
        },
        MockDc { level: dc },
        MockRst { log },
        delay,
        probe,
    )
}
