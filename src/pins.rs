//! Pin definitions for the badge board
//!
//! This module contains all GPIO pin assignments used in the hardware configuration,
//! and the logical roles the rest of the firmware refers to them by.

/// Pin configuration constants for the SSD1680 display and peripherals
pub struct Pins;

impl Pins {
    // SPI Display pins
    /// Chip Select pin for SPI display
    pub const CS: u8 = 45;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 46;
    /// Reset pin for display
    pub const RST: u8 = 47;
    /// Busy status pin (High when display is busy)
    pub const BSY: u8 = 48;
    /// SPI Clock pin
    pub const SCK: u8 = 12;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;

    // Button pins
    /// Button A
    pub const BTN_A: u8 = 2;
    /// Button B
    pub const BTN_B: u8 = 5;
    /// Button C
    pub const BTN_C: u8 = 1;
    /// Up button
    pub const BTN_UP: u8 = 6;
    /// Down button
    pub const BTN_DOWN: u8 = 4;

    // Other pins
    /// Activity LED
    pub const LED: u8 = 41;
    /// 3.3V rail enable, must be high before the panel is used
    pub const ENABLE_3V3: u8 = 7;
}

/// Logical name of a board pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ButtonA,
    ButtonB,
    ButtonC,
    Up,
    Down,
    Led,
    Enable3v3,
}

impl Role {
    pub const COUNT: usize = 7;

    pub const ALL: [Role; Role::COUNT] = [
        Role::ButtonA,
        Role::ButtonB,
        Role::ButtonC,
        Role::Up,
        Role::Down,
        Role::Led,
        Role::Enable3v3,
    ];

    /// Physical GPIO line of this role
    pub const fn line(self) -> u8 {
        match self {
            Role::ButtonA => Pins::BTN_A,
            Role::ButtonB => Pins::BTN_B,
            Role::ButtonC => Pins::BTN_C,
            Role::Up => Pins::BTN_UP,
            Role::Down => Pins::BTN_DOWN,
            Role::Led => Pins::LED,
            Role::Enable3v3 => Pins::ENABLE_3V3,
        }
    }

    /// Only the buttons are wired to interrupt-capable inputs
    pub const fn is_interrupt_capable(self) -> bool {
        matches!(
            self,
            Role::ButtonA | Role::ButtonB | Role::ButtonC | Role::Up | Role::Down
        )
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::ButtonA => "button A",
            Role::ButtonB => "button B",
            Role::ButtonC => "button C",
            Role::Up => "up button",
            Role::Down => "down button",
            Role::Led => "status LED",
            Role::Enable3v3 => "3V3 enable",
        };
        write!(f, "{} (gpio{})", name, self.line())
    }
}

/// Direction and pull of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    InputPulldown,
    InputPullup,
    Output,
}

impl PinMode {
    pub const fn is_input(self) -> bool {
        !matches!(self, PinMode::Output)
    }
}

/// Signal transition an interrupt fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}
