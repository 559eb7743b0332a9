/// Flag values written as command parameters to the SSD1680.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Driver Output Control (0x01): MUX = 0x127 + 1 = 296 gates
    pub const DRIVER_OUTPUT_MUX_LSB: u8 = 0x27;
    pub const DRIVER_OUTPUT_MUX_MSB: u8 = 0x01;
    pub const DRIVER_OUTPUT_GATE_SCAN_FROM_G0: u8 = 0x00;

    // Data Entry Mode (0x11)
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03; // Y increment, X increment

    // Temperature Sensor Control (0x18)
    pub const INTERNAL_TEMP_SENSOR: u8 = 0x80;

    // Border Waveform Control (0x3C)
    pub const BORDER_WAVEFORM_LUT1: u8 = 0x01;

    // Display Update Control 2 (0x22) sequences
    pub const DISPLAY_MODE_1: u8 = 0xF7; // Load temp + LUT, mode 1
    pub const DISPLAY_UPDATE_FULL: u8 = 0xF4; // Full update, this panel's reliable choice
    pub const DISPLAY_UPDATE_PARTIAL_2: u8 = 0xC7; // Skip temperature load
    pub const DISPLAY_UPDATE_FAST: u8 = 0xB1; // Fast update, more ghosting
}
