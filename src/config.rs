//! Build-time configuration of the badge
//!
//! Nothing here can be changed at runtime.

use embedded_graphics::mono_font::iso_8859_15::{FONT_6X13, FONT_9X18_BOLD};
use embedded_graphics::mono_font::MonoFont;

use crate::display::{DisplayConfig, RefreshSpeed};
use crate::page::{AboutMePage, TitleBar};
use crate::ssd1680::graphics::DisplayRotation;

/// Name shown in the title bar, `BADGE_NAME` at build time overrides it
pub const TITLE: &str = match option_env!("BADGE_NAME") {
    Some(name) => name,
    None => "noah!",
};

/// Lines under the title bar, the badge shows the name only
pub const BODY: &[&str] = &[];

/// Profile picture converted by build.rs, empty when there was no pfp.png
pub static PICTURE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/pfp.bin"));

pub const SPI_CLOCK_HZ: u32 = 12_000_000;

pub const DISPLAY: DisplayConfig = DisplayConfig {
    rotation: DisplayRotation::Rotate270,
    speed: RefreshSpeed::Medium,
    blocking: true,
};

pub const BAR_HEIGHT: u32 = 40;
pub const TITLE_FONT: &MonoFont<'static> = &FONT_9X18_BOLD;
/// Cap height of [`TITLE_FONT`]
pub const TITLE_FONT_HEIGHT: u32 = 18;
pub const BODY_FONT: &MonoFont<'static> = &FONT_6X13;

pub const HEARTBEAT_INTERVAL_MS: u32 = 500;

/// The page the badge shows
pub fn about_me_page() -> AboutMePage<'static> {
    AboutMePage {
        title: TitleBar {
            title: TITLE,
            font: TITLE_FONT,
            bar_height: BAR_HEIGHT,
            font_height: TITLE_FONT_HEIGHT,
        },
        body: BODY,
        body_font: BODY_FONT,
        picture: PICTURE,
    }
}
