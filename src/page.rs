//! About-me page layout
//!
//! A filled title bar across the top of the panel with the name centered in
//! it, followed by a few static body lines and an optional profile picture.

use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::AdapterError;
use crate::ssd1680::color::Color;

/// Profile picture edge length in pixels
pub const PICTURE_SIZE: u32 = 80;

/// Left margin of the body text
const BODY_X: i32 = 8;
/// Baseline of the first body line
const BODY_Y: i32 = 60;
/// Distance between body baselines
const BODY_LINE_SPACING: i32 = 25;
/// Gap between the picture and the panel edges
const PICTURE_MARGIN: i32 = 4;
/// Fill of the title bar, the title uses the inverse
const BAR_COLOR: Color = Color::Black;

/// Drawing surface the page is rendered onto
pub trait Canvas {
    /// Logical size after rotation
    fn size(&self) -> Size;

    /// Rendered width of `text` in pixels
    fn line_width(&self, font: &MonoFont<'_>, text: &str) -> u32;

    fn draw_filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), AdapterError>;

    /// Draw `text` with its bottom left corner at `x`, `y`
    fn draw_text(
        &mut self,
        font: &MonoFont<'_>,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
    ) -> Result<(), AdapterError>;

    fn draw_image(
        &mut self,
        image: &ImageRaw<'_, BinaryColor>,
        x: i32,
        y: i32,
    ) -> Result<(), AdapterError>;
}

/// Geometry of the title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleLayout {
    pub bar: Rectangle,
    pub text_origin: Point,
}

/// Filled bar with a centered title
pub struct TitleBar<'a> {
    pub title: &'a str,
    pub font: &'a MonoFont<'a>,
    pub bar_height: u32,
    /// Nominal cap height of `font`, used instead of measuring glyphs
    pub font_height: u32,
}

impl<'a> TitleBar<'a> {
    /// Compute the bar and text origin for a panel `panel_width` wide and a
    /// title measuring `text_width`.
    ///
    /// Halves are floored before subtracting, so an odd leftover puts the
    /// extra pixel on the right. Text wider than the panel gets a negative
    /// origin and is clipped when drawn.
    pub fn layout(&self, panel_width: u32, text_width: u32) -> TitleLayout {
        let text_x = (panel_width / 2) as i32 - (text_width / 2) as i32;
        // text origin is bottom left rather than top left
        let text_y = (self.bar_height / 2 + self.font_height / 2) as i32;

        TitleLayout {
            bar: Rectangle::new(Point::zero(), Size::new(panel_width, self.bar_height)),
            text_origin: Point::new(text_x, text_y),
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<TitleLayout, AdapterError> {
        let panel_width = canvas.size().width;
        let text_width = canvas.line_width(self.font, self.title);
        if text_width > panel_width {
            log::warn!(
                "Title {:?} is {}px wide, panel is {}px, it will be clipped",
                self.title,
                text_width,
                panel_width
            );
        }

        let layout = self.layout(panel_width, text_width);
        canvas.draw_filled_rectangle(
            layout.bar.top_left.x,
            layout.bar.top_left.y,
            layout.bar.size.width as i32,
            layout.bar.size.height as i32,
            BAR_COLOR,
        )?;
        canvas.draw_text(
            self.font,
            layout.text_origin.x,
            layout.text_origin.y,
            self.title,
            BAR_COLOR.inverse(),
        )?;

        log::debug!("Title bar drawn: {:?}", layout);
        Ok(layout)
    }
}

/// The single page shown on the badge
pub struct AboutMePage<'a> {
    pub title: TitleBar<'a>,
    pub body: &'a [&'a str],
    pub body_font: &'a MonoFont<'a>,
    /// 1-bit [`PICTURE_SIZE`] square picture, empty for none
    pub picture: &'a [u8],
}

impl<'a> AboutMePage<'a> {
    /// Top left corner of the picture: right edge, just below the bar
    pub fn picture_origin(&self, panel: Size) -> Point {
        Point::new(
            panel.width as i32 - PICTURE_SIZE as i32 - PICTURE_MARGIN,
            self.title.bar_height as i32 + PICTURE_MARGIN,
        )
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), AdapterError> {
        self.title.render(canvas)?;

        let mut y = BODY_Y;
        for line in self.body {
            canvas.draw_text(self.body_font, BODY_X, y, line, Color::Black)?;
            y += BODY_LINE_SPACING;
        }

        let expected = (PICTURE_SIZE.div_ceil(8) * PICTURE_SIZE) as usize;
        if self.picture.len() == expected {
            let origin = self.picture_origin(canvas.size());
            let image = ImageRaw::<BinaryColor>::new(self.picture, PICTURE_SIZE);
            canvas.draw_image(&image, origin.x, origin.y)?;
        } else if !self.picture.is_empty() {
            log::warn!(
                "Skipping picture: {} bytes, expected {}",
                self.picture.len(),
                expected
            );
        }
        Ok(())
    }
}
