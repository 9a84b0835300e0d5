//! Display adapter over `embedded-graphics`
//!
//! Maps the core display contract (font roles, icons, lines) onto any
//! monochrome frame buffer.

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X13_BOLD, FONT_7X13, FONT_7X13_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use cropcast_core::traits::{DisplayDriver, DisplayError, Font, Icon};

use super::icons;

/// A frame buffer that is pushed to its panel in one step
pub trait FrameBuffer: DrawTarget<Color = BinaryColor> {
    /// Clear the buffer without touching the panel
    fn clear_frame(&mut self);

    /// Push the buffer to the panel
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

/// [`DisplayDriver`] over a [`FrameBuffer`]
pub struct GraphicsDisplay<F> {
    target: F,
}

impl<F: FrameBuffer> GraphicsDisplay<F> {
    /// Wrap a frame buffer
    pub fn new(target: F) -> Self {
        Self { target }
    }

    /// The wrapped frame buffer
    pub fn target(&self) -> &F {
        &self.target
    }
}

/// Font used for each role
pub fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Title => &FONT_6X13_BOLD,
        Font::Body => &FONT_7X13,
        Font::BodyBold => &FONT_7X13_BOLD,
        Font::Small => &FONT_5X8,
    }
}

impl<F: FrameBuffer> DisplayDriver for GraphicsDisplay<F> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target.clear_frame();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(mono_font(font), BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Alphabetic)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Draw)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Draw)
    }

    fn draw_glyph(&mut self, x: i32, y: i32, icon: Icon) -> Result<(), DisplayError> {
        icons::draw(&mut self.target, icon, Point::new(x, y)).map_err(|_| DisplayError::Draw)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.target.flush_frame()
    }
}
