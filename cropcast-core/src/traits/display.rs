//! Display driver trait for the 128x64 monochrome panel
//!
//! Drawing goes to an off-screen buffer; nothing is visible until
//! [`DisplayDriver::flush`] pushes the whole frame.

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus,
    /// Text or glyph could not be drawn
    Draw,
}

/// Font roles used by the screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Screen title
    Title,
    /// Readings and status text
    Body,
    /// Emphasised body text
    BodyBold,
    /// Captions
    Small,
}

/// Icons drawn next to readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    Thermometer,
    Droplet,
    Leaf,
    Cloud,
    Lightbulb,
    List,
}

/// Trait for a buffered pixel display
///
/// Coordinates are pixels with the origin at the top left. Text and glyphs
/// are positioned by their baseline.
pub trait DisplayDriver {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its baseline at `y`
    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str) -> Result<(), DisplayError>;

    /// Draw a one-pixel line
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Draw an icon with its baseline at `y`
    fn draw_glyph(&mut self, x: i32, y: i32, icon: Icon) -> Result<(), DisplayError>;

    /// Push the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
