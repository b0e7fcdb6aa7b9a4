//! Display surface abstraction
//!
//! A monochrome raster the menu draws into. Drawing calls only touch the
//! frame buffer; nothing reaches the panel until [`DisplaySurface::show`].

use core::fmt;

/// Pixel colour on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off (black on most OLEDs)
    #[default]
    Off,
    /// Pixel on (white on most OLEDs)
    On,
}

impl Color {
    /// The opposite colour
    pub const fn inverse(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }

    /// Map a boolean pixel state to a colour
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// Display surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Panel not initialized
    NotInitialized,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Communication => f.write_str("display communication failed"),
            DisplayError::NotInitialized => f.write_str("display not initialized"),
        }
    }
}

/// Monochrome display surface
///
/// Coordinates are signed so callers can draw partially off-screen rows;
/// implementations clip to their extent.
pub trait DisplaySurface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Fill the whole frame with one colour
    fn fill(&mut self, color: Color);

    /// Set a single pixel
    fn pixel(&mut self, x: i32, y: i32, color: Color);

    /// Draw a rectangle, outlined or filled
    fn rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color, filled: bool);

    /// Draw text with its top-left corner at `(x, y)`
    fn text(&mut self, text: &str, x: i32, y: i32, color: Color);

    /// Flush the frame to the physical panel
    fn show(&mut self) -> Result<(), DisplayError>;

    /// Advance of one character cell in pixels
    ///
    /// Used to right-align text. The default matches the 8x8 font of most
    /// small OLED frame buffer libraries.
    fn glyph_width(&self) -> u32 {
        8
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &mut T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn fill(&mut self, color: Color) {
        (**self).fill(color)
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        (**self).pixel(x, y, color)
    }

    fn rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color, filled: bool) {
        (**self).rect(x, y, width, height, color, filled)
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        (**self).text(text, x, y, color)
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        (**self).show()
    }

    fn glyph_width(&self) -> u32 {
        (**self).glyph_width()
    }
}
