//! `DisplaySurface` over embedded-graphics
//!
//! Drawing on an embedded-graphics target can fail, but the surface's
//! drawing calls return nothing. The first failure of a frame is latched
//! and returned by the following `show`.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use rotamenu_hal::{Color, DisplayError, DisplaySurface};

/// Push a finished frame to the panel
pub trait Flush {
    fn flush(&mut self) -> Result<(), DisplayError>;
}

impl<T: Flush + ?Sized> Flush for &mut T {
    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::Off => BinaryColor::Off,
        Color::On => BinaryColor::On,
    }
}

/// Menu surface on top of a binary-colour draw target
pub struct GraphicsSurface<T> {
    target: T,
    font: &'static MonoFont<'static>,
    fault: Option<DisplayError>,
}

impl<T> GraphicsSurface<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions + Flush,
{
    /// Wrap `target` using the 6x10 ASCII font
    pub fn new(target: T) -> Self {
        Self::with_font(target, &FONT_6X10)
    }

    /// Wrap `target` with a custom monospaced font
    pub fn with_font(target: T, font: &'static MonoFont<'static>) -> Self {
        Self {
            target,
            font,
            fault: None,
        }
    }

    pub fn inner(&self) -> &T {
        &self.target
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    fn latch<E>(&mut self, result: Result<(), E>) {
        if result.is_err() && self.fault.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display: draw failed");
            self.fault = Some(DisplayError::Communication);
        }
    }
}

impl<T> DisplaySurface for GraphicsSurface<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions + Flush,
{
    fn width(&self) -> u32 {
        self.target.size().width
    }

    fn height(&self) -> u32 {
        self.target.size().height
    }

    fn fill(&mut self, color: Color) {
        let result = self.target.clear(binary(color));
        self.latch(result);
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        let result = Pixel(Point::new(x, y), binary(color)).draw(&mut self.target);
        self.latch(result);
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, filled: bool) {
        let style = if filled {
            PrimitiveStyle::with_fill(binary(color))
        } else {
            PrimitiveStyle::with_stroke(binary(color), 1)
        };
        let result = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(style)
            .draw(&mut self.target);
        self.latch(result);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let style = MonoTextStyle::new(self.font, binary(color));
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ());
        self.latch(result);
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        if let Some(fault) = self.fault.take() {
            return Err(fault);
        }
        self.target.flush()
    }

    fn glyph_width(&self) -> u32 {
        self.font.character_size.width
    }
}
