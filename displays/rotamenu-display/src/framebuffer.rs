//! Page-organised monochrome frame buffer
//!
//! Each byte holds a vertical strip of 8 pixels, LSB on top, so a page can
//! be streamed to the controller unchanged.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use rotamenu_hal::DisplayError;

use crate::surface::Flush;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / 8;

/// 128x64 frame buffer (1 bit per pixel, organised as pages)
#[derive(Clone)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
    /// Completed frames
    frames: u32,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            frames: 0,
        }
    }

    /// Set or clear one pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read one pixel; out of bounds reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < WIDTH && y < HEIGHT => self.pages[y / 8][x] & (1 << (y % 8)) != 0,
            _ => false,
        }
    }

    /// Raw bytes of page `index` (rows `8 * index ..= 8 * index + 7`)
    pub fn page(&self, index: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(index)
    }

    /// Number of lit pixels
    pub fn lit(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    /// Frames completed through [`Flush::flush`]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}

impl Flush for FrameBuffer {
    fn flush(&mut self) -> Result<(), DisplayError> {
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}
