//! 8x8 monochrome icons

use rotamenu_hal::{Color, DisplaySurface};

/// Icon edge length in pixels
pub const ICON_SIZE: i32 = 8;

/// 8x8 bitmap, one byte per row, most significant bit on the left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Icon {
    rows: [u8; 8],
}

/// Prohibition sign drawn over disabled entries
pub const DISABLED: Icon = Icon::new([
    0b0011_1100,
    0b0110_0010,
    0b1010_0001,
    0b1001_0001,
    0b1000_1001,
    0b1000_0101,
    0b0100_0110,
    0b0011_1100,
]);

impl Icon {
    /// Create an icon from its rows
    pub const fn new(rows: [u8; 8]) -> Self {
        Self { rows }
    }

    /// Check if the pixel at `(x, y)` is set
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if !(0..ICON_SIZE).contains(&x) || !(0..ICON_SIZE).contains(&y) {
            return false;
        }
        self.rows[y as usize] & (0x80 >> x) != 0
    }

    /// Draw the set pixels with `color`; clear pixels are left untouched
    pub fn draw(&self, display: &mut dyn DisplaySurface, x: i32, y: i32, color: Color) {
        for dy in 0..ICON_SIZE {
            for dx in 0..ICON_SIZE {
                if self.is_set(dx, dy) {
                    display.pixel(x + dx, y + dy, color);
                }
            }
        }
    }
}
