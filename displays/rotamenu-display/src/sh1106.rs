//! SH1106 OLED Display Driver
//!
//! Blocking driver for 128x64 SH1106-based OLED displays via I2C. Drawing
//! goes to an in-memory [`FrameBuffer`]; [`Flush::flush`] pushes all pages.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;
use rotamenu_hal::DisplayError;

use crate::framebuffer::{FrameBuffer, PAGES, WIDTH};
use crate::surface::Flush;

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const DEFAULT_ADDR: u8 = 0x3C;

/// The controller RAM is 132 columns wide; 128-column panels start at 2
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte announcing a command
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing display data
const CONTROL_DATA: u8 = 0x40;

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer,
}

impl<I2C: I2c> Sh1106<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,                  // Enable charge pump
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("sh1106: initialized at {:#x}", self.address);

        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Communication)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    /// The frame being drawn
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<I2C> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.clear(color)
    }
}

impl<I2C: I2c> Flush for Sh1106<I2C> {
    fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            if let Some(bytes) = self.buffer.page(page) {
                data[1..].copy_from_slice(bytes);
            }
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        self.buffer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_sends_commands() {
        let mut oled = Sh1106::new(MockI2c::default());
        oled.init().unwrap();

        let i2c = oled.release();
        assert_eq!(i2c.writes.first().unwrap(), &(0x3C, std::vec![0x00, 0xAE]));
        assert_eq!(i2c.writes.last().unwrap(), &(0x3C, std::vec![0x00, 0xAF]));
    }

    #[test]
    fn test_flush_streams_pages_with_offset() {
        let mut oled = Sh1106::with_address(MockI2c::default(), 0x3D);
        Pixel(Point::new(0, 9), BinaryColor::On)
            .draw(&mut oled)
            .unwrap();
        oled.flush().unwrap();
        assert_eq!(oled.buffer().frames(), 1);

        let i2c = oled.release();
        // Four writes per page: page, low column, high column, data
        assert_eq!(i2c.writes.len(), PAGES * 4);
        assert_eq!(i2c.writes[4].1, std::vec![0x00, 0xB1]);
        assert_eq!(i2c.writes[5].1, std::vec![0x00, 0x02]);
        let data = &i2c.writes[7].1;
        assert_eq!(data.len(), WIDTH + 1);
        assert_eq!(data[0], 0x40);
        assert_eq!(data[1], 0b0000_0010);
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == 0x3D));
    }

    #[test]
    fn test_bus_failure_maps_to_display_error() {
        let mut oled = Sh1106::new(MockI2c {
            fail: true,
            ..Default::default()
        });
        assert_eq!(oled.init(), Err(DisplayError::Communication));
        assert_eq!(oled.flush(), Err(DisplayError::Communication));
        assert_eq!(oled.buffer().frames(), 0);
    }
}
