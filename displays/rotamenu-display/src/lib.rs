//! Display surfaces for rotamenu
//!
//! - [`GraphicsSurface`]: runs the menu on any `embedded-graphics` target
//!   with binary colour
//! - [`FrameBuffer`]: 128x64 page-organised buffer, the memory layout of
//!   SH1106/SSD1306 controllers
//! - [`Sh1106`]: blocking I2C driver pushing a [`FrameBuffer`] to the panel

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod framebuffer;
pub mod sh1106;
pub mod surface;

pub use framebuffer::FrameBuffer;
pub use sh1106::Sh1106;
pub use surface::{Flush, GraphicsSurface};
