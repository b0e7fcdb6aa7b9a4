//! Hardware driver implementations
//!
//! Concrete implementations of the `rotamenu-hal` input and time
//! capabilities:
//!
//! - Quadrature rotary encoder with push button over `embedded-hal` pins
//! - Host clock (`std` feature) for simulators and desktop tests

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "std")]
pub mod clock;
pub mod encoder;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use encoder::{Direction, QuadratureEncoder};
