//! rotamenu Hardware Abstraction Layer
//!
//! This crate defines the capabilities the menu engine drives. Board or host
//! code implements them for its actual panel and encoder; the engine never
//! talks to hardware directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (polling loop)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotamenu-core (engine, controllers)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotamenu-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//! ┌─────────────┐ ┌─────────┐ ┌─────────┐
//! │ OLED panel  │ │ encoder │ │  clock  │
//! └─────────────┘ └─────────┘ └─────────┘
//! ```
//!
//! # Traits
//!
//! - [`display::DisplaySurface`] - Monochrome raster primitives
//! - [`input::RotaryInput`] - Relative encoder with push button
//! - [`clock::Clock`] - Millisecond time base and blocking delay

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod input;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use display::{Color, DisplayError, DisplaySurface};
pub use input::{InputError, RotaryInput};
