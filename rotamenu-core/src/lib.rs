//! Board-agnostic menu engine for rotary encoder driven displays
//!
//! This crate contains all menu logic that does not depend on a specific
//! panel or encoder:
//!
//! - Menu entries with focus, selection and highlight decay
//! - Entry controllers that temporarily own the screen (value ranges,
//!   choice lists, caller-drawn screens)
//! - The polling engine: focus traversal, viewport scrolling, selection
//!   commit and delegation to controllers
//! - Layout/timing configuration and TOML menu definitions
//!
//! Hardware is reached only through the `rotamenu-hal` capabilities, bundled
//! per call in an [`Io`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod controller;
pub mod engine;
pub mod entry;
pub mod error;
pub mod icon;
pub mod io;
pub mod menu;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, MenuConfig};
#[cfg(feature = "toml")]
pub use config::{DefinitionError, MenuDefinition};
pub use controller::{
    ChoiceController, Controller, RangeController, ScreenController, ScreenHandler, Substitution,
};
pub use engine::MenuEngine;
pub use entry::MenuEntry;
pub use error::MenuError;
pub use io::Io;
pub use menu::Menu;
pub use state::EngineState;

pub use rotamenu_hal::{Clock, Color, DisplayError, DisplaySurface, InputError, RotaryInput};
