//! Runtime error type

use core::fmt;

use rotamenu_hal::{DisplayError, InputError};

use crate::config::ConfigError;

/// Errors surfaced by `start`/`update`
///
/// Capability failures are passed through untouched; the engine has no
/// retry policy, so callers should treat them as fatal to the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Display surface failed to flush
    Display(DisplayError),
    /// Encoder read or reset failed
    Input(InputError),
    /// A nested menu could not be built
    Config(ConfigError),
}

impl From<DisplayError> for MenuError {
    fn from(e: DisplayError) -> Self {
        MenuError::Display(e)
    }
}

impl From<InputError> for MenuError {
    fn from(e: InputError) -> Self {
        MenuError::Input(e)
    }
}

impl From<ConfigError> for MenuError {
    fn from(e: ConfigError) -> Self {
        MenuError::Config(e)
    }
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::Display(e) => write!(f, "display: {}", e),
            MenuError::Input(e) => write!(f, "input: {}", e),
            MenuError::Config(e) => write!(f, "config: {}", e),
        }
    }
}
