//! Rotary input abstraction
//!
//! A relative encoder: the device accumulates detents since the last reset
//! and reports the push button level. Decoding and debouncing belong to the
//! implementation.

use core::fmt;

/// Input device errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Communication error with the encoder
    Communication,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Communication => f.write_str("encoder communication failed"),
        }
    }
}

/// Relative rotary encoder with push button
pub trait RotaryInput {
    /// Signed detent count accumulated since the last [`reset`](Self::reset)
    ///
    /// Positive values mean clockwise rotation.
    fn relative_position(&mut self) -> Result<i32, InputError>;

    /// Zero the relative counter
    fn reset(&mut self) -> Result<(), InputError>;

    /// Current button level, `true` while pressed
    fn button(&mut self) -> Result<bool, InputError>;
}

impl<T: RotaryInput + ?Sized> RotaryInput for &mut T {
    fn relative_position(&mut self) -> Result<i32, InputError> {
        (**self).relative_position()
    }

    fn reset(&mut self) -> Result<(), InputError> {
        (**self).reset()
    }

    fn button(&mut self) -> Result<bool, InputError> {
        (**self).button()
    }
}
