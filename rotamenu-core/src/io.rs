//! Borrowed hardware bundle
//!
//! The engine owns no hardware. Each call that touches the screen or the
//! encoder receives an [`Io`], so a nested menu can run on exactly the same
//! display, encoder and clock as its parent.

use rotamenu_hal::{Clock, DisplaySurface, RotaryInput};

/// Display, encoder and clock borrowed for one engine call
pub struct Io<'a> {
    /// Target of all drawing
    pub display: &'a mut dyn DisplaySurface,
    /// Source of motion and button state
    pub input: &'a mut dyn RotaryInput,
    /// Time base for highlight decay, timeouts and the release wait
    pub clock: &'a mut dyn Clock,
}

impl<'a> Io<'a> {
    /// Bundle the three capabilities
    pub fn new(
        display: &'a mut dyn DisplaySurface,
        input: &'a mut dyn RotaryInput,
        clock: &'a mut dyn Clock,
    ) -> Self {
        Self {
            display,
            input,
            clock,
        }
    }

    /// Current time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
