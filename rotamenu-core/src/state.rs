//! Engine states
//!
//! The engine does not store this enum; it is derived from the selection
//! index and the selected entry's controller so it can never disagree with
//! them.

/// Observable engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Nothing selected; the encoder moves focus
    Idle,
    /// A plain entry was committed and waits for the caller to read it
    SelectedPlain,
    /// The selected entry's controller owns input and drawing
    SelectedDelegated {
        /// The controller reported completion and waits to be read
        confirmed: bool,
    },
}

impl EngineState {
    /// Check if a selection is pending
    pub fn has_selection(&self) -> bool {
        !matches!(self, EngineState::Idle)
    }

    /// Check if a controller currently owns the screen
    pub fn is_delegated(&self) -> bool {
        matches!(self, EngineState::SelectedDelegated { confirmed: false })
    }
}
