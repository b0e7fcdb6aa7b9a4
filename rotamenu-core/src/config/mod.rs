//! Menu configuration
//!
//! Layout and timing knobs shared by the engine and its controllers, the
//! capacity limits for codes and labels, and the construction-time error
//! type.

#[cfg(feature = "toml")]
pub mod definition;

#[cfg(feature = "toml")]
pub use definition::{DefinitionError, EntryDefinition, MenuDefinition, OptionDefinition};

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum entry code length
pub const MAX_CODE_LEN: usize = 16;

/// Maximum label template length
pub const MAX_LABEL_LEN: usize = 32;

/// Placeholder replaced by a controller's value or label
pub const PLACEHOLDER: &str = "{}";

/// Entry identity
pub type Code = String<MAX_CODE_LEN>;

/// Label template
pub type Label = String<MAX_LABEL_LEN>;

/// Layout and timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Row pitch in pixels; each row is drawn `item_height + 2` tall
    pub item_height: u32,
    /// Left margin of every row
    pub x_offset: i32,
    /// Label offset inside an enabled row
    pub text_inset: i32,
    /// Label offset inside a disabled row (room for the icon)
    pub disabled_text_inset: i32,
    /// Minimum time a selected row stays highlighted
    pub highlight_ms: u32,
    /// Age after which an unread plain selection is dropped
    pub selection_timeout_ms: u32,
    /// Encoder travel needed to move focus by one entry
    pub focus_threshold: i32,
    /// Encoder travel needed to step a range value
    pub value_threshold: i32,
    /// Poll interval while waiting for the button to be released
    pub release_poll_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_height: 10,
            x_offset: 4,
            text_inset: 1,
            disabled_text_inset: 11,
            highlight_ms: 750,
            selection_timeout_ms: 5000,
            focus_threshold: 3,
            value_threshold: 1,
            release_poll_ms: 10,
        }
    }
}

impl MenuConfig {
    /// Full height of a drawn row, border included
    pub const fn row_height(&self) -> u32 {
        self.item_height.saturating_add(2)
    }

    /// Index of the last row that fits entirely on a display `height` tall
    pub fn last_full_row(&self, height: u32) -> usize {
        if self.item_height == 0 {
            return 0;
        }
        (height.saturating_sub(self.row_height()) / self.item_height) as usize
    }

    /// Check the knobs the engine relies on
    ///
    /// Rows must be at least one pixel apart with room for their border,
    /// and motion thresholds cannot be negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height == 0 || self.item_height.checked_add(2).is_none() {
            return Err(ConfigError::InvalidLayout);
        }
        if self.focus_threshold < 0 || self.value_threshold < 0 {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }
}

/// Menu construction errors
///
/// Raised by the `add_*` builders; the offending entry is not added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Another entry already uses this code
    DuplicateCode,
    /// Code longer than [`MAX_CODE_LEN`]
    CodeTooLong,
    /// Label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// Range with `min > max`
    InvalidBounds,
    /// Range step not strictly positive
    InvalidStep,
    /// Range default outside `[min, max]`
    DefaultOutOfRange,
    /// Choice list without options
    EmptyChoices,
    /// Choice default not among the option codes
    UnknownDefault,
    /// Row pitch of zero or too large to draw
    InvalidLayout,
    /// Negative motion threshold
    InvalidThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::DuplicateCode => "duplicate entry code",
            ConfigError::CodeTooLong => "entry code too long",
            ConfigError::LabelTooLong => "label too long",
            ConfigError::InvalidBounds => "range minimum exceeds maximum",
            ConfigError::InvalidStep => "range step must be positive",
            ConfigError::DefaultOutOfRange => "range default outside bounds",
            ConfigError::EmptyChoices => "choice list is empty",
            ConfigError::UnknownDefault => "choice default is not an option",
            ConfigError::InvalidLayout => "item height out of range",
            ConfigError::InvalidThreshold => "motion threshold is negative",
        };
        f.write_str(msg)
    }
}

/// Build a code, rejecting over-long input
pub fn make_code(code: &str) -> Result<Code, ConfigError> {
    Code::try_from(code).map_err(|_| ConfigError::CodeTooLong)
}

/// Build a label template, rejecting over-long input
pub fn make_label(label: &str) -> Result<Label, ConfigError> {
    Label::try_from(label).map_err(|_| ConfigError::LabelTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_fits_six_rows() {
        let config = MenuConfig::default();
        // 128x64 panel: rows 0..=5 fit entirely (row 5 ends at 62)
        assert_eq!(config.last_full_row(64), 5);
        assert_eq!(config.row_height(), 12);
    }

    #[test]
    fn test_validate_rejects_bad_knobs() {
        assert_eq!(MenuConfig::default().validate(), Ok(()));

        let zero = MenuConfig {
            item_height: 0,
            ..MenuConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::InvalidLayout));

        let huge = MenuConfig {
            item_height: u32::MAX,
            ..MenuConfig::default()
        };
        assert_eq!(huge.validate(), Err(ConfigError::InvalidLayout));
        assert_eq!(huge.row_height(), u32::MAX);
        assert_eq!(huge.last_full_row(64), 0);

        let backwards = MenuConfig {
            value_threshold: -1,
            ..MenuConfig::default()
        };
        assert_eq!(backwards.validate(), Err(ConfigError::InvalidThreshold));

        let focus = MenuConfig {
            focus_threshold: -3,
            ..MenuConfig::default()
        };
        assert_eq!(focus.validate(), Err(ConfigError::InvalidThreshold));

        let still = MenuConfig {
            value_threshold: 0,
            ..MenuConfig::default()
        };
        assert_eq!(still.validate(), Ok(()));
    }

    #[test]
    fn test_tiny_display_still_has_one_row() {
        let config = MenuConfig::default();
        assert_eq!(config.last_full_row(8), 0);
    }

    #[test]
    fn test_code_and_label_limits() {
        assert!(make_code("preheat").is_ok());
        assert_eq!(
            make_code("a-code-that-is-way-too-long"),
            Err(ConfigError::CodeTooLong)
        );
        assert_eq!(
            make_label("a label template that overflows the limit"),
            Err(ConfigError::LabelTooLong)
        );
    }
}
