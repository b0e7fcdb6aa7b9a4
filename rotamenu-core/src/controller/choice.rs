//! One-of-many picker
//!
//! On start the picker builds a nested [`MenuEngine`] listing its options,
//! the current one marked with `>` and the others with `:`. The nested menu
//! runs on the parent's display and encoder until an option is chosen, then
//! it is dropped.

use alloc::boxed::Box;
use alloc::vec::Vec;

use rotamenu_hal::Color;

use super::wait_for_release;
use crate::config::{make_code, make_label, Code, ConfigError, Label, MenuConfig, MAX_LABEL_LEN};
use crate::engine::MenuEngine;
use crate::error::MenuError;
use crate::io::Io;

/// Marker in front of the current option
const CURRENT_MARK: char = '>';
/// Marker in front of the other options
const OTHER_MARK: char = ':';

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChoiceOption {
    /// Value reported when chosen
    pub code: Code,
    /// Text shown for it
    pub label: Label,
}

/// Choice picker backed by a nested menu
#[derive(Debug)]
pub struct ChoiceController {
    options: Vec<ChoiceOption>,
    current: Code,
    confirmed: bool,
    submenu: Option<Box<MenuEngine>>,
}

impl ChoiceController {
    /// Create a picker over `(code, label)` pairs with `default` selected
    ///
    /// Rejects an empty list, duplicate option codes, labels with no room
    /// for the marker and a default that is not one of the codes.
    pub fn new(options: &[(&str, &str)], default: &str) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyChoices);
        }

        let mut list: Vec<ChoiceOption> = Vec::with_capacity(options.len());
        for (code, label) in options {
            if label.len() + 1 > MAX_LABEL_LEN {
                return Err(ConfigError::LabelTooLong);
            }
            let option = ChoiceOption {
                code: make_code(code)?,
                label: make_label(label)?,
            };
            if list.iter().any(|o| o.code == option.code) {
                return Err(ConfigError::DuplicateCode);
            }
            list.push(option);
        }

        if !list.iter().any(|o| o.code.as_str() == default) {
            return Err(ConfigError::UnknownDefault);
        }

        Ok(Self {
            options: list,
            current: make_code(default)?,
            confirmed: false,
            submenu: None,
        })
    }

    /// Code of the current choice
    pub fn value(&self) -> &str {
        self.current.as_str()
    }

    /// Label of the current choice
    pub fn label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.code == self.current)
            .map(|o| o.label.as_str())
    }

    /// Make `code` the current choice
    ///
    /// Returns `false` and changes nothing if `code` is not an option.
    pub fn set_value(&mut self, code: &str) -> bool {
        match self.options.iter().find(|o| o.code.as_str() == code) {
            Some(option) => {
                self.current = option.code.clone();
                true
            }
            None => false,
        }
    }

    /// All options in display order
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Check if the user confirmed since the last `start`
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Check if the nested menu is currently running
    pub fn is_open(&self) -> bool {
        self.submenu.is_some()
    }

    /// The nested menu while it runs
    pub fn submenu(&self) -> Option<&MenuEngine> {
        self.submenu.as_deref()
    }

    pub(crate) fn start(&mut self, io: &mut Io<'_>, config: &MenuConfig) -> Result<(), MenuError> {
        wait_for_release(io, config)?;
        self.confirmed = false;
        io.display.fill(Color::Off);
        io.display.show()?;

        let mut submenu = MenuEngine::with_config(*config)?;
        let mut focus = None;
        for (index, option) in self.options.iter().enumerate() {
            let is_current = option.code == self.current;
            let mut label = Label::new();
            // Room for the marker is checked at construction
            let _ = label.push(if is_current { CURRENT_MARK } else { OTHER_MARK });
            let _ = label.push_str(&option.label);
            submenu.add_label(&option.code, &label, true)?;
            if is_current {
                focus = Some(index);
            }
        }
        submenu.start(io)?;
        if let Some(index) = focus {
            submenu.set_focus(index);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("choice: opened with {} options", self.options.len());

        self.submenu = Some(Box::new(submenu));
        Ok(())
    }

    pub(crate) fn update(&mut self, io: &mut Io<'_>) -> Result<bool, MenuError> {
        let Some(submenu) = self.submenu.as_mut() else {
            return Ok(self.confirmed);
        };

        if submenu.update(io)? {
            let chosen = submenu.current_selection().map(|entry| entry.code().clone());
            if let Some(code) = chosen {
                #[cfg(feature = "defmt")]
                defmt::debug!("choice: picked {}", code.as_str());

                self.current = code;
                self.confirmed = true;
                self.submenu = None;
                // Leftover motion must not leak into the resumed parent
                io.input.reset()?;
            }
        }
        Ok(self.confirmed)
    }
}
