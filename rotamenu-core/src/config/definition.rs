//! Menu definitions in TOML
//!
//! A menu can be described as data instead of a sequence of `add_*` calls:
//!
//! ```toml
//! [ui]
//! selection_timeout_ms = 3000
//!
//! [[entry]]
//! kind = "label"
//! code = "start"
//! label = "Start Oven"
//!
//! [[entry]]
//! kind = "range"
//! code = "preheat"
//! label = "PreHeat {} C"
//! min = 25
//! max = 180
//! step = 5
//! default = 50
//!
//! [[entry]]
//! kind = "choice"
//! code = "mode"
//! label = "Mode: {}"
//! default = "fan"
//! options = [
//!     { code = "top", label = "Top heat" },
//!     { code = "fan", label = "Fan" },
//! ]
//! ```
//!
//! Entries keep their file order. Screen entries need a handler and are
//! only available from code.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::Deserialize;

use super::{ConfigError, MenuConfig};
use crate::engine::MenuEngine;

/// Definition loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefinitionError {
    /// Text is not valid TOML or does not match the schema
    Parse,
    /// An entry was rejected by the engine
    Config(ConfigError),
}

impl From<ConfigError> for DefinitionError {
    fn from(e: ConfigError) -> Self {
        DefinitionError::Config(e)
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::Parse => f.write_str("malformed menu definition"),
            DefinitionError::Config(e) => write!(f, "invalid menu entry: {}", e),
        }
    }
}

/// A whole menu: layout plus ordered entries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuDefinition {
    /// Layout and timing overrides
    #[serde(default)]
    pub ui: MenuConfig,
    /// Entries in display order
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntryDefinition>,
}

/// One `[[entry]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryDefinition {
    Label {
        code: String,
        label: String,
        #[serde(default = "enabled_by_default")]
        enabled: bool,
    },
    Range {
        code: String,
        label: String,
        min: i32,
        max: i32,
        #[serde(default = "unit_step")]
        step: i32,
        /// Falls back to `min`
        #[serde(default)]
        default: Option<i32>,
        #[serde(default = "enabled_by_default")]
        enabled: bool,
    },
    Choice {
        code: String,
        label: String,
        options: Vec<OptionDefinition>,
        /// Falls back to the first option
        #[serde(default)]
        default: Option<String>,
        #[serde(default = "enabled_by_default")]
        enabled: bool,
    },
}

/// One option of a choice entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionDefinition {
    pub code: String,
    pub label: String,
}

fn enabled_by_default() -> bool {
    true
}

fn unit_step() -> i32 {
    1
}

impl EntryDefinition {
    /// Entry code
    pub fn code(&self) -> &str {
        match self {
            EntryDefinition::Label { code, .. }
            | EntryDefinition::Range { code, .. }
            | EntryDefinition::Choice { code, .. } => code,
        }
    }

    /// Add this entry to `engine`
    pub fn add_to(&self, engine: &mut MenuEngine) -> Result<(), ConfigError> {
        match self {
            EntryDefinition::Label {
                code,
                label,
                enabled,
            } => {
                engine.add_label(code, label, *enabled)?;
            }
            EntryDefinition::Range {
                code,
                label,
                min,
                max,
                step,
                default,
                enabled,
            } => {
                let default = default.unwrap_or(*min);
                engine.add_range(code, label, *min, *max, *step, default, *enabled)?;
            }
            EntryDefinition::Choice {
                code,
                label,
                options,
                default,
                enabled,
            } => {
                let pairs: Vec<(&str, &str)> = options
                    .iter()
                    .map(|o| (o.code.as_str(), o.label.as_str()))
                    .collect();
                let default = match default {
                    Some(default) => default.as_str(),
                    None => pairs.first().map(|(c, _)| *c).ok_or(ConfigError::EmptyChoices)?,
                };
                engine.add_choice(code, label, &pairs, default, *enabled)?;
            }
        }
        Ok(())
    }
}

impl MenuDefinition {
    /// Parse a definition from TOML text
    pub fn from_toml(text: &str) -> Result<Self, DefinitionError> {
        toml::from_str(text).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu definition: TOML parse failed");
            DefinitionError::Parse
        })
    }

    /// Add every entry to `engine`, in order
    ///
    /// Stops at the first rejected entry; entries before it stay added.
    /// The `[ui]` table is not applied; see [`MenuEngine::from_definition`].
    pub fn apply(&self, engine: &mut MenuEngine) -> Result<(), ConfigError> {
        for entry in &self.entries {
            entry.add_to(engine)?;
        }
        Ok(())
    }
}

impl MenuEngine {
    /// Build an engine with the definition's layout and entries
    pub fn from_definition(definition: &MenuDefinition) -> Result<Self, ConfigError> {
        let mut engine = MenuEngine::with_config(definition.ui)?;
        definition.apply(&mut engine)?;

        #[cfg(feature = "defmt")]
        defmt::info!("menu definition: {} entries", engine.entries().len());

        Ok(engine)
    }

    /// Parse TOML text and build an engine from it
    pub fn from_toml(text: &str) -> Result<Self, DefinitionError> {
        let definition = MenuDefinition::from_toml(text)?;
        Ok(Self::from_definition(&definition)?)
    }
}
