//! Entry controllers
//!
//! A controller is attached to an entry that does more than report that it
//! was chosen. When the entry is committed, the engine calls
//! [`Controller::start`] and then forwards every polling cycle to
//! [`Controller::update`] until the controller confirms.
//!
//! Every variant states at the type level what, if anything, it substitutes
//! into the entry's label template (see [`Controller::substitution`]).

pub mod choice;
pub mod range;
pub mod screen;

pub use choice::{ChoiceController, ChoiceOption};
pub use range::RangeController;
pub use screen::{FnScreen, ScreenController, ScreenHandler};

use alloc::string::String;
use core::fmt::{self, Write};

use rotamenu_hal::clock::DelayNs;

use crate::config::{MenuConfig, PLACEHOLDER};
use crate::error::MenuError;
use crate::io::Io;

/// Behaviour attached to a menu entry
#[derive(Debug)]
pub enum Controller {
    /// Numeric value picker
    Range(RangeController),
    /// One-of-many picker backed by a nested menu
    Choice(ChoiceController),
    /// Caller-drawn screen
    Screen(ScreenController),
}

/// Text a controller contributes to its entry's label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution<'a> {
    /// Current numeric value
    Value(i32),
    /// Label of the current choice
    Label(&'a str),
    /// Current choice code that matches no option
    Unknown(&'a str),
}

impl fmt::Display for Substitution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Value(v) => write!(f, "{}", v),
            Substitution::Label(label) => f.write_str(label),
            Substitution::Unknown(code) => write!(f, "?{}?", code),
        }
    }
}

impl Controller {
    /// Take over from the menu
    ///
    /// Blocks until the button that activated the entry is released.
    pub fn start(&mut self, io: &mut Io<'_>, config: &MenuConfig) -> Result<(), MenuError> {
        match self {
            Controller::Range(c) => c.start(io, config),
            Controller::Choice(c) => c.start(io, config),
            Controller::Screen(c) => c.start(io, config),
        }
    }

    /// Run one polling cycle; returns `true` once the user confirmed
    ///
    /// `label` is the owning entry's template, used by controllers that
    /// echo it on their own screen.
    pub fn update(
        &mut self,
        label: &str,
        io: &mut Io<'_>,
        config: &MenuConfig,
    ) -> Result<bool, MenuError> {
        match self {
            Controller::Range(c) => c.update(label, io, config),
            Controller::Choice(c) => c.update(io),
            Controller::Screen(c) => c.update(io),
        }
    }

    /// Check if the user confirmed since the last `start`
    pub fn is_confirmed(&self) -> bool {
        match self {
            Controller::Range(c) => c.is_confirmed(),
            Controller::Choice(c) => c.is_confirmed(),
            Controller::Screen(c) => c.is_confirmed(),
        }
    }

    /// Text substituted into the entry label, if this variant has any
    pub fn substitution(&self) -> Option<Substitution<'_>> {
        match self {
            Controller::Range(c) => Some(Substitution::Value(c.value())),
            Controller::Choice(c) => Some(match c.label() {
                Some(label) => Substitution::Label(label),
                None => Substitution::Unknown(c.value()),
            }),
            Controller::Screen(_) => None,
        }
    }

    /// The range picker, if this is one
    pub fn as_range(&self) -> Option<&RangeController> {
        match self {
            Controller::Range(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to the range picker
    pub fn as_range_mut(&mut self) -> Option<&mut RangeController> {
        match self {
            Controller::Range(c) => Some(c),
            _ => None,
        }
    }

    /// The choice picker, if this is one
    pub fn as_choice(&self) -> Option<&ChoiceController> {
        match self {
            Controller::Choice(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to the choice picker
    pub fn as_choice_mut(&mut self) -> Option<&mut ChoiceController> {
        match self {
            Controller::Choice(c) => Some(c),
            _ => None,
        }
    }

    /// The screen controller, if this is one
    pub fn as_screen(&self) -> Option<&ScreenController> {
        match self {
            Controller::Screen(c) => Some(c),
            _ => None,
        }
    }
}

/// Reset the encoder and wait until the button is released
///
/// The press that activated a controller must not also count as its
/// confirmation, so this polls every `release_poll_ms` until the button
/// reads released.
pub(crate) fn wait_for_release(io: &mut Io<'_>, config: &MenuConfig) -> Result<(), MenuError> {
    io.input.reset()?;
    while io.input.button()? {
        io.clock.delay_ms(config.release_poll_ms);
    }
    Ok(())
}

/// Render a label template, replacing the first `{}` with `substitution`
///
/// Templates without a placeholder, or entries without a substitution, are
/// returned unchanged.
pub fn format_label(template: &str, substitution: Option<Substitution<'_>>) -> String {
    let mut out = String::new();
    match (substitution, template.find(PLACEHOLDER)) {
        (Some(sub), Some(at)) => {
            out.push_str(&template[..at]);
            let _ = write!(out, "{}", sub);
            out.push_str(&template[at + PLACEHOLDER.len()..]);
        }
        _ => out.push_str(template),
    }
    out
}
