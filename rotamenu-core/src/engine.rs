//! Menu engine
//!
//! Owns the entry list and all navigation state. The engine is driven by
//! calling [`MenuEngine::update`] in a tight loop; every call samples the
//! encoder once, advances the state machine by one step and redraws.
//!
//! # States
//!
//! ```text
//!            button edge (plain entry)
//!   Idle ─────────────────────────────▶ SelectedPlain
//!    ▲  ▲                                  │
//!    │  └──── read once / 5 s timeout ─────┘
//!    │
//!    │       button edge (entry with controller) + start()
//!    ├──────────────────────────────────▶ SelectedDelegated
//!    │                                     │ controller confirms
//!    └──────────── read once ──────────────┘
//! ```
//!
//! While delegated, each cycle goes to the controller and the engine itself
//! neither moves focus nor draws.

use alloc::vec::Vec;

use rotamenu_hal::Color;

use crate::config::{make_code, make_label, ConfigError, MenuConfig};
use crate::controller::{
    ChoiceController, Controller, RangeController, ScreenController, ScreenHandler,
};
use crate::entry::MenuEntry;
use crate::error::MenuError;
use crate::io::Io;
use crate::state::EngineState;

/// Navigation and selection state machine over a list of entries
#[derive(Debug)]
pub struct MenuEngine {
    config: MenuConfig,
    entries: Vec<MenuEntry>,
    /// First entry eligible for the top row; a visible entry or `len()`
    viewport_top: usize,
    focus: Option<usize>,
    selection: Option<usize>,
    /// When the current selection was committed
    selection_time: u64,
    button_latched: bool,
    /// Display height seen at the last start/update, for scrolling
    view_height: u32,
}

impl Default for MenuEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuEngine {
    /// Create an empty engine with the default layout
    pub fn new() -> Self {
        Self::unchecked(MenuConfig::default())
    }

    /// Create an empty engine with a custom layout
    ///
    /// Fails if `config` does not pass [`MenuConfig::validate`].
    pub fn with_config(config: MenuConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: MenuConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            viewport_top: 0,
            focus: None,
            selection: None,
            selection_time: 0,
            button_latched: false,
            view_height: 0,
        }
    }

    /// Layout and timing configuration
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Add a plain entry
    pub fn add_label(
        &mut self,
        code: &str,
        label: &str,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        let entry = self.new_entry(code, label, enabled)?;
        Ok(self.push(entry))
    }

    /// Add an entry that edits an integer in `[min, max]`
    #[allow(clippy::too_many_arguments)]
    pub fn add_range(
        &mut self,
        code: &str,
        label: &str,
        min: i32,
        max: i32,
        step: i32,
        default: i32,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        let entry = self.new_entry(code, label, enabled)?;
        let range = RangeController::new(min, max, step, default)?;
        Ok(self.push(entry.with_controller(Controller::Range(range))))
    }

    /// Add an entry that picks one of `options` (`(code, label)` pairs)
    pub fn add_choice(
        &mut self,
        code: &str,
        label: &str,
        options: &[(&str, &str)],
        default: &str,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        let entry = self.new_entry(code, label, enabled)?;
        let choice = ChoiceController::new(options, default)?;
        Ok(self.push(entry.with_controller(Controller::Choice(choice))))
    }

    /// Add an entry that hands the screen to `handler`
    pub fn add_screen(
        &mut self,
        code: &str,
        label: &str,
        handler: impl ScreenHandler + 'static,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        let entry = self.new_entry(code, label, enabled)?;
        let screen = ScreenController::new(handler);
        Ok(self.push(entry.with_controller(Controller::Screen(screen))))
    }

    /// Add an entry that hands the screen to a render closure
    pub fn add_screen_fn<F>(
        &mut self,
        code: &str,
        label: &str,
        render: F,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError>
    where
        F: FnMut(&mut Io<'_>) -> Result<(), MenuError> + 'static,
    {
        let entry = self.new_entry(code, label, enabled)?;
        let screen = ScreenController::from_fn(render);
        Ok(self.push(entry.with_controller(Controller::Screen(screen))))
    }

    fn new_entry(&self, code: &str, label: &str, enabled: bool) -> Result<MenuEntry, ConfigError> {
        if self.find_entry(code).is_some() {
            return Err(ConfigError::DuplicateCode);
        }
        Ok(MenuEntry::new(make_code(code)?, make_label(label)?, enabled))
    }

    fn push(&mut self, entry: MenuEntry) -> &mut MenuEntry {
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// All entries in insertion order
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Entry at `index`
    pub fn entry(&self, index: usize) -> Option<&MenuEntry> {
        self.entries.get(index)
    }

    /// Find an entry by code
    pub fn find_entry(&self, code: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.code().as_str() == code)
    }

    /// Find an entry by code for modification
    pub fn find_entry_mut(&mut self, code: &str) -> Option<&mut MenuEntry> {
        self.entries.iter_mut().find(|e| e.code().as_str() == code)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Reset viewport, focus and input state
    ///
    /// Must be called once before the first [`update`](Self::update).
    pub fn start(&mut self, io: &mut Io<'_>) -> Result<(), MenuError> {
        self.view_height = io.display.height();
        self.clear_selection();
        self.viewport_top = self.first_visible_from(0);
        let first = self.next_traversable(0);
        self.apply_focus(first);
        io.input.reset()?;
        self.button_latched = io.input.button()?;
        Ok(())
    }

    /// Advance the state machine by one polling cycle
    ///
    /// Returns `true` while a selection is pending, plain or delegated.
    pub fn update(&mut self, io: &mut Io<'_>) -> Result<bool, MenuError> {
        if let Some(index) = self.selection {
            let config = self.config;
            let (label, controller) = self.entries[index].parts_mut();
            if let Some(controller) = controller {
                // A confirmed controller waits for the caller's read
                if !controller.is_confirmed() && controller.update(label, io, &config)? {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("menu: controller on entry {} confirmed", index);
                }
                return Ok(true);
            }
        }

        let now = io.now_ms();
        self.view_height = io.display.height();

        if self.selection.is_some()
            && now.saturating_sub(self.selection_time) > u64::from(self.config.selection_timeout_ms)
        {
            #[cfg(feature = "defmt")]
            defmt::trace!("menu: unread selection expired");
            self.clear_selection();
        }

        self.repair_focus();

        let position = io.input.relative_position()?;
        if position.unsigned_abs() > self.config.focus_threshold.unsigned_abs() {
            if position > 0 {
                self.focus_next();
            } else {
                self.focus_prev();
            }
            io.input.reset()?;
        }

        // Commit on the transition from released to pressed
        let pressed = io.input.button()?;
        let mut committed = None;
        if pressed && !self.button_latched {
            self.set_selection(self.focus, now);
            self.selection_time = now;
            committed = self.focus;
        }
        self.button_latched = pressed;

        self.draw(io)?;

        if let Some(index) = committed {
            #[cfg(feature = "defmt")]
            defmt::debug!("menu: committed entry {}", index);
            let config = self.config;
            if let Some(controller) = self.entries[index].controller_mut() {
                controller.start(io, &config)?;
            }
        }

        Ok(self.selection.is_some())
    }

    /// Read the selection, clearing it unless a controller is still active
    ///
    /// Returns `None` while nothing is selected and while the selected
    /// entry's controller has not confirmed yet. Otherwise the selection is
    /// cleared and the entry returned, so each selection is reported once.
    pub fn current_selection(&mut self) -> Option<&MenuEntry> {
        let index = self.selection?;
        if let Some(controller) = self.entries[index].controller() {
            if !controller.is_confirmed() {
                return None;
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: selection {} read", index);
        self.clear_selection();
        Some(&self.entries[index])
    }

    /// Selected entry without clearing it
    pub fn pending_selection(&self) -> Option<&MenuEntry> {
        self.selection.map(|index| &self.entries[index])
    }

    /// Current state of the selection machine
    pub fn state(&self) -> EngineState {
        match self.selection {
            None => EngineState::Idle,
            Some(index) => match self.entries[index].controller() {
                None => EngineState::SelectedPlain,
                Some(controller) => EngineState::SelectedDelegated {
                    confirmed: controller.is_confirmed(),
                },
            },
        }
    }

    fn set_selection(&mut self, index: Option<usize>, now_ms: u64) {
        self.selection = index;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.set_selected(Some(i) == index, now_ms);
        }
    }

    fn clear_selection(&mut self) {
        self.set_selection(None, 0);
    }

    // ------------------------------------------------------------------
    // Focus and viewport
    // ------------------------------------------------------------------

    /// Index of the focused entry
    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    /// Index of the entry drawn on the top row
    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    /// First visible entry at or after `from`, or `len()` if none
    pub fn first_visible_from(&self, from: usize) -> usize {
        (from..self.entries.len())
            .find(|&i| self.entries[i].is_visible())
            .unwrap_or(self.entries.len())
    }

    /// Focus the entry at `index`, scrolling it into view
    ///
    /// Refuses (and returns `false` for) indices that are out of range,
    /// hidden or disabled.
    pub fn set_focus(&mut self, index: usize) -> bool {
        match self.entries.get(index) {
            Some(entry) if entry.is_traversable() => {
                self.apply_focus(Some(index));
                true
            }
            _ => false,
        }
    }

    /// Move focus to the next traversable entry; stops at the last one
    pub fn focus_next(&mut self) {
        let Some(current) = self.focus else {
            return;
        };
        if let Some(next) = self.next_traversable(current + 1) {
            self.apply_focus(Some(next));
        }
    }

    /// Move focus to the previous traversable entry; stops at the first one
    pub fn focus_prev(&mut self) {
        let Some(current) = self.focus else {
            return;
        };
        if let Some(prev) = current.checked_sub(1).and_then(|i| self.prev_traversable(i)) {
            self.apply_focus(Some(prev));
        }
    }

    fn next_traversable(&self, from: usize) -> Option<usize> {
        (from..self.entries.len()).find(|&i| self.entries[i].is_traversable())
    }

    fn prev_traversable(&self, from: usize) -> Option<usize> {
        (0..=from.min(self.entries.len().checked_sub(1)?))
            .rev()
            .find(|&i| self.entries[i].is_traversable())
    }

    fn apply_focus(&mut self, index: Option<usize>) {
        self.focus = index;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.set_focus(Some(i) == index);
        }
        if let Some(index) = index {
            self.scroll_to(index);
        }
    }

    /// Minimal scroll that keeps row `index` fully on screen
    fn scroll_to(&mut self, index: usize) {
        if index < self.viewport_top {
            self.viewport_top = index;
            return;
        }
        let last_row = self.config.last_full_row(self.view_height);
        while self.viewport_top < index && self.visible_rows_between(self.viewport_top, index) > last_row
        {
            self.viewport_top = self.first_visible_from(self.viewport_top + 1);
        }
    }

    fn visible_rows_between(&self, from: usize, to: usize) -> usize {
        self.entries[from..to]
            .iter()
            .filter(|e| e.is_visible())
            .count()
    }

    /// Re-establish the focus and viewport invariants after the caller
    /// hid or disabled entries
    fn repair_focus(&mut self) {
        self.viewport_top = self.first_visible_from(self.viewport_top);
        match self.focus {
            Some(index) if self.entries[index].is_traversable() => self.scroll_to(index),
            current => {
                let from = current.unwrap_or(0);
                let target = self
                    .next_traversable(from)
                    .or_else(|| self.prev_traversable(from));
                self.apply_focus(target);
            }
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draw the visible part of the list and flush once
    pub fn draw(&self, io: &mut Io<'_>) -> Result<(), MenuError> {
        let now = io.now_ms();
        let height = io.display.height();
        let x = self.config.x_offset;
        let width = io
            .display
            .width()
            .saturating_sub(x.max(0).unsigned_abs());

        io.display.fill(Color::Off);

        let mut y: u32 = 0;
        for entry in self.entries.iter().skip(self.viewport_top) {
            if y >= height {
                break;
            }
            // Hidden entries take no room
            if !entry.is_visible() {
                continue;
            }
            entry.draw(io.display, x, y as i32, width, now, &self.config);
            y += self.config.item_height;
        }

        io.display.show()?;
        Ok(())
    }
}
