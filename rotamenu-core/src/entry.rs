//! Menu entries
//!
//! One navigable row: identity, label template, visibility and enablement,
//! focus and selection flags, and an optional controller.

use alloc::string::String;
use core::fmt;

use rotamenu_hal::{Color, DisplaySurface};

use crate::config::{Code, Label, MenuConfig};
use crate::controller::{format_label, Controller};
use crate::icon;

/// One row of a menu
#[derive(Debug)]
pub struct MenuEntry {
    code: Code,
    label: Label,
    enabled: bool,
    visible: bool,
    focus: bool,
    selected: bool,
    /// Stamp of the last `selected = true`, for the highlight decay
    selected_at: Option<u64>,
    controller: Option<Controller>,
}

impl MenuEntry {
    pub(crate) fn new(code: Code, label: Label, enabled: bool) -> Self {
        Self {
            code,
            label,
            enabled,
            visible: true,
            focus: false,
            selected: false,
            selected_at: None,
            controller: None,
        }
    }

    pub(crate) fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Identity, unique within its menu
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Label template as given at construction
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Label with the controller's value or choice substituted
    pub fn formatted_label(&self) -> String {
        format_label(
            &self.label,
            self.controller.as_ref().and_then(Controller::substitution),
        )
    }

    /// Check if focus may land on this entry
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the entry; disabled entries stay visible
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the entry is drawn at all
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the entry
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if focus traversal may stop here
    pub fn is_traversable(&self) -> bool {
        self.visible && self.enabled
    }

    /// Check if this entry has focus
    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, focus: bool) {
        self.focus = focus;
    }

    /// Check if this entry is the logical selection
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Set the selection flag; selecting stamps `now_ms`
    pub fn set_selected(&mut self, selected: bool, now_ms: u64) {
        self.selected = selected;
        if selected {
            self.selected_at = Some(now_ms);
        }
    }

    /// Time of the most recent selection
    pub fn selected_at(&self) -> Option<u64> {
        self.selected_at
    }

    /// Check if the row should be drawn highlighted
    ///
    /// A selection may be cleared within a single cycle, so the highlight
    /// lingers for `highlight_ms` after it was set.
    pub fn is_highlighted(&self, now_ms: u64, highlight_ms: u32) -> bool {
        self.selected
            || self
                .selected_at
                .is_some_and(|at| now_ms.saturating_sub(at) < u64::from(highlight_ms))
    }

    /// Attached controller
    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    /// Mutable access to the attached controller
    pub fn controller_mut(&mut self) -> Option<&mut Controller> {
        self.controller.as_mut()
    }

    /// Split borrow for delegation: label template and controller
    pub(crate) fn parts_mut(&mut self) -> (&str, Option<&mut Controller>) {
        (self.label.as_str(), self.controller.as_mut())
    }

    /// Draw the row with its top-left corner at `(x, y)`
    ///
    /// Issues drawing primitives only; the caller flushes.
    pub fn draw(
        &self,
        display: &mut dyn DisplaySurface,
        x: i32,
        y: i32,
        width: u32,
        now_ms: u64,
        config: &MenuConfig,
    ) {
        if !self.visible {
            return;
        }

        let background = Color::from_bool(self.is_highlighted(now_ms, config.highlight_ms));
        let foreground = background.inverse();
        display.rect(x, y, width, config.row_height(), background, true);

        let mut text_x = config.text_inset;
        if !self.enabled {
            icon::DISABLED.draw(display, x + 1, y + 1, foreground);
            text_x = config.disabled_text_inset;
        }
        display.text(&self.formatted_label(), x + text_x, y + 2, foreground);

        if self.focus {
            display.rect(x, y, width, config.row_height(), foreground, false);
        }
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} \"{}\">", self.code, self.formatted_label())
    }
}
