//! Owning menu front end
//!
//! [`Menu`] keeps the display, encoder and clock together with a
//! [`MenuEngine`], so the application loop needs no `Io` plumbing:
//!
//! ```ignore
//! let mut menu = Menu::new(display, encoder, clock);
//! menu.add_label("start", "Start Oven", true)?;
//! menu.add_range("preheat", "PreHeat {} C", 25, 180, 5, 50, true)?;
//! menu.start()?;
//!
//! loop {
//!     if menu.update()? {
//!         if let Some(entry) = menu.current_selection() {
//!             // act on entry.code()
//!         }
//!     }
//! }
//! ```

use rotamenu_hal::{Clock, DisplaySurface, RotaryInput};

use crate::config::{ConfigError, MenuConfig};
use crate::controller::ScreenHandler;
use crate::engine::MenuEngine;
use crate::entry::MenuEntry;
use crate::error::MenuError;
use crate::io::Io;
use crate::state::EngineState;

/// Menu engine bundled with the hardware it drives
pub struct Menu<D, I, C> {
    display: D,
    input: I,
    clock: C,
    engine: MenuEngine,
}

impl<D, I, C> Menu<D, I, C>
where
    D: DisplaySurface,
    I: RotaryInput,
    C: Clock,
{
    /// Create an empty menu with the default layout
    pub fn new(display: D, input: I, clock: C) -> Self {
        Self {
            display,
            input,
            clock,
            engine: MenuEngine::new(),
        }
    }

    /// Create an empty menu with a custom layout
    pub fn with_config(
        display: D,
        input: I,
        clock: C,
        config: MenuConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            display,
            input,
            clock,
            engine: MenuEngine::with_config(config)?,
        })
    }

    /// Add a plain entry
    pub fn add_label(
        &mut self,
        code: &str,
        label: &str,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        self.engine.add_label(code, label, enabled)
    }

    /// Add an integer range entry
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
        self.engine
            .add_range(code, label, min, max, step, default, enabled)
    }

    /// Add a choice entry
    pub fn add_choice(
        &mut self,
        code: &str,
        label: &str,
        options: &[(&str, &str)],
        default: &str,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        self.engine
            .add_choice(code, label, options, default, enabled)
    }

    /// Add a caller-drawn screen entry
    pub fn add_screen(
        &mut self,
        code: &str,
        label: &str,
        handler: impl ScreenHandler + 'static,
        enabled: bool,
    ) -> Result<&mut MenuEntry, ConfigError> {
        self.engine.add_screen(code, label, handler, enabled)
    }

    /// Add a screen entry drawn by a closure
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
        self.engine.add_screen_fn(code, label, render, enabled)
    }

    /// See [`MenuEngine::start`]
    pub fn start(&mut self) -> Result<(), MenuError> {
        let mut io = Io::new(&mut self.display, &mut self.input, &mut self.clock);
        self.engine.start(&mut io)
    }

    /// See [`MenuEngine::update`]
    pub fn update(&mut self) -> Result<bool, MenuError> {
        let mut io = Io::new(&mut self.display, &mut self.input, &mut self.clock);
        self.engine.update(&mut io)
    }

    /// See [`MenuEngine::current_selection`]
    pub fn current_selection(&mut self) -> Option<&MenuEntry> {
        self.engine.current_selection()
    }

    /// Current state of the selection machine
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Find an entry by code
    pub fn find_entry(&self, code: &str) -> Option<&MenuEntry> {
        self.engine.find_entry(code)
    }

    /// Find an entry by code for modification
    pub fn find_entry_mut(&mut self, code: &str) -> Option<&mut MenuEntry> {
        self.engine.find_entry_mut(code)
    }

    /// The engine behind this menu
    pub fn engine(&self) -> &MenuEngine {
        &self.engine
    }

    /// Mutable access to the engine
    pub fn engine_mut(&mut self) -> &mut MenuEngine {
        &mut self.engine
    }

    /// The owned display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Mutable access to the encoder, e.g. to inject motion
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The owned clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Give the hardware back
    pub fn release(self) -> (D, I, C) {
        (self.display, self.input, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SimClock, SimDisplay, SimInput};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use rotamenu_hal::Color;

    type SimMenu = Menu<SimDisplay, SimInput, SimClock>;

    fn sim_menu() -> SimMenu {
        Menu::new(SimDisplay::new(128, 64), SimInput::new(), SimClock::new())
    }

    fn step(menu: &mut SimMenu, detents: i32) -> bool {
        menu.input_mut().turn(detents);
        menu.update().unwrap()
    }

    fn click(menu: &mut SimMenu) -> bool {
        menu.input_mut().click();
        menu.update().unwrap()
    }

    /// Poll once and read, the way an application loop does
    fn poll(menu: &mut SimMenu) -> Option<String> {
        if menu.update().unwrap() {
            menu.current_selection().map(|e| e.to_string())
        } else {
            None
        }
    }

    fn oven_menu() -> SimMenu {
        let mut menu = sim_menu();
        menu.add_label("start", "Start Oven", true).unwrap();
        menu.add_label("stop", "Stop Oven", false).unwrap();
        menu.add_range("preheat", "PreHeat {} C", 25, 180, 5, 50, true)
            .unwrap();
        for i in 1..=8 {
            let code = alloc::format!("t{}", i);
            let label = alloc::format!("test{}", i);
            menu.add_label(&code, &label, true).unwrap();
        }
        menu.start().unwrap();
        menu
    }

    #[test]
    fn test_oven_menu_enables_stop_after_t3() {
        let mut menu = oven_menu();
        let mut log = Vec::new();

        // start -> preheat -> t1 -> t2 -> t3, skipping the disabled stop
        for _ in 0..4 {
            step(&mut menu, 4);
        }
        assert_eq!(menu.engine().focus_index(), Some(5));

        menu.input_mut().click();
        if let Some(entry) = poll(&mut menu) {
            if entry.contains("<t3 ") {
                menu.find_entry_mut("stop").unwrap().set_enabled(true);
            }
            log.push(entry);
        }
        assert_eq!(log, ["<t3 \"test3\">"]);

        // Walking back up now stops on the enabled entry
        for _ in 0..3 {
            step(&mut menu, -4);
        }
        assert_eq!(menu.engine().focus_index(), Some(2));
        step(&mut menu, -4);
        assert_eq!(menu.engine().focus_index(), Some(1));
        assert!(click(&mut menu));
        assert_eq!(
            menu.current_selection().unwrap().code().as_str(),
            "stop"
        );
    }

    #[test]
    fn test_oven_menu_scrolls_to_last_entry() {
        let mut menu = oven_menu();
        for _ in 0..20 {
            step(&mut menu, 4);
        }
        assert_eq!(menu.engine().focus_index(), Some(10));
        assert_eq!(menu.engine().viewport_top(), 5);

        let texts = menu.display().texts();
        assert_eq!(texts.first().unwrap().0, "test3");
        assert_eq!(texts.last().unwrap().0, "test8");
    }

    #[test]
    fn test_preheat_adjust() {
        let mut menu = oven_menu();
        step(&mut menu, 4);
        assert!(click(&mut menu));
        assert_eq!(
            menu.state(),
            EngineState::SelectedDelegated { confirmed: false }
        );

        for _ in 0..10 {
            step(&mut menu, 3);
        }
        assert!(menu.display().has_text("< SELECT VALUE >"));
        assert!(menu.display().has_text("PreHeat 100 C"));

        menu.input_mut().click();
        assert_eq!(poll(&mut menu).unwrap(), "<preheat \"PreHeat 100 C\">");
        assert_eq!(menu.state(), EngineState::Idle);
    }

    #[test]
    fn test_combo_selection_reports_value_and_label() {
        let mut menu = sim_menu();
        menu.add_label("start", "Start Oven", true).unwrap();
        menu.add_label("t1", "test1", true).unwrap();
        menu.add_label("t2", "test2", true).unwrap();
        menu.add_choice(
            "combo4",
            "Mode: {}",
            &[
                ("v1", "value 1"),
                ("v2", "value 2"),
                ("v3", "value 3"),
                ("v4", "value 4"),
                ("v5", "value 5"),
                ("v6", "value 6"),
                ("v7", "value 7"),
                ("v8", "value 8"),
            ],
            "v8",
            true,
        )
        .unwrap();
        menu.add_label("t3", "test3", true).unwrap();
        menu.start().unwrap();

        for _ in 0..3 {
            step(&mut menu, 4);
        }
        assert!(menu.display().has_text("Mode: value 8"));
        assert!(click(&mut menu));
        assert!(menu.update().unwrap());
        // The option list replaces the parent list
        assert!(menu.display().has_text(">value 8"));
        assert!(!menu.display().has_text("test1"));

        step(&mut menu, -4);
        menu.input_mut().click();
        assert_eq!(poll(&mut menu).unwrap(), "<combo4 \"Mode: value 7\">");

        let choice = menu
            .find_entry("combo4")
            .and_then(|e| e.controller())
            .and_then(|c| c.as_choice())
            .unwrap();
        assert_eq!(choice.value(), "v7");
        assert_eq!(choice.label(), Some("value 7"));

        // The confirming press must be seen released before the next commit
        assert!(!menu.update().unwrap());
        assert!(click(&mut menu));
        assert!(menu.update().unwrap());
        // Reopening marks the new current option
        assert!(menu.display().has_text(">value 7"));
        assert!(menu.display().has_text(":value 8"));
    }

    struct Dashboard {
        started: u64,
    }

    impl ScreenHandler for Dashboard {
        fn enter(&mut self, io: &mut Io<'_>) -> Result<(), MenuError> {
            self.started = io.now_ms();
            Ok(())
        }

        fn render(&mut self, io: &mut Io<'_>) -> Result<(), MenuError> {
            let elapsed = io.now_ms() - self.started;
            io.display.fill(Color::Off);
            io.display
                .text(&alloc::format!("{}", elapsed), 5, 20, Color::On);
            io.display.show()?;
            Ok(())
        }
    }

    #[test]
    fn test_dashboard_screen_shows_elapsed_time() {
        let mut menu = sim_menu();
        menu.add_label("start", "Start Oven", true).unwrap();
        menu.add_range("preheat", "PreHeat {} C", 25, 180, 5, 50, true)
            .unwrap();
        menu.add_screen("scr1", "Dashboard", Dashboard { started: 0 }, true)
            .unwrap();
        menu.start().unwrap();

        menu.clock_mut().advance(10_000);
        step(&mut menu, 4);
        step(&mut menu, 4);
        assert!(click(&mut menu));

        menu.clock_mut().advance(250);
        assert!(menu.update().unwrap());
        assert!(menu.display().has_text("250"));
        assert!(menu.current_selection().is_none());

        menu.clock_mut().advance(250);
        menu.input_mut().click();
        assert_eq!(poll(&mut menu).unwrap(), "<scr1 \"Dashboard\">");
        assert!(menu.display().has_text("500"));

        // Back to the list with the screen entry still focused
        assert!(!menu.update().unwrap());
        assert!(menu.display().has_text("Dashboard"));
        assert_eq!(menu.engine().focus_index(), Some(2));
    }

    #[test]
    fn test_release_returns_hardware() {
        let mut menu = sim_menu();
        menu.add_label("a", "A", true).unwrap();
        menu.start().unwrap();
        menu.update().unwrap();

        let (display, input, _clock) = menu.release();
        assert_eq!(display.shows, 1);
        assert_eq!(input.resets, 1);
    }

    #[test]
    fn test_with_config_checks_layout() {
        let config = MenuConfig {
            item_height: 0,
            ..MenuConfig::default()
        };
        let result = Menu::with_config(
            SimDisplay::new(128, 64),
            SimInput::new(),
            SimClock::new(),
            config,
        );
        assert_eq!(result.err(), Some(ConfigError::InvalidLayout));

        let config = MenuConfig {
            item_height: 12,
            ..MenuConfig::default()
        };
        let menu = Menu::with_config(
            SimDisplay::new(128, 64),
            SimInput::new(),
            SimClock::new(),
            config,
        )
        .unwrap();
        assert_eq!(menu.engine().config().item_height, 12);
    }
}
