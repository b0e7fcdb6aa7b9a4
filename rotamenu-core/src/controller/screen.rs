//! Caller-drawn screens
//!
//! Hands the display and encoder to application code (a dashboard, a live
//! readout) until the user presses the button. The handler owns all screen
//! state; the controller only tracks confirmation.

use alloc::boxed::Box;
use core::fmt;

use rotamenu_hal::Color;

use super::wait_for_release;
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::io::Io;

/// Application hooks for a delegated screen
pub trait ScreenHandler {
    /// Called once when the screen opens, after the display was cleared
    ///
    /// The display is flushed right after this returns.
    fn enter(&mut self, _io: &mut Io<'_>) -> Result<(), MenuError> {
        Ok(())
    }

    /// Called on every polling cycle while the screen is open
    ///
    /// The handler draws and flushes whatever it wants; it may also read the
    /// encoder.
    fn render(&mut self, io: &mut Io<'_>) -> Result<(), MenuError>;
}

/// Render-only handler built from a closure
pub struct FnScreen<F>(pub F);

impl<F> ScreenHandler for FnScreen<F>
where
    F: FnMut(&mut Io<'_>) -> Result<(), MenuError>,
{
    fn render(&mut self, io: &mut Io<'_>) -> Result<(), MenuError> {
        (self.0)(io)
    }
}

/// Controller for a caller-drawn screen
pub struct ScreenController {
    handler: Box<dyn ScreenHandler>,
    confirmed: bool,
}

impl fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenController")
            .field("confirmed", &self.confirmed)
            .finish_non_exhaustive()
    }
}

impl ScreenController {
    /// Wrap a handler
    pub fn new(handler: impl ScreenHandler + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            confirmed: false,
        }
    }

    /// Wrap a render closure
    pub fn from_fn<F>(render: F) -> Self
    where
        F: FnMut(&mut Io<'_>) -> Result<(), MenuError> + 'static,
    {
        Self::new(FnScreen(render))
    }

    /// Check if the user confirmed since the last `start`
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn start(&mut self, io: &mut Io<'_>, config: &MenuConfig) -> Result<(), MenuError> {
        wait_for_release(io, config)?;
        self.confirmed = false;
        io.display.fill(Color::Off);
        self.handler.enter(io)?;
        io.display.show()?;
        Ok(())
    }

    pub(crate) fn update(&mut self, io: &mut Io<'_>) -> Result<bool, MenuError> {
        self.handler.render(io)?;
        if io.input.button()? {
            self.confirmed = true;
        }
        Ok(self.confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Rig;
    use alloc::rc::Rc;
    use core::cell::Cell;

    struct Counter {
        entered: Rc<Cell<u32>>,
        rendered: Rc<Cell<u32>>,
    }

    impl ScreenHandler for Counter {
        fn enter(&mut self, io: &mut Io<'_>) -> Result<(), MenuError> {
            self.entered.set(self.entered.get() + 1);
            io.display.text("hello", 0, 0, Color::On);
            Ok(())
        }

        fn render(&mut self, _io: &mut Io<'_>) -> Result<(), MenuError> {
            self.rendered.set(self.rendered.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_enter_runs_once_then_flushes() {
        let mut rig = Rig::new();
        let entered = Rc::new(Cell::new(0));
        let rendered = Rc::new(Cell::new(0));
        let mut screen = ScreenController::new(Counter {
            entered: entered.clone(),
            rendered: rendered.clone(),
        });

        screen.start(&mut rig.io(), &MenuConfig::default()).unwrap();
        assert_eq!(entered.get(), 1);
        assert_eq!(rendered.get(), 0);
        assert!(rig.display.has_text("hello"));
        assert_eq!(rig.display.shows, 1);

        for _ in 0..3 {
            assert!(!screen.update(&mut rig.io()).unwrap());
        }
        assert_eq!(rendered.get(), 3);
        assert_eq!(entered.get(), 1);
    }

    #[test]
    fn test_closure_screen_confirms_on_press() {
        let mut rig = Rig::new();
        let mut screen = ScreenController::from_fn(|io| {
            let now = io.now_ms();
            io.display.fill(Color::Off);
            io.display.text(if now > 0 { "later" } else { "now" }, 5, 20, Color::On);
            io.display.show()?;
            Ok(())
        });

        screen.start(&mut rig.io(), &MenuConfig::default()).unwrap();
        assert!(!screen.update(&mut rig.io()).unwrap());
        assert!(rig.display.has_text("now"));

        rig.clock.advance(100);
        rig.input.press();
        assert!(screen.update(&mut rig.io()).unwrap());
        assert!(rig.display.has_text("later"));
        assert!(screen.is_confirmed());
    }
}
