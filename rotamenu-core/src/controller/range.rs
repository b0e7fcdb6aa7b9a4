//! Numeric range picker
//!
//! Takes over the whole screen with a value bar. Turning the encoder steps
//! the value, clamped to the bounds; pressing the button confirms.

use core::fmt::Write;

use heapless::String;
use rotamenu_hal::{Color, DisplaySurface};

use super::{format_label, wait_for_release, Substitution};
use crate::config::{ConfigError, MenuConfig};
use crate::error::MenuError;
use crate::io::Io;

/// Header drawn on the picker screen
const HEADER: &str = "< SELECT VALUE >";

/// Vertical position of the value bar
const BAR_Y: i32 = 20;
/// Height of the value bar
const BAR_HEIGHT: u32 = 12;
/// Vertical position of the bound labels
const BOUNDS_Y: i32 = 34;

/// Linear integer mapping of `x` from one interval onto another
///
/// Rounds toward negative infinity. A degenerate input interval maps
/// everything onto `out_max`.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let span = i64::from(in_max) - i64::from(in_min);
    if span == 0 {
        return out_max;
    }
    let scaled = (i64::from(x) - i64::from(in_min)) * (i64::from(out_max) - i64::from(out_min));
    (scaled.div_euclid(span) + i64::from(out_min)) as i32
}

/// Integer value picker
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeController {
    min: i32,
    max: i32,
    step: i32,
    value: i32,
    confirmed: bool,
}

impl RangeController {
    /// Create a picker over `[min, max]`
    ///
    /// Rejects `min > max`, a non-positive step and a default outside the
    /// bounds.
    pub fn new(min: i32, max: i32, step: i32, default: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidBounds);
        }
        if step <= 0 {
            return Err(ConfigError::InvalidStep);
        }
        if !(min..=max).contains(&default) {
            return Err(ConfigError::DefaultOutOfRange);
        }
        Ok(Self {
            min,
            max,
            step,
            value: default,
            confirmed: false,
        })
    }

    /// Current value
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Step per encoder notch
    pub fn step(&self) -> i32 {
        self.step
    }

    /// Set the value, clamped to the bounds
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Step up, stopping at `max`
    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(self.step).min(self.max);
    }

    /// Step down, stopping at `min`
    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(self.step).max(self.min);
    }

    /// Check if the user confirmed since the last `start`
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Width of the filled part of a bar `width` pixels wide
    pub fn fill_width(&self, width: u32) -> u32 {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        map_range(self.value, self.min, self.max, 0, width).max(0) as u32
    }

    pub(crate) fn start(&mut self, io: &mut Io<'_>, config: &MenuConfig) -> Result<(), MenuError> {
        wait_for_release(io, config)?;
        self.confirmed = false;
        Ok(())
    }

    pub(crate) fn update(
        &mut self,
        label: &str,
        io: &mut Io<'_>,
        config: &MenuConfig,
    ) -> Result<bool, MenuError> {
        // Motion is sampled per cycle, never accumulated across frames
        let position = io.input.relative_position()?;
        if position > config.value_threshold {
            self.increment();
        } else if position < -config.value_threshold {
            self.decrement();
        }
        io.input.reset()?;

        self.draw(label, io.display)?;

        if io.input.button()? {
            self.confirmed = true;
        }
        Ok(self.confirmed)
    }

    /// Draw the picker screen and flush it
    pub fn draw(&self, label: &str, display: &mut dyn DisplaySurface) -> Result<(), MenuError> {
        let width = display.width();

        display.fill(Color::Off);
        display.text(HEADER, 0, 0, Color::On);
        let text = format_label(label, Some(Substitution::Value(self.value)));
        display.text(&text, 0, 10, Color::On);

        display.rect(0, BAR_Y, width, BAR_HEIGHT, Color::On, false);
        display.rect(0, BAR_Y, self.fill_width(width), BAR_HEIGHT, Color::On, true);

        let min = number(self.min);
        display.text(&min, 0, BOUNDS_Y, Color::On);
        let max = number(self.max);
        let max_width = max.len() as u32 * display.glyph_width();
        let max_x = i32::try_from(width.saturating_sub(max_width)).unwrap_or(0);
        display.text(&max, max_x, BOUNDS_Y, Color::On);

        display.show()?;
        Ok(())
    }
}

fn number(value: i32) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, "{}", value);
    s
}
