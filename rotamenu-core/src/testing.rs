//! Simulated capabilities for host tests

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rotamenu_hal::clock::DelayNs;
use rotamenu_hal::{Clock, Color, DisplayError, DisplaySurface, InputError, RotaryInput};

use crate::engine::MenuEngine;
use crate::error::MenuError;
use crate::io::Io;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Fill(Color),
    Pixel {
        x: i32,
        y: i32,
        color: Color,
    },
    Rect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
        filled: bool,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    },
}

/// Display that records the calls of the current frame
pub struct SimDisplay {
    width: u32,
    height: u32,
    /// Calls since the last `fill`
    pub ops: Vec<Op>,
    /// Number of `show` calls
    pub shows: usize,
    /// Make the next `show` fail
    pub fail_show: bool,
}

impl SimDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            shows: 0,
            fail_show: false,
        }
    }

    pub fn texts(&self) -> Vec<(String, i32, i32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, x, y, color } => Some((text.clone(), *x, *y, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|(t, ..)| t == needle)
    }

    /// Outline rectangles (focus frames)
    pub fn outlines(&self) -> Vec<(i32, i32, u32, u32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect {
                    x,
                    y,
                    w,
                    h,
                    filled: false,
                    ..
                } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn filled_rects(&self) -> Vec<(i32, i32, u32, u32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    filled: true,
                } => Some((*x, *y, *w, *h, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn pixel_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Pixel { .. }))
            .count()
    }

    pub fn pixel_at(&self, px: i32, py: i32) -> Option<Color> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Pixel { x, y, color } if *x == px && *y == py => Some(*color),
            _ => None,
        })
    }
}

impl DisplaySurface for SimDisplay {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) {
        self.ops.clear();
        self.ops.push(Op::Fill(color));
    }

    fn pixel(&mut self, x: i32, y: i32, color: Color) {
        self.ops.push(Op::Pixel { x, y, color });
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, filled: bool) {
        self.ops.push(Op::Rect {
            x,
            y,
            w,
            h,
            color,
            filled,
        });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        if self.fail_show {
            return Err(DisplayError::Communication);
        }
        self.shows += 1;
        Ok(())
    }
}

/// Encoder with a settable position and a scripted button
pub struct SimInput {
    pub position: i32,
    /// Button level once the script is exhausted
    pub level: bool,
    /// Levels returned by the next button reads, front first
    pub script: VecDeque<bool>,
    pub resets: usize,
    pub button_reads: usize,
}

impl SimInput {
    pub fn new() -> Self {
        Self {
            position: 0,
            level: false,
            script: VecDeque::new(),
            resets: 0,
            button_reads: 0,
        }
    }

    pub fn turn(&mut self, detents: i32) {
        self.position += detents;
    }

    pub fn press(&mut self) {
        self.level = true;
    }

    pub fn release(&mut self) {
        self.level = false;
    }

    /// Pressed for the next read, released afterwards
    pub fn click(&mut self) {
        self.hold_for(1);
    }

    /// Pressed for the next `reads` reads, released afterwards
    pub fn hold_for(&mut self, reads: usize) {
        self.level = false;
        for _ in 0..reads {
            self.script.push_back(true);
        }
    }
}

impl RotaryInput for SimInput {
    fn relative_position(&mut self) -> Result<i32, InputError> {
        Ok(self.position)
    }

    fn reset(&mut self) -> Result<(), InputError> {
        self.position = 0;
        self.resets += 1;
        Ok(())
    }

    fn button(&mut self) -> Result<bool, InputError> {
        self.button_reads += 1;
        Ok(self.script.pop_front().unwrap_or(self.level))
    }
}

/// Manually advanced clock; delays advance it too
pub struct SimClock {
    pub now: u64,
    pub delays: usize,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now: 0, delays: 0 }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.delays += 1;
        self.now += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays += 1;
        self.now += u64::from(ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// A 128x64 display, an encoder and a clock driven together
pub struct Rig {
    pub display: SimDisplay,
    pub input: SimInput,
    pub clock: SimClock,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            display: SimDisplay::new(128, 64),
            input: SimInput::new(),
            clock: SimClock::new(),
        }
    }

    pub fn io(&mut self) -> Io<'_> {
        Io::new(&mut self.display, &mut self.input, &mut self.clock)
    }

    pub fn start(&mut self, engine: &mut MenuEngine) {
        let mut io = self.io();
        engine.start(&mut io).unwrap();
    }

    pub fn update(&mut self, engine: &mut MenuEngine) -> Result<bool, MenuError> {
        let mut io = self.io();
        engine.update(&mut io)
    }

    /// Turn far enough to move focus one entry
    pub fn step(&mut self, engine: &mut MenuEngine, forward: bool) {
        self.input.turn(if forward { 4 } else { -4 });
        self.update(engine).unwrap();
    }

    /// Click the button and run the update that sees it
    pub fn click(&mut self, engine: &mut MenuEngine) -> bool {
        self.input.click();
        self.update(engine).unwrap()
    }
}
