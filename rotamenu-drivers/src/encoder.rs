//! Rotary Encoder Handler
//!
//! Decodes quadrature encoder signals into a signed detent count and reads
//! the push button. Uses a state machine for reliable decoding with noise
//! rejection.
//!
//! The pins are sampled whenever the menu asks for the position, so the
//! menu loop must run faster than the encoder can complete a detent. Boards
//! that cannot guarantee that call [`QuadratureEncoder::poll`] from a timer
//! as well.

use embedded_hal::digital::InputPin;
use rotamenu_hal::{InputError, RotaryInput};

/// One decoded detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Encoder state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature encoder with push button
///
/// Clockwise detents count up. The button is active low unless configured
/// otherwise.
pub struct QuadratureEncoder<A, B, BTN> {
    a: A,
    b: B,
    button: BTN,
    button_active_low: bool,
    state: State,
    last_a: bool,
    last_b: bool,
    position: i32,
}

impl<A, B, BTN> QuadratureEncoder<A, B, BTN>
where
    A: InputPin,
    B: InputPin,
    BTN: InputPin,
{
    /// Create a new encoder with an active-low button
    pub fn new(a: A, b: B, button: BTN) -> Result<Self, InputError> {
        Self::with_button_polarity(a, b, button, true)
    }

    /// Create a new encoder with the given button polarity
    pub fn with_button_polarity(
        mut a: A,
        mut b: B,
        button: BTN,
        button_active_low: bool,
    ) -> Result<Self, InputError> {
        let last_a = a.is_high().map_err(|_| InputError::Communication)?;
        let last_b = b.is_high().map_err(|_| InputError::Communication)?;

        Ok(Self {
            a,
            b,
            button,
            button_active_low,
            state: State::Idle,
            last_a,
            last_b,
            position: 0,
        })
    }

    /// Sample the pins once and account for a completed detent
    pub fn poll(&mut self) -> Result<Option<Direction>, InputError> {
        let a = self.a.is_high().map_err(|_| InputError::Communication)?;
        let b = self.b.is_high().map_err(|_| InputError::Communication)?;

        // No change
        if a == self.last_a && b == self.last_b {
            return Ok(None);
        }

        let step = self.decode(a, b);

        self.last_a = a;
        self.last_b = b;

        match step {
            Some(Direction::Clockwise) => self.position = self.position.saturating_add(1),
            Some(Direction::CounterClockwise) => self.position = self.position.saturating_sub(1),
            None => {}
        }
        Ok(step)
    }

    /// Detents counted since the last reset, without sampling
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Give back the pins
    pub fn release(self) -> (A, B, BTN) {
        (self.a, self.b, self.button)
    }

    /// Decode encoder state using state machine
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    ///
    /// State transitions for CW rotation:
    /// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> detent -> Idle
    ///
    /// State transitions for CCW rotation:
    /// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> detent -> Idle
    fn decode(&mut self, a: bool, b: bool) -> Option<Direction> {
        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = State::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return Some(Direction::Clockwise);
                }
                None
            }
            State::CcwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return Some(Direction::CounterClockwise);
                }
                None
            }
        }
    }
}

impl<A, B, BTN> RotaryInput for QuadratureEncoder<A, B, BTN>
where
    A: InputPin,
    B: InputPin,
    BTN: InputPin,
{
    fn relative_position(&mut self) -> Result<i32, InputError> {
        self.poll()?;
        Ok(self.position)
    }

    fn reset(&mut self) -> Result<(), InputError> {
        self.position = 0;
        Ok(())
    }

    fn button(&mut self) -> Result<bool, InputError> {
        let low = self
            .button
            .is_low()
            .map_err(|_| InputError::Communication)?;
        Ok(low == self.button_active_low)
    }
}
