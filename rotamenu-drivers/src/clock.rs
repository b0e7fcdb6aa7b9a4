//! Host clock
//!
//! Milliseconds since construction, with sleeping delays.

use std::thread;
use std::time::{Duration, Instant};

use rotamenu_hal::clock::DelayNs;
use rotamenu_hal::Clock;

/// `Clock` on top of `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl DelayNs for StdClock {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_advances_time() {
        let mut clock = StdClock::new();
        let before = clock.now_ms();
        clock.delay_ms(15);
        assert!(clock.now_ms() >= before + 15);
    }
}
