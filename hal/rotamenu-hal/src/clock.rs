//! Time base abstraction

pub use embedded_hal::delay::DelayNs;

/// Millisecond clock with a blocking delay
///
/// `now_ms` must be monotonic. The delay comes from
/// [`embedded_hal::delay::DelayNs`] so any HAL delay provider can back it.
pub trait Clock: DelayNs {
    /// Milliseconds since an arbitrary, fixed epoch
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
