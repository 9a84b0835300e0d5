//! Monotonic time source

/// Millisecond clock since boot
///
/// Must never go backwards. The scheduler reads it once per loop
/// iteration and again before rendering.
pub trait Clock {
    /// Milliseconds elapsed since boot
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
