//! Clock capability
//!
//! Monotonic microsecond/millisecond time plus blocking delays. Both delay
//! operations spin the calling context for the full duration; nothing
//! cancels them, interrupts only preempt.

use crate::delay;

/// Time source and blocking delay
pub trait Clock {
    /// Start the time base
    ///
    /// Idempotent: only the first call touches hardware.
    fn setup(&mut self);

    /// Microseconds since setup, wrapping at `u32::MAX`
    fn micros(&self) -> u32;

    /// Milliseconds since setup, wrapping after ~49.7 days
    fn millis(&self) -> u32;

    /// Busy-wait approximately `us` microseconds
    ///
    /// Requests shorter than the call overhead return immediately.
    fn delay_us(&self, us: u32);

    /// Busy-wait `ms` milliseconds by polling [`Clock::micros`]
    fn delay_ms(&self, ms: u32) {
        delay::wait_millis(|| self.micros(), ms);
    }
}

/// [`embedded_hal::delay::DelayNs`] adapter over any [`Clock`]
///
/// Lets drivers written against `embedded-hal` share the HAL's delays.
pub struct Delay<'a, C: ?Sized> {
    clock: &'a C,
}

impl<'a, C: Clock + ?Sized> Delay<'a, C> {
    /// Borrow a clock as an `embedded-hal` delay provider
    pub fn new(clock: &'a C) -> Self {
        Self { clock }
    }
}

impl<C: Clock + ?Sized> embedded_hal::delay::DelayNs for Delay<'_, C> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
