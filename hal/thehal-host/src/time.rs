//! Clock that never advances

use thehal::Clock;

/// Frozen clock for host builds
///
/// `micros()` and `millis()` stay at 0 and both delays return at once, so
/// firmware logic can run on a desktop without waiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyClock;

/// Backend-neutral name for the clock
pub type Time = DummyClock;

impl DummyClock {
    /// Create the clock
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for DummyClock {
    fn setup(&mut self) {}

    fn micros(&self) -> u32 {
        0
    }

    fn millis(&self) -> u32 {
        0
    }

    fn delay_us(&self, _us: u32) {}

    // The default polls micros(), which would never finish here
    fn delay_ms(&self, _ms: u32) {}
}
