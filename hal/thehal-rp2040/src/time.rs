//! Clock capability on the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use thehal::Clock;

/// Clock reading the RP2040 microsecond timer
///
/// `micros()` and `millis()` count from boot, not from `setup()`: the time
/// driver is started by `embassy_rp::init` before any user code runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Time;

impl Time {
    /// Create the clock
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for Time {
    fn setup(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("rp2040 clock: time driver already running");
    }

    fn micros(&self) -> u32 {
        // Truncation gives the same u32 wrap as the tick engine
        Instant::now().as_micros() as u32
    }

    fn millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn delay_us(&self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
