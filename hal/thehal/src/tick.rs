//! Overflow-interrupt tick accounting
//!
//! A free-running 8-bit timer clocked at CPU/64 overflows every
//! `64 * 256` cycles. The overflow ISR is the only writer of [`TickState`]:
//! it counts overflows and keeps a millisecond total, carrying the part of
//! the overflow period that is not a whole millisecond in a fractional
//! remainder. Foreground readers copy the state inside a critical section so
//! they never see a half-updated multi-byte value.
//!
//! The fractional remainder is kept in units of 8 us so it fits a byte. For
//! every CPU frequency [`TickConfig`] accepts, the sub-millisecond part of the
//! overflow period is a multiple of 8 us and nothing is lost.

use core::cell::Cell;

use critical_section::Mutex;

/// CPU cycles per timer tick
pub const PRESCALER: u32 = 64;

/// Timer counter width; one overflow every `1 << COUNTER_BITS` ticks
pub const COUNTER_BITS: u32 = 8;

const FRACT_SHIFT: u32 = 3;
const FRACT_MAX: u8 = (1000 >> FRACT_SHIFT) as u8;

/// Per-overflow increments derived from the CPU frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    cpu_hz: u32,
    us_per_tick: u32,
    us_per_overflow: u32,
    millis_inc: u32,
    fract_inc: u8,
}

impl TickConfig {
    /// Derive the increments for `cpu_hz`
    ///
    /// Panics (at compile time when used in a `const`) if the frequency is
    /// unsupported; see [`TickConfig::is_supported`].
    pub const fn new(cpu_hz: u32) -> Self {
        assert!(
            Self::is_supported(cpu_hz),
            "CPU frequency must be a whole number of MHz dividing 64"
        );
        let cycles_per_us = cpu_hz / 1_000_000;
        let us_per_overflow = (PRESCALER << COUNTER_BITS) / cycles_per_us;
        Self {
            cpu_hz,
            us_per_tick: PRESCALER / cycles_per_us,
            us_per_overflow,
            millis_inc: us_per_overflow / 1000,
            fract_inc: ((us_per_overflow % 1000) >> FRACT_SHIFT) as u8,
        }
    }

    /// Check that one timer tick is a whole number of microseconds
    ///
    /// `micros()` scales ticks by `64 / cycles_per_us`; anything else
    /// would drift.
    pub const fn is_supported(cpu_hz: u32) -> bool {
        let cycles_per_us = cpu_hz / 1_000_000;
        cpu_hz % 1_000_000 == 0 && cycles_per_us > 0 && PRESCALER % cycles_per_us == 0
    }

    /// CPU frequency in Hz
    pub const fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    /// Microseconds per timer tick
    pub const fn us_per_tick(&self) -> u32 {
        self.us_per_tick
    }

    /// Microseconds per timer overflow
    pub const fn us_per_overflow(&self) -> u32 {
        self.us_per_overflow
    }

    /// Whole milliseconds added per overflow
    pub const fn millis_inc(&self) -> u32 {
        self.millis_inc
    }

    /// Fractional increment per overflow, in 8 us units
    pub const fn fract_inc(&self) -> u8 {
        self.fract_inc
    }

    /// Fractional remainder that carries into one millisecond
    pub const fn fract_max(&self) -> u8 {
        FRACT_MAX
    }
}

/// Counters owned by the overflow ISR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickState {
    overflows: u32,
    millis: u32,
    fract: u8,
}

impl TickState {
    /// All counters at zero
    pub const fn new() -> Self {
        Self {
            overflows: 0,
            millis: 0,
            fract: 0,
        }
    }

    /// Account for one timer overflow
    pub fn advance(&mut self, config: &TickConfig) {
        let mut millis = self.millis.wrapping_add(config.millis_inc);
        // fract < FRACT_MAX and fract_inc < FRACT_MAX, so this fits a u8
        let mut fract = self.fract + config.fract_inc;
        if fract >= FRACT_MAX {
            fract -= FRACT_MAX;
            millis = millis.wrapping_add(1);
        }
        self.fract = fract;
        self.millis = millis;
        self.overflows = self.overflows.wrapping_add(1);
    }

    /// Overflows since setup (wrapping)
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Milliseconds since setup (wrapping)
    pub fn millis(&self) -> u32 {
        self.millis
    }

    /// Fractional remainder in 8 us units, always below [`TickConfig::fract_max`]
    pub fn fract(&self) -> u8 {
        self.fract
    }
}

/// Hardware side of the tick source
pub trait TickTimer {
    /// Program prescaler, waveform mode and overflow interrupt enable
    fn configure(&mut self);

    /// Live counter register
    fn counter(&self) -> u8;

    /// Overflow flag set by hardware and not yet cleared by the ISR
    fn overflow_pending(&self) -> bool;
}

/// Shared tick state plus the accessors allowed to touch it
///
/// Lives in a `static`; the backend's overflow ISR calls
/// [`TickDriver::on_overflow`], everything else only reads.
pub struct TickDriver {
    config: TickConfig,
    state: Mutex<Cell<TickState>>,
}

impl TickDriver {
    /// Create a driver with zeroed state
    pub const fn new(config: TickConfig) -> Self {
        Self {
            config,
            state: Mutex::new(Cell::new(TickState::new())),
        }
    }

    /// Increments this driver was built with
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Overflow ISR body
    pub fn on_overflow(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.advance(&self.config);
            cell.set(state);
        });
    }

    /// Zero all counters
    pub fn reset(&self) {
        critical_section::with(|cs| self.state.borrow(cs).set(TickState::new()));
    }

    /// Consistent copy of the counters
    pub fn snapshot(&self) -> TickState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Milliseconds since the last reset
    pub fn millis(&self) -> u32 {
        self.snapshot().millis
    }

    /// Microseconds since the last reset, including the in-flight timer count
    ///
    /// The counter and overflow flag are sampled in the same critical section
    /// as the state. If the counter has wrapped but the ISR has not run yet,
    /// the pending overflow is counted here so no period is lost at the
    /// boundary.
    pub fn micros<T: TickTimer + ?Sized>(&self, timer: &T) -> u32 {
        let (mut overflows, ticks, pending) = critical_section::with(|cs| {
            let state = self.state.borrow(cs).get();
            (state.overflows, timer.counter(), timer.overflow_pending())
        });
        if pending && ticks < u8::MAX {
            overflows = overflows.wrapping_add(1);
        }
        (overflows << COUNTER_BITS)
            .wrapping_add(u32::from(ticks))
            .wrapping_mul(self.config.us_per_tick)
    }
}

/// Clock built from a [`TickDriver`] and its timer
///
/// Holds the set-up-once flag; backends wrap it and add their busy-wait.
pub struct TickClock<'a, T> {
    driver: &'a TickDriver,
    timer: T,
    initialized: bool,
}

impl<'a, T: TickTimer> TickClock<'a, T> {
    /// Bind a timer to the driver its ISR feeds
    pub const fn new(driver: &'a TickDriver, timer: T) -> Self {
        Self {
            driver,
            timer,
            initialized: false,
        }
    }

    /// Zero the counters and program the timer, once
    ///
    /// Returns `true` only on the call that did the work.
    pub fn setup(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.driver.reset();
        self.timer.configure();
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "tick: {} Hz, {} us per overflow",
            self.driver.config().cpu_hz(),
            self.driver.config().us_per_overflow()
        );
        true
    }

    /// Check if setup has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Microseconds since setup
    pub fn micros(&self) -> u32 {
        self.driver.micros(&self.timer)
    }

    /// Milliseconds since setup
    pub fn millis(&self) -> u32 {
        self.driver.millis()
    }

    /// Borrow the timer
    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock 8-bit timer with test-controlled registers
    #[derive(Default)]
    struct MockTimer {
        count: Cell<u8>,
        pending: Cell<bool>,
        configured: u32,
    }

    impl TickTimer for MockTimer {
        fn configure(&mut self) {
            self.configured += 1;
        }

        fn counter(&self) -> u8 {
            self.count.get()
        }

        fn overflow_pending(&self) -> bool {
            self.pending.get()
        }
    }

    #[test]
    fn test_config_16mhz() {
        let config = TickConfig::new(16_000_000);
        assert_eq!(config.us_per_tick(), 4);
        assert_eq!(config.us_per_overflow(), 1024);
        assert_eq!(config.millis_inc(), 1);
        assert_eq!(config.fract_inc(), 3);
        assert_eq!(config.fract_max(), 125);
    }

    #[test]
    fn test_config_8mhz_and_1mhz() {
        let config = TickConfig::new(8_000_000);
        assert_eq!(config.us_per_overflow(), 2048);
        assert_eq!(config.millis_inc(), 2);
        assert_eq!(config.fract_inc(), 6);

        let config = TickConfig::new(1_000_000);
        assert_eq!(config.us_per_tick(), 64);
        assert_eq!(config.millis_inc(), 16);
        assert_eq!(config.fract_inc(), 48);
    }

    #[test]
    fn test_supported_frequencies() {
        for hz in [1, 2, 4, 8, 16, 32, 64] {
            assert!(TickConfig::is_supported(hz * 1_000_000), "{} MHz", hz);
        }
        for hz in [0, 500_000, 12_000_000, 20_000_000, 24_000_000, 16_500_000] {
            assert!(!TickConfig::is_supported(hz), "{} Hz", hz);
        }
    }

    #[test]
    fn test_fractional_carry() {
        let config = TickConfig::new(16_000_000);
        let mut state = TickState::new();

        // 41 overflows leave 123 in the remainder, the 42nd carries
        for _ in 0..41 {
            state.advance(&config);
        }
        assert_eq!(state.millis(), 41);
        assert_eq!(state.fract(), 123);

        state.advance(&config);
        assert_eq!(state.millis(), 43);
        assert_eq!(state.fract(), 1);
        assert_eq!(state.overflows(), 42);
    }

    #[test]
    fn test_millis_after_overflows() {
        static TICKS: TickDriver = TickDriver::new(TickConfig::new(16_000_000));
        TICKS.reset();

        for _ in 0..1000 {
            TICKS.on_overflow();
        }
        // 1000 * 1.024 ms
        assert_eq!(TICKS.millis(), 1024);
        assert_eq!(TICKS.snapshot().overflows(), 1000);
    }

    #[test]
    fn test_micros_combines_counter() {
        static TICKS: TickDriver = TickDriver::new(TickConfig::new(16_000_000));
        let timer = MockTimer::default();
        TICKS.reset();

        for _ in 0..3 {
            TICKS.on_overflow();
        }
        timer.count.set(10);
        assert_eq!(TICKS.micros(&timer), ((3 << 8) + 10) * 4);

        timer.count.set(11);
        let a = TICKS.micros(&timer);
        let b = TICKS.micros(&timer);
        assert!(b >= a);
    }

    #[test]
    fn test_micros_counts_pending_overflow() {
        static TICKS: TickDriver = TickDriver::new(TickConfig::new(16_000_000));
        let timer = MockTimer::default();
        TICKS.reset();

        for _ in 0..5 {
            TICKS.on_overflow();
        }
        timer.count.set(250);
        let before = TICKS.micros(&timer);

        // Counter wrapped, ISR not serviced yet
        timer.count.set(2);
        timer.pending.set(true);
        let during = TICKS.micros(&timer);
        assert_eq!(during, ((6 << 8) + 2) * 4);
        assert!(during > before);

        // ISR runs and clears the flag: same instant, same reading
        TICKS.on_overflow();
        timer.pending.set(false);
        assert_eq!(TICKS.micros(&timer), during);
    }

    #[test]
    fn test_pending_flag_ignored_at_top_count() {
        static TICKS: TickDriver = TickDriver::new(TickConfig::new(16_000_000));
        let timer = MockTimer::default();
        TICKS.reset();

        timer.count.set(255);
        timer.pending.set(true);
        assert_eq!(TICKS.micros(&timer), 255 * 4);
    }

    #[test]
    fn test_clock_setup_is_idempotent() {
        static TICKS: TickDriver = TickDriver::new(TickConfig::new(16_000_000));
        let mut clock = TickClock::new(&TICKS, MockTimer::default());

        TICKS.on_overflow();
        assert!(clock.setup());
        assert_eq!(clock.timer().configured, 1);
        assert_eq!(clock.millis(), 0);

        TICKS.on_overflow();
        assert!(!clock.setup());
        assert_eq!(clock.timer().configured, 1);
        // Second setup must not zero the running counters
        assert_eq!(clock.millis(), 1);
        assert!(clock.is_initialized());
    }
}
