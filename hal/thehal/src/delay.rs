//! Busy-wait calibration
//!
//! Backends spin in a 4-cycle loop (`sbiw` + `brne` on AVR). How many laps
//! make one microsecond, and how many laps the call itself already burned,
//! depends on the CPU clock. Those numbers live in [`DELAY_BANDS`], one entry
//! per frequency band, instead of in per-frequency branches, so the
//! arithmetic can be checked on the host for any frequency.

/// How a microsecond request becomes a loop count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopScale {
    /// `us * factor - overhead` laps
    Multiply {
        /// Laps per microsecond
        factor: u32,
        /// Laps already spent in call and setup
        overhead: u32,
    },
    /// `(us - overhead) >> shift` laps, for clocks slower than one lap per microsecond
    ShiftDown {
        /// Microseconds already spent in call and setup
        overhead: u32,
        /// log2 of microseconds per lap
        shift: u32,
    },
}

/// Calibration for one CPU frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayBand {
    /// Lowest CPU frequency this band covers, in Hz
    pub min_hz: u32,
    /// `nop`s to pad before the early-return check
    pub preamble_nops: u8,
    /// Requests at or below this many microseconds return at once
    pub skip_at_or_below: u32,
    /// Request-to-laps transform
    pub scale: LoopScale,
}

/// Calibration bands, fastest first
///
/// The last entry catches everything below 8 MHz and is tuned for 1 MHz.
/// The 24 MHz band also serves 32 and 64 MHz. The 20 and 12 MHz bands are
/// calibrated for completeness only: the Timer0 tick engine cannot track
/// those clocks (see [`crate::tick::TickConfig::is_supported`]), so the AVR
/// build never selects them.
pub const DELAY_BANDS: [DelayBand; 6] = [
    // 24 MHz: 6 laps per us, 22 cycles of overhead
    DelayBand {
        min_hz: 24_000_000,
        preamble_nops: 0,
        skip_at_or_below: 0,
        scale: LoopScale::Multiply {
            factor: 6,
            overhead: 5,
        },
    },
    // 20 MHz: 4 nops round the overhead up to a whole microsecond
    DelayBand {
        min_hz: 20_000_000,
        preamble_nops: 4,
        skip_at_or_below: 1,
        scale: LoopScale::Multiply {
            factor: 5,
            overhead: 7,
        },
    },
    DelayBand {
        min_hz: 16_000_000,
        preamble_nops: 0,
        skip_at_or_below: 1,
        scale: LoopScale::Multiply {
            factor: 4,
            overhead: 5,
        },
    },
    DelayBand {
        min_hz: 12_000_000,
        preamble_nops: 0,
        skip_at_or_below: 1,
        scale: LoopScale::Multiply {
            factor: 3,
            overhead: 5,
        },
    },
    DelayBand {
        min_hz: 8_000_000,
        preamble_nops: 0,
        skip_at_or_below: 2,
        scale: LoopScale::Multiply {
            factor: 2,
            overhead: 4,
        },
    },
    // 1 MHz: one lap is 4 us
    DelayBand {
        min_hz: 0,
        preamble_nops: 0,
        skip_at_or_below: 25,
        scale: LoopScale::ShiftDown {
            overhead: 22,
            shift: 2,
        },
    },
];

impl DelayBand {
    /// Pick the band for a CPU frequency
    pub const fn for_frequency(cpu_hz: u32) -> DelayBand {
        let mut i = 0;
        while i < DELAY_BANDS.len() - 1 {
            if cpu_hz >= DELAY_BANDS[i].min_hz {
                return DELAY_BANDS[i];
            }
            i += 1;
        }
        DELAY_BANDS[DELAY_BANDS.len() - 1]
    }

    /// Loop laps for a request of `us` microseconds
    ///
    /// Zero means return without spinning.
    pub const fn iterations(&self, us: u32) -> u32 {
        if us <= self.skip_at_or_below {
            return 0;
        }
        match self.scale {
            LoopScale::Multiply { factor, overhead } => {
                us.saturating_mul(factor).saturating_sub(overhead)
            }
            LoopScale::ShiftDown { overhead, shift } => us.saturating_sub(overhead) >> shift,
        }
    }
}

/// Block until `ms` milliseconds have elapsed on `micros`
///
/// Consumes one millisecond each time 1000 microseconds have passed since a
/// running mark, then advances the mark by exactly 1000. Sampling late never
/// shortens the wait, and wrapping arithmetic carries it across the `u32`
/// rollover of the microsecond counter.
pub fn wait_millis<F: FnMut() -> u32>(mut micros: F, ms: u32) {
    let mut remaining = ms;
    let mut mark = micros();
    while remaining > 0 {
        if micros().wrapping_sub(mark) >= 1000 {
            remaining -= 1;
            mark = mark.wrapping_add(1000);
        } else {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_selection() {
        assert_eq!(DelayBand::for_frequency(32_000_000).min_hz, 24_000_000);
        assert_eq!(DelayBand::for_frequency(24_000_000).min_hz, 24_000_000);
        assert_eq!(DelayBand::for_frequency(20_000_000).min_hz, 20_000_000);
        assert_eq!(DelayBand::for_frequency(16_000_000).min_hz, 16_000_000);
        assert_eq!(DelayBand::for_frequency(12_000_000).min_hz, 12_000_000);
        assert_eq!(DelayBand::for_frequency(8_000_000).min_hz, 8_000_000);
        assert_eq!(DelayBand::for_frequency(4_000_000).min_hz, 0);
        assert_eq!(DelayBand::for_frequency(1_000_000).min_hz, 0);
    }

    #[test]
    fn test_16mhz_iterations() {
        let band = DelayBand::for_frequency(16_000_000);
        assert_eq!(band.iterations(0), 0);
        assert_eq!(band.iterations(1), 0);
        assert_eq!(band.iterations(2), 3);
        assert_eq!(band.iterations(10), 35);
        assert_eq!(band.iterations(1000), 3995);
    }

    #[test]
    fn test_bands_for_tick_frequencies() {
        use crate::tick::TickConfig;

        let expected = [
            (1, 0),
            (2, 0),
            (4, 0),
            (8, 8_000_000),
            (16, 16_000_000),
            (32, 24_000_000),
            (64, 24_000_000),
        ];
        for (mhz, min_hz) in expected {
            let hz = mhz * 1_000_000;
            assert!(TickConfig::is_supported(hz));
            assert_eq!(DelayBand::for_frequency(hz).min_hz, min_hz, "{} MHz", mhz);
        }
    }

    #[test]
    fn test_24mhz_only_skips_zero() {
        let band = DelayBand::for_frequency(24_000_000);
        assert_eq!(band.iterations(0), 0);
        assert_eq!(band.iterations(1), 1);
        assert_eq!(band.iterations(3), 13);
    }

    #[test]
    fn test_20mhz_pads_preamble() {
        let band = DelayBand::for_frequency(20_000_000);
        assert_eq!(band.preamble_nops, 4);
        assert_eq!(band.iterations(1), 0);
        assert_eq!(band.iterations(2), 3);
    }

    #[test]
    fn test_8mhz_skips_two_us() {
        let band = DelayBand::for_frequency(8_000_000);
        assert_eq!(band.iterations(2), 0);
        assert_eq!(band.iterations(3), 2);
        assert_eq!(band.iterations(100), 196);
    }

    #[test]
    fn test_1mhz_shifts_down() {
        let band = DelayBand::for_frequency(1_000_000);
        assert_eq!(band.iterations(16), 0);
        assert_eq!(band.iterations(25), 0);
        assert_eq!(band.iterations(26), 1);
        assert_eq!(band.iterations(100), 19);
    }

    #[test]
    fn test_huge_request_saturates() {
        let band = DelayBand::for_frequency(24_000_000);
        assert_eq!(band.iterations(u32::MAX), u32::MAX - 5);
    }

    #[test]
    fn test_wait_millis_counts_whole_milliseconds() {
        let mut now = 0u32;
        let mut samples = 0u32;
        wait_millis(
            || {
                samples += 1;
                now += 250;
                now
            },
            3,
        );
        // First sample is the mark at 250; 3 ms later is 3250
        assert_eq!(now, 3250);
        assert_eq!(samples, 13);
    }
}
