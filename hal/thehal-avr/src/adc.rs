//! ADC clock prescaler
//!
//! The successive-approximation ADC wants a 50-200 kHz clock. It is set up
//! alongside the timers so analog reads work without further configuration.

use crate::regs::{self, bits};

/// ADPS2:0 value for a CPU frequency, targeting 125 kHz
pub const fn prescaler_bits(cpu_hz: u32) -> u8 {
    if cpu_hz >= 16_000_000 {
        0b111 // /128
    } else if cpu_hz >= 8_000_000 {
        0b110 // /64
    } else if cpu_hz >= 4_000_000 {
        0b101 // /32
    } else if cpu_hz >= 2_000_000 {
        0b100 // /16
    } else if cpu_hz >= 1_000_000 {
        0b011 // /8
    } else {
        // /2, the smallest divider; below 1 MHz the target is out of reach
        0b001
    }
}

/// Program the prescaler and enable the ADC
pub(crate) fn configure(cpu_hz: u32) {
    let adcsra = regs::ADCSRA.read() & !bits::ADPS_MASK;
    regs::ADCSRA.write(adcsra | prescaler_bits(cpu_hz) | bits::ADEN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescaler_bands() {
        assert_eq!(prescaler_bits(16_000_000), 0b111);
        assert_eq!(prescaler_bits(8_000_000), 0b110);
        assert_eq!(prescaler_bits(4_000_000), 0b101);
        assert_eq!(prescaler_bits(2_000_000), 0b100);
        assert_eq!(prescaler_bits(1_000_000), 0b011);
        assert_eq!(prescaler_bits(128_000), 0b001);
    }
}
