//! Clock capability on Timer0

use thehal::delay::DelayBand;
use thehal::tick::TickClock;
use thehal::Clock;

use crate::cpu::CPU_HZ;
use crate::timer::{Timer0, TICKS};

const DELAY: DelayBand = DelayBand::for_frequency(CPU_HZ);

/// Bare-metal clock: Timer0 ticks plus a cycle-counted busy-wait
pub struct Time {
    clock: TickClock<'static, Timer0>,
}

impl Time {
    /// Bind the clock to Timer0; nothing runs until [`Clock::setup`]
    pub fn new(timer: Timer0) -> Self {
        Self {
            clock: TickClock::new(&TICKS, timer),
        }
    }
}

impl Clock for Time {
    fn setup(&mut self) {
        if self.clock.setup() {
            // SAFETY: TICKS is the only state the TIMER0_OVF handler touches,
            // and it is fully initialized by now.
            unsafe { avr_device::interrupt::enable() };
        }
    }

    fn micros(&self) -> u32 {
        self.clock.micros()
    }

    fn millis(&self) -> u32 {
        self.clock.millis()
    }

    #[inline(always)]
    fn delay_us(&self, us: u32) {
        for _ in 0..DELAY.preamble_nops {
            avr_device::asm::nop();
        }
        let mut laps = DELAY.iterations(us);
        while laps > 0 {
            let chunk = u16::try_from(laps).unwrap_or(u16::MAX);
            spin(chunk);
            laps -= u32::from(chunk);
        }
    }
}

/// Four cycles per lap: `sbiw` (2) + taken `brne` (2)
#[cfg(target_arch = "avr")]
#[inline(always)]
fn spin(laps: u16) {
    // SAFETY: touches only the counter register pair
    unsafe {
        core::arch::asm!(
            "1: sbiw {n}, 1",
            "brne 1b",
            n = inout(reg_iw) laps => _,
            options(nomem, nostack),
        );
    }
}

#[cfg(not(target_arch = "avr"))]
fn spin(laps: u16) {
    for _ in 0..laps {
        core::hint::spin_loop();
    }
}
