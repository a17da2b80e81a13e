//! Timer0 tick source
//!
//! Timer0 runs in fast PWM mode at CPU/64 and overflows every 256 ticks.
//! Its overflow interrupt feeds [`TICKS`]; PWM on OC0A/OC0B keeps working.

use core::cell::Cell;

use critical_section::Mutex;
use thehal::tick::{TickConfig, TickDriver, TickTimer};

use crate::cpu::CPU_HZ;
use crate::regs::{self, bits};

/// Increments for the build-time CPU frequency
pub const TICK_CONFIG: TickConfig = TickConfig::new(CPU_HZ);

/// Tick state shared with the `TIMER0_OVF` handler
pub static TICKS: TickDriver = TickDriver::new(TICK_CONFIG);

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega328p)]
fn TIMER0_OVF() {
    TICKS.on_overflow();
}

/// Owner of Timer0 and the peripherals set up with it
pub struct Timer0 {
    _private: (),
}

impl Timer0 {
    /// Claim Timer0, once per program
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                None
            } else {
                taken.set(true);
                Some(Self { _private: () })
            }
        })
    }
}

impl TickTimer for Timer0 {
    fn configure(&mut self) {
        critical_section::with(|_| {
            // Timer0: fast PWM, prescale 64, overflow interrupt
            regs::TCCR0A.set_bits(bits::WGM01 | bits::WGM00);
            regs::TCCR0B.set_bits(bits::CS01 | bits::CS00);
            regs::TIMSK0.set_bits(bits::TOIE0);

            // Timer1: 8-bit phase-correct PWM, prescale 64 (8 below 8 MHz)
            regs::TCCR1B.write(0);
            regs::TCCR1B.set_bits(bits::CS11);
            if CPU_HZ >= 8_000_000 {
                regs::TCCR1B.set_bits(bits::CS10);
            }
            regs::TCCR1A.set_bits(bits::WGM10);

            // Timer2: 8-bit phase-correct PWM, prescale 64
            regs::TCCR2B.set_bits(bits::CS22);
            regs::TCCR2A.set_bits(bits::WGM20);

            crate::adc::configure(CPU_HZ);

            // The bootloader leaves RX/TX on the USART; free them for GPIO
            regs::UCSR0B.write(0);
        });
    }

    fn counter(&self) -> u8 {
        regs::TCNT0.read()
    }

    fn overflow_pending(&self) -> bool {
        regs::TIFR0.read() & bits::TOV0 != 0
    }
}
