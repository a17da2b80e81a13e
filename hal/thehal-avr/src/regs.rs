//! ATmega328P memory-mapped registers
//!
//! Addresses are data-space addresses (I/O address + 0x20 for the low
//! registers), as used by `ld`/`st`.

// Which registers are used depends on the enabled capabilities
#![allow(dead_code)]

use core::ptr::{read_volatile, write_volatile};

/// One 8-bit memory-mapped register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg8(usize);

impl Reg8 {
    const fn at(addr: usize) -> Self {
        Self(addr)
    }

    #[inline(always)]
    pub fn read(self) -> u8 {
        // SAFETY: every `Reg8` constant below is a valid ATmega328P register
        unsafe { read_volatile(self.0 as *const u8) }
    }

    #[inline(always)]
    pub fn write(self, value: u8) {
        // SAFETY: see `read`
        unsafe { write_volatile(self.0 as *mut u8, value) }
    }

    /// Read-modify-write; callers must hold a critical section if an ISR
    /// also writes this register.
    #[inline(always)]
    pub fn set_bits(self, mask: u8) {
        self.write(self.read() | mask);
    }

    /// See [`Reg8::set_bits`]
    #[inline(always)]
    pub fn clear_bits(self, mask: u8) {
        self.write(self.read() & !mask);
    }
}

// ============================================================================
// Ports
// ============================================================================

pub const PINB: Reg8 = Reg8::at(0x23);
pub const DDRB: Reg8 = Reg8::at(0x24);
pub const PORTB: Reg8 = Reg8::at(0x25);
pub const PINC: Reg8 = Reg8::at(0x26);
pub const DDRC: Reg8 = Reg8::at(0x27);
pub const PORTC: Reg8 = Reg8::at(0x28);
pub const PIND: Reg8 = Reg8::at(0x29);
pub const DDRD: Reg8 = Reg8::at(0x2A);
pub const PORTD: Reg8 = Reg8::at(0x2B);

// ============================================================================
// Timers
// ============================================================================

pub const TIFR0: Reg8 = Reg8::at(0x35);
pub const TCCR0A: Reg8 = Reg8::at(0x44);
pub const TCCR0B: Reg8 = Reg8::at(0x45);
pub const TCNT0: Reg8 = Reg8::at(0x46);
pub const TIMSK0: Reg8 = Reg8::at(0x6E);
pub const TCCR1A: Reg8 = Reg8::at(0x80);
pub const TCCR1B: Reg8 = Reg8::at(0x81);
pub const TCCR2A: Reg8 = Reg8::at(0xB0);
pub const TCCR2B: Reg8 = Reg8::at(0xB1);

// ============================================================================
// ADC and USART
// ============================================================================

pub const ADCSRA: Reg8 = Reg8::at(0x7A);
pub const UCSR0B: Reg8 = Reg8::at(0xC1);

/// Bit masks
pub mod bits {
    pub const TOV0: u8 = 1 << 0;
    pub const TOIE0: u8 = 1 << 0;
    pub const WGM00: u8 = 1 << 0;
    pub const WGM01: u8 = 1 << 1;
    pub const CS00: u8 = 1 << 0;
    pub const CS01: u8 = 1 << 1;
    pub const WGM10: u8 = 1 << 0;
    pub const CS10: u8 = 1 << 0;
    pub const CS11: u8 = 1 << 1;
    pub const WGM20: u8 = 1 << 0;
    pub const CS22: u8 = 1 << 2;
    pub const ADEN: u8 = 1 << 7;
    pub const ADPS_MASK: u8 = 0b111;
}
