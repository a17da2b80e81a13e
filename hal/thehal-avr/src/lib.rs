//! ATmega328P backend for TheHAL
//!
//! Bare-metal implementations of the `thehal` capabilities, talking to the
//! memory-mapped registers directly:
//!
//! - Port B/C/D digital I/O with packed `(port, bit)` pin addresses
//! - Timer0 overflow tick engine (`micros`/`millis`)
//! - Cycle-counted `delay_us` calibrated from `THEHAL_CPU_HZ`
//! - ADC prescaler and USART release at clock setup
//!
//! The CPU frequency is fixed at build time; see `build.rs`.

#![no_std]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt, asm_experimental_arch))]

/// Build-time clock configuration
pub mod cpu {
    include!(concat!(env!("OUT_DIR"), "/cpu.rs"));
}

mod regs;

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub mod pin;

#[cfg(feature = "time")]
pub mod adc;
#[cfg(feature = "time")]
pub mod time;
#[cfg(feature = "time")]
pub mod timer;

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub use pin::{Port, PortPin};
#[cfg(feature = "digital-in")]
pub use pin::DigitalIn;
#[cfg(feature = "digital-out")]
pub use pin::DigitalOut;
#[cfg(feature = "time")]
pub use time::Time;
#[cfg(feature = "time")]
pub use timer::{Timer0, TICKS};
