//! RP2040 backend for TheHAL
//!
//! Implements the `thehal` capabilities on top of `embassy-rp`:
//!
//! - GPIO lines addressed by bank-0 pin number, driven through `Flex`
//! - Clock backed by the embassy time driver (1 MHz hardware timer)
//!
//! Unlike the AVR backend there is no tick engine here: the RP2040 timer is
//! already a 64-bit microsecond counter, and `embassy_rp::init` starts it.

#![no_std]

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub mod pin;
#[cfg(feature = "time")]
pub mod time;

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub use pin::FlexPin;
#[cfg(feature = "digital-in")]
pub use pin::DigitalIn;
#[cfg(feature = "digital-out")]
pub use pin::DigitalOut;
#[cfg(feature = "time")]
pub use time::Time;
