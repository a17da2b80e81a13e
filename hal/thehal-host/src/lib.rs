//! Host backend for TheHAL
//!
//! Lets firmware written against `thehal` build and run on a desktop.
//! Pins remember what they were told and read back accordingly; the clock
//! never advances and delays return immediately.

#![no_std]

// Links the `std` critical-section implementation into host binaries
use critical_section as _;

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub mod pin;
#[cfg(feature = "time")]
pub mod time;

#[cfg(any(feature = "digital-out", feature = "digital-in"))]
pub use pin::{Direction, DummyPin};
#[cfg(feature = "digital-in")]
pub use pin::DigitalIn;
#[cfg(feature = "digital-out")]
pub use pin::DigitalOut;
#[cfg(feature = "time")]
pub use time::{DummyClock, Time};
