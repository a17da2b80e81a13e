//! TheHAL Hardware Abstraction Layer
//!
//! This crate defines the capability traits every backend implements, plus
//! the backend-independent engines the bare-metal backends build on. The
//! same application code compiles against whichever backend the build picks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thehal-target (one backend by feature) │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//! ┌─────────────┐ ┌─────────┐ ┌─────────────┐
//! │ thehal-avr  │ │ thehal- │ │ thehal-host │
//! │ (bare-metal)│ │ rp2040  │ │   (dummy)   │
//! └─────────────┘ └─────────┘ └─────────────┘
//!         │           │           │
//!         └───────────┼───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thehal (this crate - traits + engines) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Capabilities
//!
//! - [`digital_out::DigitalOutput`] - Digital output lines (`digital-out`)
//! - [`digital_in::DigitalInput`] - Digital input lines (`digital-in`)
//! - [`clock::Clock`] - Monotonic time and blocking delays (`time`)
//!
//! # Engines
//!
//! - [`tick`] - Overflow-interrupt tick accounting for free-running 8-bit timers
//! - [`delay`] - Frequency-band calibration for cycle-counted busy-waits

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

#[cfg(feature = "digital-in")]
pub mod digital_in;
#[cfg(feature = "digital-out")]
pub mod digital_out;

#[cfg(feature = "time")]
pub mod clock;
#[cfg(feature = "time")]
pub mod delay;
#[cfg(feature = "time")]
pub mod tick;

// Re-export key types at crate root for convenience
pub use gpio::{GpioError, Level, Pull, RawPin};

#[cfg(feature = "digital-in")]
pub use digital_in::{DigitalInput, Input};
#[cfg(feature = "digital-out")]
pub use digital_out::{DigitalOutput, Output};

#[cfg(feature = "time")]
pub use clock::{Clock, Delay};
#[cfg(feature = "time")]
pub use delay::DelayBand;
#[cfg(feature = "time")]
pub use tick::{TickClock, TickConfig, TickDriver, TickState, TickTimer};
