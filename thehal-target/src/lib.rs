//! Build-time backend selection for TheHAL
//!
//! Exactly one backend feature picks the implementation behind
//! [`DigitalOut`], [`DigitalIn`] and [`Time`]. Application code names only
//! these aliases and the `thehal` traits, so the same source builds for
//! every target:
//!
//! | Feature  | Backend         | Target                 |
//! |----------|-----------------|------------------------|
//! | `host`   | `thehal-host`   | desktop (default)      |
//! | `avr`    | `thehal-avr`    | ATmega328P, bare metal |
//! | `rp2040` | `thehal-rp2040` | RP2040 on embassy      |
//!
//! ```ignore
//! use thehal_target::prelude::*;
//!
//! let mut led = DigitalOut::new(pin);
//! led.setup(Level::Low)?;
//! led.toggle()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(not(any(feature = "host", feature = "avr", feature = "rp2040")))]
compile_error!(
    "No backend selected.

    Enable exactly one of the following features:

    * host
    * avr
    * rp2040
    "
);

#[cfg(any(
    all(feature = "host", feature = "avr"),
    all(feature = "host", feature = "rp2040"),
    all(feature = "avr", feature = "rp2040"),
))]
compile_error!(
    "Several backends selected. `host` is a default feature; \
     build with `--no-default-features --features avr` (or `rp2040`)."
);

#[cfg(feature = "host")]
use thehal_host as backend;

#[cfg(all(feature = "avr", not(feature = "host")))]
use thehal_avr as backend;

#[cfg(all(feature = "rp2040", not(any(feature = "host", feature = "avr"))))]
use thehal_rp2040 as backend;

pub use thehal::{GpioError, Level, Pull};

#[cfg(feature = "digital-out")]
pub use thehal::DigitalOutput;
#[cfg(feature = "digital-in")]
pub use thehal::DigitalInput;
#[cfg(feature = "time")]
pub use thehal::{Clock, Delay};

/// Digital output for the selected backend
#[cfg(feature = "digital-out")]
pub type DigitalOut = backend::DigitalOut;

/// Digital input for the selected backend
#[cfg(feature = "digital-in")]
pub type DigitalIn = backend::DigitalIn;

/// Clock for the selected backend
#[cfg(feature = "time")]
pub type Time = backend::Time;

/// Pin address type for the selected backend
#[cfg(all(feature = "host", any(feature = "digital-out", feature = "digital-in")))]
pub type BoardPin = thehal_host::DummyPin;
/// Pin address type for the selected backend
#[cfg(all(
    feature = "avr",
    not(feature = "host"),
    any(feature = "digital-out", feature = "digital-in")
))]
pub type BoardPin = thehal_avr::PortPin;
/// Pin address type for the selected backend
#[cfg(all(
    feature = "rp2040",
    not(any(feature = "host", feature = "avr")),
    any(feature = "digital-out", feature = "digital-in")
))]
pub type BoardPin = thehal_rp2040::FlexPin;

/// Traits and aliases most firmware needs
pub mod prelude {
    pub use crate::{GpioError, Level, Pull};

    #[cfg(feature = "digital-in")]
    pub use crate::{DigitalIn, DigitalInput};
    #[cfg(feature = "digital-out")]
    pub use crate::{DigitalOut, DigitalOutput};
    #[cfg(feature = "time")]
    pub use crate::{Clock, Time};
}
