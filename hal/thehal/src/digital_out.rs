//! Digital output capability
//!
//! [`DigitalOutput`] is the contract application code programs against;
//! [`Output`] implements it once for any backend [`RawPin`].

use crate::gpio::{GpioError, Level, RawPin};

/// Digital output line
///
/// Every operation other than `setup` fails with
/// [`GpioError::NotConfigured`] until `setup` has succeeded.
pub trait DigitalOutput {
    /// Configure the line as an output driven to `initial`
    fn setup(&mut self, initial: Level) -> Result<(), GpioError>;

    /// Configure from a raw logical value (0 or 1)
    ///
    /// Any other value fails with [`GpioError::InvalidLevel`] and leaves
    /// the line untouched.
    fn setup_raw(&mut self, value: u8) -> Result<(), GpioError> {
        let level = Level::try_from(value)?;
        self.setup(level)
    }

    /// Drive the line to logic 0
    fn set_low(&mut self) -> Result<(), GpioError>;

    /// Drive the line to logic 1
    fn set_high(&mut self) -> Result<(), GpioError>;

    /// Last commanded level, `None` before setup
    fn level(&self) -> Option<Level>;

    /// Drive the line to a specific level
    fn set_level(&mut self, level: Level) -> Result<(), GpioError> {
        match level {
            Level::Low => self.set_low(),
            Level::High => self.set_high(),
        }
    }

    /// Invert the last commanded level
    fn toggle(&mut self) -> Result<(), GpioError> {
        let level = self.level().ok_or(GpioError::NotConfigured)?;
        self.set_level(!level)
    }

    /// Check if setup has succeeded
    fn is_configured(&self) -> bool {
        self.level().is_some()
    }
}

/// Output line over a backend pin
///
/// Owns the pin exclusively; the recorded level is `None` until
/// [`DigitalOutput::setup`] succeeds.
pub struct Output<P> {
    pin: P,
    level: Option<Level>,
}

impl<P: RawPin> Output<P> {
    /// Wrap an unconfigured pin
    pub const fn new(pin: P) -> Self {
        Self { pin, level: None }
    }

    /// Borrow the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Give the pin back, dropping the capability
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, level: Level) -> Result<(), GpioError> {
        if self.level.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("digital out: drive {} before setup", level);
            return Err(GpioError::NotConfigured);
        }
        self.level = Some(level);
        self.pin.write(level);
        Ok(())
    }
}

impl<P: RawPin> DigitalOutput for Output<P> {
    fn setup(&mut self, initial: Level) -> Result<(), GpioError> {
        self.pin.configure_output(initial);
        self.level = Some(initial);
        #[cfg(feature = "defmt")]
        defmt::debug!("digital out: setup at {}", initial);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), GpioError> {
        self.drive(Level::Low)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.drive(Level::High)
    }

    fn level(&self) -> Option<Level> {
        self.level
    }
}

impl<P: RawPin> embedded_hal::digital::ErrorType for Output<P> {
    type Error = GpioError;
}

impl<P: RawPin> embedded_hal::digital::OutputPin for Output<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        DigitalOutput::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        DigitalOutput::set_high(self)
    }
}

impl<P: RawPin> embedded_hal::digital::StatefulOutputPin for Output<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.level
            .map(Level::is_high)
            .ok_or(GpioError::NotConfigured)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.level.map(Level::is_low).ok_or(GpioError::NotConfigured)
    }
}
