//! Digital input capability

use crate::gpio::{GpioError, Pull, RawPin};

/// Digital input line
pub trait DigitalInput {
    /// Configure the line as an input with the given pull resistor
    ///
    /// The pull mode is fixed from here on; a second call returns
    /// [`GpioError::AlreadyConfigured`] without touching the pin.
    fn setup(&mut self, pull: Pull) -> Result<(), GpioError>;

    /// Configure from a raw pull mode (0 none, 1 up, 2 down)
    fn setup_raw(&mut self, value: u8) -> Result<(), GpioError> {
        let pull = Pull::try_from(value)?;
        self.setup(pull)
    }

    /// Sample the line
    fn read(&self) -> bool;

    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool {
        self.read()
    }

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.read()
    }
}

/// Input line over a backend pin
pub struct Input<P> {
    pin: P,
    pull: Option<Pull>,
}

impl<P: RawPin> Input<P> {
    /// Wrap an unconfigured pin
    pub const fn new(pin: P) -> Self {
        Self { pin, pull: None }
    }

    /// Pull mode applied by setup, `None` before setup
    pub fn pull(&self) -> Option<Pull> {
        self.pull
    }

    /// Borrow the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Give the pin back, dropping the capability
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: RawPin> DigitalInput for Input<P> {
    fn setup(&mut self, pull: Pull) -> Result<(), GpioError> {
        if self.pull.is_some() {
            return Err(GpioError::AlreadyConfigured);
        }
        if let Err(e) = self.pin.configure_input(pull) {
            #[cfg(feature = "defmt")]
            defmt::warn!("digital in: setup with {} rejected: {}", pull, e);
            return Err(e);
        }
        self.pull = Some(pull);
        Ok(())
    }

    fn read(&self) -> bool {
        self.pin.read()
    }
}

impl<P: RawPin> embedded_hal::digital::ErrorType for Input<P> {
    type Error = GpioError;
}

impl<P: RawPin> embedded_hal::digital::InputPin for Input<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.read())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pin.read())
    }
}
