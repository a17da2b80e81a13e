//! In-memory pins

use thehal::gpio::{GpioError, Level, Pull, RawPin};

/// Configured direction of a dummy pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Pin that stores its configuration instead of touching hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DummyPin {
    number: u8,
    direction: Option<Direction>,
    latch: Level,
    pull: Pull,
}

impl DummyPin {
    /// Unconfigured pin with the given number
    pub const fn new(number: u8) -> Self {
        Self {
            number,
            direction: None,
            latch: Level::Low,
            pull: Pull::None,
        }
    }

    /// Pin number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Direction set by the last configure call
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Output latch
    pub fn latch(&self) -> Level {
        self.latch
    }

    /// Pull resistor set by the last input configuration
    pub fn pull(&self) -> Pull {
        self.pull
    }
}

impl RawPin for DummyPin {
    fn configure_output(&mut self, level: Level) {
        self.latch = level;
        self.direction = Some(Direction::Output);
    }

    fn configure_input(&mut self, pull: Pull) -> Result<(), GpioError> {
        self.pull = pull;
        self.direction = Some(Direction::Input);
        Ok(())
    }

    fn write(&mut self, level: Level) {
        self.latch = level;
    }

    /// Outputs read back their latch; inputs read high when floating or
    /// pulled up, low when pulled down
    fn read(&self) -> bool {
        match self.direction {
            Some(Direction::Output) => self.latch.is_high(),
            _ => self.pull != Pull::Down,
        }
    }
}

/// Digital output on a dummy pin
#[cfg(feature = "digital-out")]
pub type DigitalOut = thehal::Output<DummyPin>;

/// Digital input on a dummy pin
#[cfg(feature = "digital-in")]
pub type DigitalIn = thehal::Input<DummyPin>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_latch() {
        let mut pin = DummyPin::new(13);
        pin.configure_output(Level::High);
        assert_eq!(pin.direction(), Some(Direction::Output));
        assert!(pin.read());

        pin.write(Level::Low);
        assert_eq!(pin.latch(), Level::Low);
        assert!(!pin.read());
    }

    #[test]
    fn test_unconfigured_and_floating_read_high() {
        let mut pin = DummyPin::new(4);
        assert!(pin.read());
        pin.configure_input(Pull::None).unwrap();
        assert!(pin.read());
        pin.configure_input(Pull::Up).unwrap();
        assert!(pin.read());
    }

    #[test]
    fn test_input_pull() {
        let mut pin = DummyPin::new(2);
        assert!(pin.configure_input(Pull::None).is_ok());
        assert!(pin.read());

        assert!(pin.configure_input(Pull::Down).is_ok());
        assert_eq!(pin.pull(), Pull::Down);
        assert!(!pin.read());
    }

    #[cfg(feature = "digital-out")]
    #[test]
    fn test_digital_out_on_dummy() {
        use thehal::{DigitalOutput, GpioError};

        let mut led = DigitalOut::new(DummyPin::new(13));
        assert_eq!(led.set_high(), Err(GpioError::NotConfigured));
        assert_eq!(led.pin().direction(), None);

        led.setup(Level::Low).unwrap();
        led.set_high().unwrap();
        assert_eq!(led.pin().latch(), Level::High);
    }
}
