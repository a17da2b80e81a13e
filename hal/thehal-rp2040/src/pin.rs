//! GPIO lines on `embassy_rp::gpio::Flex`

use embassy_rp::gpio::{self, Flex, Pin};
use embassy_rp::Peri;
use thehal::gpio::{GpioError, Level, Pull, RawPin};

/// One bank-0 GPIO line
pub struct FlexPin {
    flex: Flex<'static>,
    number: u8,
}

impl FlexPin {
    /// Take ownership of a pin peripheral
    pub fn new(pin: Peri<'static, impl Pin>) -> Self {
        let number = pin.pin();
        Self {
            flex: Flex::new(pin),
            number,
        }
    }

    /// GPIO number (0-29)
    pub fn number(&self) -> u8 {
        self.number
    }
}

fn to_rp_level(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

fn to_rp_pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

impl RawPin for FlexPin {
    fn configure_output(&mut self, level: Level) {
        self.flex.set_level(to_rp_level(level));
        self.flex.set_as_output();
    }

    fn configure_input(&mut self, pull: Pull) -> Result<(), GpioError> {
        self.flex.set_pull(to_rp_pull(pull));
        self.flex.set_as_input();
        Ok(())
    }

    fn write(&mut self, level: Level) {
        self.flex.set_level(to_rp_level(level));
    }

    fn read(&self) -> bool {
        self.flex.is_high()
    }
}

/// Digital output on a GPIO line
#[cfg(feature = "digital-out")]
pub type DigitalOut = thehal::Output<FlexPin>;

/// Digital input on a GPIO line
#[cfg(feature = "digital-in")]
pub type DigitalIn = thehal::Input<FlexPin>;
