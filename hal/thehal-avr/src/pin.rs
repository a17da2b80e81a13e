//! Port B/C/D digital I/O
//!
//! A pin is addressed by a packed `(port << 8) | bit` value, the same shape
//! the vendor headers use for `PB0`-style constants.

use thehal::gpio::{GpioError, Level, Pull, RawPin};

use crate::regs::{self, Reg8};

/// I/O port on the ATmega328P
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    B = 0,
    C = 1,
    D = 2,
}

impl Port {
    /// Port from its packed index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Port::B),
            1 => Some(Port::C),
            2 => Some(Port::D),
            _ => None,
        }
    }

    fn pin_reg(self) -> Reg8 {
        match self {
            Port::B => regs::PINB,
            Port::C => regs::PINC,
            Port::D => regs::PIND,
        }
    }

    fn ddr_reg(self) -> Reg8 {
        match self {
            Port::B => regs::DDRB,
            Port::C => regs::DDRC,
            Port::D => regs::DDRD,
        }
    }

    fn port_reg(self) -> Reg8 {
        match self {
            Port::B => regs::PORTB,
            Port::C => regs::PORTC,
            Port::D => regs::PORTD,
        }
    }
}

/// One I/O line, packed as `(port << 8) | bit`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortPin(u16);

impl PortPin {
    /// Pin `bit` (0-7) of `port`
    pub const fn new(port: Port, bit: u8) -> Self {
        assert!(bit < 8, "AVR ports are 8 bits wide");
        Self(((port as u16) << 8) | bit as u16)
    }

    /// Unpack a raw address, rejecting unknown ports and bits above 7
    pub const fn from_packed(raw: u16) -> Option<Self> {
        let bit = (raw & 0x00ff) as u8;
        match Port::from_index((raw >> 8) as u8) {
            Some(port) if bit < 8 => Some(Self::new(port, bit)),
            _ => None,
        }
    }

    /// Raw packed address
    pub const fn packed(self) -> u16 {
        self.0
    }

    /// Port this line belongs to
    pub const fn port(self) -> Port {
        match Port::from_index((self.0 >> 8) as u8) {
            Some(port) => port,
            // `new` and `from_packed` only build valid ports
            None => Port::B,
        }
    }

    /// Bit within the port
    pub const fn bit(self) -> u8 {
        (self.0 & 0x00ff) as u8
    }

    const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

impl RawPin for PortPin {
    fn configure_output(&mut self, level: Level) {
        let port = self.port();
        let mask = self.mask();
        // PORTx is shared by all eight lines; keep the read-modify-write whole
        critical_section::with(|_| {
            match level {
                Level::Low => port.port_reg().clear_bits(mask),
                Level::High => port.port_reg().set_bits(mask),
            }
            port.ddr_reg().set_bits(mask);
        });
    }

    fn configure_input(&mut self, pull: Pull) -> Result<(), GpioError> {
        // No pull-down resistors on this part
        if pull == Pull::Down {
            return Err(GpioError::UnsupportedPull);
        }
        let port = self.port();
        let mask = self.mask();
        critical_section::with(|_| {
            port.ddr_reg().clear_bits(mask);
            // In input mode the PORTx bit enables the pull-up
            match pull {
                Pull::Up => port.port_reg().set_bits(mask),
                _ => port.port_reg().clear_bits(mask),
            }
        });
        Ok(())
    }

    fn write(&mut self, level: Level) {
        let port = self.port().port_reg();
        let mask = self.mask();
        critical_section::with(|_| match level {
            Level::Low => port.clear_bits(mask),
            Level::High => port.set_bits(mask),
        });
    }

    fn read(&self) -> bool {
        self.port().pin_reg().read() & self.mask() != 0
    }
}

/// Digital output on a port pin
#[cfg(feature = "digital-out")]
pub type DigitalOut = thehal::Output<PortPin>;

/// Digital input on a port pin
#[cfg(feature = "digital-in")]
pub type DigitalIn = thehal::Input<PortPin>;
