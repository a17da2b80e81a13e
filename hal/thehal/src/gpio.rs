//! GPIO pin abstractions
//!
//! Logical levels, pull-resistor modes and the register-level contract each
//! backend implements for a single I/O line. The capability wrappers in
//! [`crate::digital_out`] and [`crate::digital_in`] sit on top of [`RawPin`].

use core::fmt;
use core::ops::Not;

/// Logical level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is logic 1
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is logic 0
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Raw logical values: only 0 and 1 are levels
impl TryFrom<u8> for Level {
    type Error = GpioError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Level::Low),
            1 => Ok(Level::High),
            _ => Err(GpioError::InvalidLevel),
        }
    }
}

/// Internal pull resistor configuration for inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Pulled towards logic 1
    Up,
    /// Pulled towards logic 0
    Down,
}

impl TryFrom<u8> for Pull {
    type Error = GpioError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Pull::None),
            1 => Ok(Pull::Up),
            2 => Ok(Pull::Down),
            _ => Err(GpioError::InvalidPull),
        }
    }
}

/// Errors from digital capability operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Raw value is neither 0 nor 1
    InvalidLevel,
    /// Raw value is not a known pull mode
    InvalidPull,
    /// The silicon has no such pull resistor
    UnsupportedPull,
    /// Operation requires a successful `setup()` first
    NotConfigured,
    /// Setup already ran and its mode is fixed
    AlreadyConfigured,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GpioError::InvalidLevel => "invalid logic level",
            GpioError::InvalidPull => "invalid pull mode",
            GpioError::UnsupportedPull => "pull mode not supported by this pin",
            GpioError::NotConfigured => "pin used before setup",
            GpioError::AlreadyConfigured => "pin already set up",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for GpioError {}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Register-level access to one I/O line
///
/// Backends implement this with direct register writes or a single vendor
/// call per operation. Whether the line has been set up is tracked by the
/// wrappers, not here, so every backend gets the same precondition checks.
pub trait RawPin {
    /// Make the line an output driving `level`
    ///
    /// The level must be latched before the direction flips so the pin
    /// never shows the opposite level.
    fn configure_output(&mut self, level: Level);

    /// Make the line an input with the given pull resistor
    ///
    /// Must validate `pull` before touching any register, so an
    /// unsupported mode leaves the line exactly as it was.
    fn configure_input(&mut self, pull: Pull) -> Result<(), GpioError>;

    /// Drive the output latch
    fn write(&mut self, level: Level);

    /// Sample the input register bit
    fn read(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_raw() {
        assert_eq!(Level::try_from(0), Ok(Level::Low));
        assert_eq!(Level::try_from(1), Ok(Level::High));
        assert_eq!(Level::try_from(2), Err(GpioError::InvalidLevel));
        assert_eq!(Level::try_from(255), Err(GpioError::InvalidLevel));
    }

    #[test]
    fn test_pull_from_raw() {
        assert_eq!(Pull::try_from(0), Ok(Pull::None));
        assert_eq!(Pull::try_from(1), Ok(Pull::Up));
        assert_eq!(Pull::try_from(2), Ok(Pull::Down));
        assert_eq!(Pull::try_from(3), Err(GpioError::InvalidPull));
        assert_eq!(Pull::default(), Pull::None);
    }

    #[test]
    fn test_level_conversions() {
        assert_eq!(!Level::Low, Level::High);
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(Level::from(true), Level::High);
        assert!(!bool::from(Level::Low));
    }
}
