//! Application-level use of the selected backend on host.

use thehal_target::prelude::*;
use thehal_target::BoardPin;

/// What a blink loop looks like against the facade
fn blink<C: Clock>(led: &mut DigitalOut, clock: &C, times: u32) -> Result<(), GpioError> {
    for _ in 0..times {
        led.toggle()?;
        clock.delay_ms(500);
    }
    Ok(())
}

#[test]
fn test_blink_requires_setup() {
    let mut led = DigitalOut::new(BoardPin::new(13));
    let mut clock = Time::new();
    clock.setup();

    assert_eq!(blink(&mut led, &clock, 1), Err(GpioError::NotConfigured));

    led.setup(Level::Low).unwrap();
    assert!(blink(&mut led, &clock, 3).is_ok());
    assert_eq!(led.level(), Some(Level::High));
    assert_eq!(led.pin().latch(), Level::High);
}

#[test]
fn test_setup_raw_invalid_keeps_pin_undefined() {
    let mut led = DigitalOut::new(BoardPin::new(5));
    assert_eq!(led.setup_raw(2), Err(GpioError::InvalidLevel));
    assert_eq!(led.level(), None);
    assert_eq!(led.pin().direction(), None);
}

#[test]
fn test_button_input() {
    let mut button = DigitalIn::new(BoardPin::new(2));
    button.setup(Pull::Up).unwrap();
    assert!(button.read());
    assert_eq!(button.pull(), Some(Pull::Up));
    assert_eq!(button.setup(Pull::Down), Err(GpioError::AlreadyConfigured));
    assert!(button.read());

    let mut sensor = DigitalIn::new(BoardPin::new(3));
    sensor.setup_raw(2).unwrap();
    assert!(sensor.is_low());
}

#[test]
fn test_embedded_hal_driver_interop() {
    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::OutputPin;

    fn pulse<P: OutputPin, D: DelayNs>(pin: &mut P, delay: &mut D) -> Result<(), P::Error> {
        pin.set_high()?;
        delay.delay_us(10);
        pin.set_low()
    }

    let clock = Time::new();
    let mut delay = thehal_target::Delay::new(&clock);
    let mut trigger = DigitalOut::new(BoardPin::new(7));
    DigitalOutput::setup(&mut trigger, Level::Low).unwrap();

    assert!(pulse(&mut trigger, &mut delay).is_ok());
    assert_eq!(trigger.level(), Some(Level::Low));
}
