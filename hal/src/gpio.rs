//! GPIO input abstraction

use crate::error::{HalError, HalResult};

/// GPIO input pin modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input (floating)
    Input,
    /// Input with pull-up resistor
    InputPullUp,
    /// Input with pull-down resistor
    InputPullDown,
}

impl PinMode {
    /// Input mode for a receiver with or without the internal pull-up
    pub const fn input(pullup: bool) -> Self {
        if pullup {
            Self::InputPullUp
        } else {
            Self::Input
        }
    }
}

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
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

/// Digital input pin
///
/// `read` is called from interrupt context and must return in bounded time.
pub trait InputPin {
    /// Configure pin mode
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()>;

    /// Read current level
    fn read(&mut self) -> HalResult<Level>;

    /// Get pin number
    fn pin_number(&self) -> u32;
}

/// [`InputPin`] over an `embedded-hal` 1.0 digital input
///
/// `embedded-hal` pins fix their mode when constructed, so `set_mode` only
/// accepts the mode the pin was built with.
pub struct EhInputPin<P> {
    pin: P,
    number: u32,
    mode: PinMode,
}

impl<P> EhInputPin<P>
where
    P: embedded_hal::digital::InputPin,
{
    /// Wrap an already configured pin
    pub fn new(pin: P, number: u32, mode: PinMode) -> Self {
        Self { pin, number, mode }
    }

    /// Mode the wrapped pin was configured with
    pub fn mode(&self) -> PinMode {
        self.mode
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> InputPin for EhInputPin<P>
where
    P: embedded_hal::digital::InputPin,
{
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        if mode == self.mode {
            Ok(())
        } else {
            Err(HalError::NotSupported)
        }
    }

    fn read(&mut self) -> HalResult<Level> {
        self.pin
            .is_high()
            .map(Level::from)
            .map_err(|_| HalError::HardwareError)
    }

    fn pin_number(&self) -> u32 {
        self.number
    }
}
