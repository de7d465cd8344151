//! Receiver input
//!
//! Demodulating IR receivers pull their output low while they see a carrier,
//! so a low pin is a mark and a high pin is a space.

use ir_core::IrReading;
use ir_hal::{HalError, HalResult, InputPin, Level, PinMode};

use crate::config::SamplerConfig;

/// Source of instantaneous mark/space readings
///
/// Called once per tick from interrupt context; must return in bounded time.
pub trait IrInput {
    fn read_ir(&mut self) -> IrReading;
}

impl<F> IrInput for F
where
    F: FnMut() -> IrReading,
{
    fn read_ir(&mut self) -> IrReading {
        self()
    }
}

/// Map an active-low receiver level to a reading
pub const fn reading_from_level(level: Level) -> IrReading {
    match level {
        Level::Low => IrReading::Mark,
        Level::High => IrReading::Space,
    }
}

/// Receiver attached to a GPIO input
pub struct IrPin<P> {
    pin: P,
}

impl<P: InputPin> IrPin<P> {
    /// Configure `pin` as an input, with the pull-up if requested
    pub fn new(mut pin: P, pullup: bool) -> HalResult<Self> {
        pin.set_mode(PinMode::input(pullup))?;
        Ok(Self { pin })
    }

    /// Configure `pin` for the receiver described by `config`
    ///
    /// Fails with [`HalError::InvalidParameter`] if `pin` is not `config.pin`.
    pub fn from_config(pin: P, config: &SamplerConfig) -> HalResult<Self> {
        if pin.pin_number() != config.pin {
            return Err(HalError::InvalidParameter);
        }
        Self::new(pin, config.pullup)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> IrInput for IrPin<P> {
    /// A failed read counts as an idle line
    fn read_ir(&mut self) -> IrReading {
        match self.pin.read() {
            Ok(level) => reading_from_level(level),
            Err(_) => IrReading::Space,
        }
    }
}
