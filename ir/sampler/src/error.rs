//! Sampler error types

use core::fmt;

use ir_hal::HalError;

/// Result type for sampler operations
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Errors reported by the sampler controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerError {
    /// A sampler instance is already live
    InstanceExists,
    /// The sampler instance was destroyed
    NoInstance,
    /// The instance is already borrowed, e.g. from inside a
    /// `with_capture` callback
    Busy,
    /// Tick timer or input pin failed
    Hal(HalError),
}

impl From<HalError> for SamplerError {
    fn from(err: HalError) -> Self {
        Self::Hal(err)
    }
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstanceExists => write!(f, "sampler instance already exists"),
            Self::NoInstance => write!(f, "no sampler instance"),
            Self::Busy => write!(f, "sampler instance in use"),
            Self::Hal(err) => write!(f, "hardware error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SamplerError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SamplerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InstanceExists => defmt::write!(fmt, "InstanceExists"),
            Self::NoInstance => defmt::write!(fmt, "NoInstance"),
            Self::Busy => defmt::write!(fmt, "Busy"),
            Self::Hal(err) => defmt::write!(fmt, "Hal({})", err),
        }
    }
}
