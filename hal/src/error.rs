//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Operation not supported by this implementation
    NotSupported,
    /// Hardware error occurred
    HardwareError,
    /// Configuration error
    ConfigurationError,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::NotSupported => write!(f, "operation not supported"),
            Self::HardwareError => write!(f, "hardware error"),
            Self::ConfigurationError => write!(f, "configuration error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
