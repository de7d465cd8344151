//! Sampler states and receiver readings

use core::fmt;

/// State of the capture state machine
///
/// A capture run walks `Idle -> (Mark -> Space)* -> Stop`, or jumps straight
/// from `Idle` to `Stop` when no signal arrives before the beginning timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    /// Waiting for the first mark
    #[default]
    Idle,
    /// Inside a mark
    Mark,
    /// Inside a space
    Space,
    /// Capture finished; stays here until reset
    Stop,
}

impl SamplerState {
    /// Check if the capture is finished
    pub const fn is_stopped(self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Check if a transmission is being recorded
    pub const fn is_receiving(self) -> bool {
        matches!(self, Self::Mark | Self::Space)
    }
}

impl fmt::Display for SamplerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Mark => write!(f, "MARK"),
            Self::Space => write!(f, "SPACE"),
            Self::Stop => write!(f, "STOP"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SamplerState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(fmt, "IDLE"),
            Self::Mark => defmt::write!(fmt, "MARK"),
            Self::Space => defmt::write!(fmt, "SPACE"),
            Self::Stop => defmt::write!(fmt, "STOP"),
        }
    }
}

/// Instantaneous demodulated receiver level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrReading {
    /// Signal present
    Mark,
    /// Line idle
    Space,
}

impl IrReading {
    /// Check for a mark
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Mark)
    }

    /// Check for a space
    pub const fn is_space(self) -> bool {
        matches!(self, Self::Space)
    }
}
