//! Hardware Abstraction Layer (HAL) for the IR sampler
//!
//! Vendor-agnostic traits for the two peripherals a sampling receiver needs:
//! a digital input pin and a periodic tick timer. Board crates implement
//! these; the sampler state machine never touches registers directly.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod error;
pub mod gpio;
pub mod timer;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{EhInputPin, InputPin, Level, PinMode};
pub use timer::TickTimer;
