#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # IR Sampler
//!
//! Captures the raw timing of an infrared signal. A periodic timer interrupt
//! samples the receiver once per tick; the sampler turns those samples into
//! alternating mark/space durations for a protocol decoder to consume.
//!
//! ## Layout
//! - [`machine`]    – the IDLE/MARK/SPACE/STOP capture state machine.
//! - [`controller`] – single-instance lifecycle, enable/disable, timeouts.
//! - [`isr`]        – entry points for the board's tick interrupt handler.
//! - [`input`]      – active-low receiver input over an `ir-hal` pin.
//! - [`capture`]    – read-only capture views and owned snapshots.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ir_sampler::{create_instance, isr, IrPin, SamplerConfig};
//!
//! let config = SamplerConfig::new(5).with_capacity(200);
//! let mut receiver = IrPin::from_config(board_pin, &config)?;
//! let sampler = create_instance(config)?;
//! sampler.enable(&mut board_timer)?;
//!
//! // in the timer interrupt handler
//! isr::sample_tick(&mut receiver);
//!
//! // back in the foreground
//! if sampler.is_ready()? {
//!     let capture = sampler.snapshot::<200>()?;
//!     decode(capture.view());
//! }
//! ```

#[macro_use]
mod fmt;

pub mod capture;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod isr;
pub mod machine;

pub use capture::{Capture, CaptureView};
pub use config::SamplerConfig;
pub use controller::{create_instance, destroy_instance, instance_exists, SamplerHandle};
pub use error::{SamplerError, SamplerResult};
pub use input::{IrInput, IrPin};
pub use ir_core::{IrReading, Microseconds, Milliseconds, SamplerState, Ticks, TimerClock};
pub use machine::Sampler;
