#![no_std]
#![forbid(unsafe_code)]

//! # IR Core
//!
//! Building blocks shared by the infrared capture crates: conversion between
//! milliseconds and timer ticks, the fixed-capacity duration buffer the
//! sampler records into, and the state/reading types its state machine runs on.
//!
//! Nothing in here touches hardware. The interrupt binding and the singleton
//! lifecycle live in `ir-sampler`; the hardware traits live in `ir-hal`.

extern crate alloc;

pub mod buffer;
pub mod states;
pub mod time;

pub use buffer::*;
pub use states::*;
pub use time::*;

/// IR core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
