//! Tick interrupt entry points
//!
//! Board code calls one of these from its timer interrupt handler, once per
//! tick. Both are no-ops while no instance exists or the instance is disabled.

use ir_core::{IrReading, SamplerState};

use crate::controller::with_slot;
use crate::input::IrInput;

/// Advance the live sampler with an already sampled reading
///
/// Returns the state after the tick, or `None` if the tick was ignored.
pub fn on_tick(reading: IrReading) -> Option<SamplerState> {
    with_slot(|slot| {
        if slot.enabled {
            Some(slot.sampler.step(reading))
        } else {
            None
        }
    })
    .ok()
    .flatten()
}

/// Read `input` and advance the live sampler
pub fn sample_tick<I: IrInput + ?Sized>(input: &mut I) -> Option<SamplerState> {
    on_tick(input.read_ir())
}
