//! Capture state machine
//!
//! [`Sampler`] turns a stream of periodic ticks, each carrying one
//! instantaneous receiver reading, into alternating mark/space durations.
//! [`Sampler::step`] is the whole interrupt-time work: constant time, no
//! allocation, no blocking.

use ir_core::{
    millis_to_ticks, ticks_to_millis, DurationBuffer, IrReading, Microseconds, Milliseconds,
    SamplerState, Ticks, TimerClock,
};

use crate::capture::CaptureView;
use crate::config::SamplerConfig;

/// Mark/space sampler state
///
/// Owns its duration buffer. The global controller wraps one of these; it can
/// also be owned directly by code that binds its own interrupt resources.
#[derive(Debug, Clone)]
pub struct Sampler {
    state: SamplerState,
    timer: Ticks,
    durations: DurationBuffer,
    /// Set when the beginning timeout ended the run
    timed_out: bool,
    beginning_timeout: Ticks,
    ending_timeout: Ticks,
    pin: u32,
    pullup: bool,
    mark_excess: Microseconds,
    clock: TimerClock,
}

impl Sampler {
    /// Allocate the capture buffer and start in [`SamplerState::Idle`]
    pub fn new(config: &SamplerConfig) -> Self {
        Self {
            state: SamplerState::Idle,
            timer: 0,
            durations: DurationBuffer::new(config.capacity),
            timed_out: false,
            beginning_timeout: millis_to_ticks(config.beginning_timeout),
            ending_timeout: millis_to_ticks(config.ending_timeout),
            pin: config.pin,
            pullup: config.pullup,
            mark_excess: config.mark_excess,
            clock: config.clock,
        }
    }

    /// Advance one tick with the current receiver reading
    ///
    /// Returns the state after the tick.
    pub fn step(&mut self, reading: IrReading) -> SamplerState {
        self.timer = self.timer.saturating_add(1);

        if self.durations.is_full() {
            self.state = SamplerState::Stop;
        }

        match self.state {
            SamplerState::Idle => {
                if reading.is_mark() {
                    self.durations.clear();
                    self.timer = 0;
                    self.state = SamplerState::Mark;
                } else if self.timer >= self.beginning_timeout {
                    // Idle time lands in slot 0; the length stays 0.
                    self.durations.write_past_end(self.timer);
                    self.timer = 0;
                    self.state = SamplerState::Stop;
                    self.timed_out = true;
                    trace!("ir: beginning timeout");
                }
            }
            SamplerState::Mark => {
                if reading.is_space() {
                    self.record(SamplerState::Space);
                }
            }
            SamplerState::Space => {
                if reading.is_mark() {
                    self.record(SamplerState::Mark);
                } else if self.timer > self.ending_timeout {
                    // The counter is left as is, nothing accumulates in Stop.
                    self.durations.push(self.timer);
                    self.state = SamplerState::Stop;
                    trace!("ir: ending timeout after {=usize} durations", self.durations.len());
                }
            }
            SamplerState::Stop => {}
        }

        self.state
    }

    fn record(&mut self, next: SamplerState) {
        self.durations.push(self.timer);
        self.timer = 0;
        self.state = next;
    }

    /// Start over in [`SamplerState::Idle`] with an empty capture
    ///
    /// Keeps the buffer allocation and the tick counter.
    pub fn reset(&mut self) {
        self.state = SamplerState::Idle;
        self.durations.clear();
        self.timed_out = false;
    }

    /// Current state
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Check if the capture is finished
    pub fn is_ready(&self) -> bool {
        self.state.is_stopped()
    }

    /// Idle ticks written to slot 0 when the beginning timeout ended the run
    ///
    /// `None` for every other capture, including an empty one stopped by a
    /// zero capacity.
    pub fn idle_ticks(&self) -> Option<Ticks> {
        if self.timed_out {
            self.durations.slots().first().copied()
        } else {
            None
        }
    }

    /// Ticks since the last recorded transition
    pub fn tick_counter(&self) -> Ticks {
        self.timer
    }

    /// Number of recorded durations
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Check if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Maximum number of durations
    pub fn capacity(&self) -> usize {
        self.durations.capacity()
    }

    /// Recorded durations in ticks
    pub fn durations(&self) -> &[Ticks] {
        self.durations.as_slice()
    }

    /// Underlying buffer, including slots past the recorded length
    pub fn buffer(&self) -> &DurationBuffer {
        &self.durations
    }

    /// Read-only view for the decoding layer
    pub fn capture(&self) -> CaptureView<'_> {
        CaptureView::new(self.durations.as_slice(), self.state, self.mark_excess)
    }

    /// Beginning timeout in milliseconds
    pub fn beginning_timeout(&self) -> Milliseconds {
        ticks_to_millis(self.beginning_timeout)
    }

    /// Beginning timeout in ticks
    pub fn beginning_timeout_ticks(&self) -> Ticks {
        self.beginning_timeout
    }

    pub fn set_beginning_timeout(&mut self, timeout: Milliseconds) {
        self.beginning_timeout = millis_to_ticks(timeout);
    }

    /// Ending timeout in milliseconds
    pub fn ending_timeout(&self) -> Milliseconds {
        ticks_to_millis(self.ending_timeout)
    }

    /// Ending timeout in ticks
    pub fn ending_timeout_ticks(&self) -> Ticks {
        self.ending_timeout
    }

    pub fn set_ending_timeout(&mut self, timeout: Milliseconds) {
        self.ending_timeout = millis_to_ticks(timeout);
    }

    /// Receiver input pin number
    pub fn pin(&self) -> u32 {
        self.pin
    }

    /// Whether the input pin uses the internal pull-up
    pub fn pullup(&self) -> bool {
        self.pullup
    }

    /// Mark length compensation in microseconds
    pub fn mark_excess(&self) -> Microseconds {
        self.mark_excess
    }

    /// Clock feeding the sampling timer
    pub fn clock(&self) -> TimerClock {
        self.clock
    }
}
