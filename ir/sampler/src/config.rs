//! Sampler construction parameters

use ir_core::{Microseconds, Milliseconds, TimerClock};

/// Default number of durations a capture can hold
pub const DEFAULT_CAPACITY: usize = 100;

/// Default mark length compensation of typical demodulating receivers
pub const DEFAULT_MARK_EXCESS: Microseconds = 50;

/// Default wait for the first mark
pub const DEFAULT_BEGINNING_TIMEOUT: Milliseconds = 2000;

/// Default space length that ends a transmission
pub const DEFAULT_ENDING_TIMEOUT: Milliseconds = 35;

/// Parameters for creating a sampler
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Number of durations the capture buffer holds
    pub capacity: usize,
    /// Receiver input pin number
    pub pin: u32,
    /// Enable the internal pull-up on the input pin
    pub pullup: bool,
    /// Microseconds receivers stretch marks by (and shorten spaces by)
    pub mark_excess: Microseconds,
    /// Wait for the first mark before giving up
    pub beginning_timeout: Milliseconds,
    /// Space length that ends a transmission
    pub ending_timeout: Milliseconds,
    /// Clock feeding the sampling timer
    pub clock: TimerClock,
}

impl SamplerConfig {
    /// Defaults for a receiver on `pin`
    pub const fn new(pin: u32) -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            pin,
            pullup: false,
            mark_excess: DEFAULT_MARK_EXCESS,
            beginning_timeout: DEFAULT_BEGINNING_TIMEOUT,
            ending_timeout: DEFAULT_ENDING_TIMEOUT,
            clock: TimerClock::DEFAULT,
        }
    }

    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub const fn with_pullup(mut self, pullup: bool) -> Self {
        self.pullup = pullup;
        self
    }

    pub const fn with_mark_excess(mut self, mark_excess: Microseconds) -> Self {
        self.mark_excess = mark_excess;
        self
    }

    pub const fn with_beginning_timeout(mut self, timeout: Milliseconds) -> Self {
        self.beginning_timeout = timeout;
        self
    }

    pub const fn with_ending_timeout(mut self, timeout: Milliseconds) -> Self {
        self.ending_timeout = timeout;
        self
    }

    pub const fn with_clock(mut self, clock: TimerClock) -> Self {
        self.clock = clock;
        self
    }
}
