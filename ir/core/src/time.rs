//! Tick period constants and millisecond/tick conversion
//!
//! One tick is one firing of the periodic sampling interrupt. Both conversions
//! truncate, so a round trip through ticks can lose up to one tick period of
//! millisecond resolution. That loss is expected.

use core::fmt;

/// Tick count since the last recorded transition
pub type Ticks = u32;

/// Human-facing timeout unit
pub type Milliseconds = u16;

/// Duration unit reported to the decoding layer
pub type Microseconds = u16;

/// Length of one sampling tick in microseconds
pub const USEC_PER_TICK: u32 = 50;

/// Main system clock feeding the sampling timer
pub const SYSCLOCK_HZ: u32 = 16_000_000;

/// Sampling timer clock prescale
pub const PRESCALE: u32 = 8;

/// Convert a millisecond duration to whole ticks (truncating).
///
/// `floor(1000 * ms / USEC_PER_TICK)`
pub const fn millis_to_ticks(ms: Milliseconds) -> Ticks {
    (1000 * ms as u32) / USEC_PER_TICK
}

/// Convert a tick count to whole milliseconds (truncating).
///
/// `floor(ticks * USEC_PER_TICK / 1000)`, saturating at [`Milliseconds::MAX`].
pub const fn ticks_to_millis(ticks: Ticks) -> Milliseconds {
    let ms = (ticks as u64 * USEC_PER_TICK as u64) / 1000;
    if ms > Milliseconds::MAX as u64 {
        Milliseconds::MAX
    } else {
        ms as Milliseconds
    }
}

/// Convert a tick count to microseconds without narrowing.
pub const fn ticks_to_micros(ticks: Ticks) -> u64 {
    ticks as u64 * USEC_PER_TICK as u64
}

/// Clock feeding the hardware sampling timer
///
/// Only used to derive how many timer counts make up one tick; the tick
/// length itself is fixed by [`USEC_PER_TICK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerClock {
    /// System clock in Hz
    pub sysclock_hz: u32,
    /// Timer prescale divider
    pub prescale: u32,
}

impl TimerClock {
    /// Board default: 16 MHz system clock, prescale 8
    pub const DEFAULT: Self = Self::new(SYSCLOCK_HZ, PRESCALE);

    /// Create a timer clock description
    pub const fn new(sysclock_hz: u32, prescale: u32) -> Self {
        Self {
            sysclock_hz,
            prescale,
        }
    }

    /// Whole timer counts per microsecond, 0 for a zero prescale
    pub const fn clocks_per_usec(&self) -> u32 {
        if self.prescale == 0 {
            return 0;
        }
        self.sysclock_hz / self.prescale / 1_000_000
    }

    /// Timer counts making up one sampling tick
    ///
    /// Scales by the tick length before dividing so clocks that are not a
    /// whole number of MHz per prescale step keep a [`USEC_PER_TICK`] tick. Returns 0
    /// when the clock cannot produce a tick (zero prescale, or fewer than one
    /// count per tick); such a clock must not be programmed.
    pub const fn counts_per_tick(&self) -> u32 {
        if self.prescale == 0 {
            return 0;
        }
        (self.sysclock_hz as u64 * USEC_PER_TICK as u64 / 1_000_000 / self.prescale as u64) as u32
    }

    /// Check if the clock can drive the sampling timer
    pub const fn is_valid(&self) -> bool {
        self.counts_per_tick() > 0
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TimerClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz/{}", self.sysclock_hz, self.prescale)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerClock {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}Hz/{}", self.sysclock_hz, self.prescale);
    }
}
