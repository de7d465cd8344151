//! Periodic tick timer abstraction

use crate::error::HalResult;

/// Hardware timer that fires the sampling interrupt once per tick
///
/// Callers reconfigure the timer with interrupts suppressed, so
/// implementations do not need their own locking.
pub trait TickTimer {
    /// Program the tick period, in timer counts
    fn configure(&mut self, counts_per_tick: u32) -> HalResult<()>;

    /// Start delivering tick interrupts
    fn enable_interrupt(&mut self) -> HalResult<()>;

    /// Stop delivering tick interrupts
    fn disable_interrupt(&mut self) -> HalResult<()>;
}
