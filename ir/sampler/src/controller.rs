//! Single-instance sampler lifecycle
//!
//! The tick interrupt has no way to receive parameters, so the live sampler
//! sits in a global slot guarded by a critical section. At most one instance
//! exists at a time and only one [`SamplerHandle`] refers to it.
//!
//! Every operation below runs inside `critical_section::with`, which keeps the
//! tick interrupt from observing a half-updated instance.

use core::cell::RefCell;

use critical_section::Mutex;
use ir_core::{Microseconds, Milliseconds, SamplerState, Ticks};
use ir_hal::{HalError, TickTimer};

use crate::capture::{Capture, CaptureView};
use crate::config::SamplerConfig;
use crate::error::{SamplerError, SamplerResult};
use crate::machine::Sampler;

pub(crate) struct Slot {
    pub(crate) sampler: Sampler,
    /// Bound to the tick source; ticks are ignored otherwise
    pub(crate) enabled: bool,
}

pub(crate) static INSTANCE: Mutex<RefCell<Option<Slot>>> = Mutex::new(RefCell::new(None));

/// Run `f` on the live instance with exclusive access
///
/// Fails with [`SamplerError::Busy`] instead of panicking when the instance is
/// already borrowed, which only happens from inside a `with_capture` callback.
pub(crate) fn with_slot<F, R>(f: F) -> SamplerResult<R>
where
    F: FnOnce(&mut Slot) -> R,
{
    critical_section::with(|cs| {
        let mut guard = INSTANCE
            .borrow(cs)
            .try_borrow_mut()
            .map_err(|_| SamplerError::Busy)?;
        guard.as_mut().map(f).ok_or(SamplerError::NoInstance)
    })
}

/// Run `f` on the live instance with shared access
pub(crate) fn with_slot_ref<F, R>(f: F) -> SamplerResult<R>
where
    F: FnOnce(&Slot) -> R,
{
    critical_section::with(|cs| {
        let guard = INSTANCE
            .borrow(cs)
            .try_borrow()
            .map_err(|_| SamplerError::Busy)?;
        guard.as_ref().map(f).ok_or(SamplerError::NoInstance)
    })
}

/// Create the sampler instance
///
/// Allocates a buffer of `config.capacity` durations and starts in
/// [`SamplerState::Idle`], disabled. Fails with
/// [`SamplerError::InstanceExists`] and changes nothing if an instance is
/// already live.
pub fn create_instance(config: SamplerConfig) -> SamplerResult<SamplerHandle> {
    if instance_exists() {
        return Err(SamplerError::InstanceExists);
    }

    let sampler = Sampler::new(&config);

    critical_section::with(|cs| {
        let mut slot = INSTANCE
            .borrow(cs)
            .try_borrow_mut()
            .map_err(|_| SamplerError::Busy)?;
        if slot.is_some() {
            return Err(SamplerError::InstanceExists);
        }
        *slot = Some(Slot {
            sampler,
            enabled: false,
        });
        Ok(())
    })?;

    info!(
        "ir: sampler created on pin {=u32}, {=usize} slots",
        config.pin, config.capacity
    );
    Ok(SamplerHandle { _private: () })
}

/// Destroy the sampler instance and release its buffer
///
/// No-op if there is no instance. Refused with [`SamplerError::Busy`] while
/// a `with_capture` callback is running; the instance then stays live.
pub fn destroy_instance() -> SamplerResult<()> {
    let slot = critical_section::with(|cs| {
        INSTANCE
            .borrow(cs)
            .try_borrow_mut()
            .map(|mut slot| slot.take())
            .map_err(|_| SamplerError::Busy)
    })?;

    if let Some(slot) = slot {
        if slot.enabled {
            warn!("ir: sampler destroyed while enabled");
        }
        debug!("ir: sampler destroyed");
        // Buffer is freed here, outside the critical section.
        drop(slot);
    }
    Ok(())
}

/// Check if a sampler instance is live
pub fn instance_exists() -> bool {
    critical_section::with(|cs| {
        INSTANCE
            .borrow(cs)
            .try_borrow()
            .map_or(true, |slot| slot.is_some())
    })
}

/// Handle to the live sampler instance
///
/// Not `Clone`: the handle returned by [`create_instance`] is the only one.
/// Operations fail with [`SamplerError::NoInstance`] once the instance has been
/// destroyed.
#[derive(Debug)]
pub struct SamplerHandle {
    _private: (),
}

impl SamplerHandle {
    fn with<F, R>(&self, f: F) -> SamplerResult<R>
    where
        F: FnOnce(&mut Slot) -> R,
    {
        with_slot(f)
    }

    fn with_ref<F, R>(&self, f: F) -> SamplerResult<R>
    where
        F: FnOnce(&Slot) -> R,
    {
        with_slot_ref(f)
    }

    /// Back to [`SamplerState::Idle`] with an empty capture
    pub fn reset(&self) -> SamplerResult<()> {
        self.with(|slot| slot.sampler.reset())
    }

    /// Reset, then program and start the tick timer
    ///
    /// Fails with [`HalError::ConfigurationError`] without touching the timer
    /// if the configured clock cannot produce a tick.
    pub fn enable<T: TickTimer>(&self, timer: &mut T) -> SamplerResult<()> {
        self.reset()?;

        self.with(|slot| {
            let counts = slot.sampler.clock().counts_per_tick();
            if counts == 0 {
                return Err(SamplerError::Hal(HalError::ConfigurationError));
            }
            timer.configure(counts)?;
            timer.enable_interrupt()?;
            slot.enabled = true;
            Ok(())
        })??;

        debug!("ir: sampler enabled");
        Ok(())
    }

    /// Stop the tick timer; the capture is left as is
    pub fn disable<T: TickTimer>(&self, timer: &mut T) -> SamplerResult<()> {
        self.with(|slot| {
            timer.disable_interrupt()?;
            slot.enabled = false;
            Ok::<(), SamplerError>(())
        })??;

        debug!("ir: sampler disabled");
        Ok(())
    }

    /// Check if the instance is bound to the tick source
    pub fn is_enabled(&self) -> SamplerResult<bool> {
        self.with_ref(|slot| slot.enabled)
    }

    pub fn beginning_timeout(&self) -> SamplerResult<Milliseconds> {
        self.with_ref(|slot| slot.sampler.beginning_timeout())
    }

    pub fn set_beginning_timeout(&self, timeout: Milliseconds) -> SamplerResult<()> {
        self.with(|slot| slot.sampler.set_beginning_timeout(timeout))
    }

    pub fn ending_timeout(&self) -> SamplerResult<Milliseconds> {
        self.with_ref(|slot| slot.sampler.ending_timeout())
    }

    pub fn set_ending_timeout(&self, timeout: Milliseconds) -> SamplerResult<()> {
        self.with(|slot| slot.sampler.set_ending_timeout(timeout))
    }

    pub fn state(&self) -> SamplerResult<SamplerState> {
        self.with_ref(|slot| slot.sampler.state())
    }

    /// Number of recorded durations
    pub fn len(&self) -> SamplerResult<usize> {
        self.with_ref(|slot| slot.sampler.len())
    }

    pub fn capacity(&self) -> SamplerResult<usize> {
        self.with_ref(|slot| slot.sampler.capacity())
    }

    /// Check if the capture is finished
    pub fn is_ready(&self) -> SamplerResult<bool> {
        self.with_ref(|slot| slot.sampler.is_ready())
    }

    /// Idle ticks recorded when no mark arrived before the beginning timeout
    ///
    /// Tells a timed out run apart from an otherwise empty capture.
    pub fn idle_ticks(&self) -> SamplerResult<Option<Ticks>> {
        self.with_ref(|slot| slot.sampler.idle_ticks())
    }

    pub fn pin(&self) -> SamplerResult<u32> {
        self.with_ref(|slot| slot.sampler.pin())
    }

    pub fn pullup(&self) -> SamplerResult<bool> {
        self.with_ref(|slot| slot.sampler.pullup())
    }

    pub fn mark_excess(&self) -> SamplerResult<Microseconds> {
        self.with_ref(|slot| slot.sampler.mark_excess())
    }

    /// Run `f` on a view of the current capture
    ///
    /// `f` runs with interrupts suppressed. Read-only queries on the handle
    /// work from inside `f`; anything that modifies the instance returns
    /// [`SamplerError::Busy`]. Keep it short or use [`snapshot`](Self::snapshot).
    pub fn with_capture<F, R>(&self, f: F) -> SamplerResult<R>
    where
        F: FnOnce(CaptureView<'_>) -> R,
    {
        self.with_ref(|slot| f(slot.sampler.capture()))
    }

    /// Copy up to `N` durations out of the instance
    pub fn snapshot<const N: usize>(&self) -> SamplerResult<Capture<N>> {
        self.with_capture(|view| Capture::from_view(&view))
    }

    /// Destroy the instance this handle refers to
    pub fn destroy(self) -> SamplerResult<()> {
        destroy_instance()
    }
}
