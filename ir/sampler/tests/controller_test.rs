//! Sampler lifecycle tests for ir-sampler
//!
//! The sampler is a process-wide singleton, so every test holds `LOCK` and
//! destroys whatever it created.

use std::sync::{Mutex, MutexGuard};

use ir_hal::{HalError, HalResult, TickTimer};
use ir_sampler::{
    create_instance, destroy_instance, instance_exists, isr, IrReading, SamplerConfig,
    SamplerError, SamplerState, TimerClock,
};
use IrReading::{Mark, Space};

static LOCK: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    destroy_instance().unwrap();
    guard
}

#[derive(Debug, Default)]
struct FakeTimer {
    counts: Option<u32>,
    running: bool,
    fail: bool,
}

impl TickTimer for FakeTimer {
    fn configure(&mut self, counts_per_tick: u32) -> HalResult<()> {
        if self.fail {
            return Err(HalError::ConfigurationError);
        }
        self.counts = Some(counts_per_tick);
        Ok(())
    }

    fn enable_interrupt(&mut self) -> HalResult<()> {
        self.running = true;
        Ok(())
    }

    fn disable_interrupt(&mut self) -> HalResult<()> {
        self.running = false;
        Ok(())
    }
}

fn config() -> SamplerConfig {
    SamplerConfig::new(2).with_capacity(10)
}

#[test]
fn test_second_instance_is_rejected() {
    let _guard = serial();

    let first = create_instance(config().with_ending_timeout(12)).unwrap();
    let second = create_instance(config().with_ending_timeout(99));
    assert!(matches!(second, Err(SamplerError::InstanceExists)));

    // The live instance is untouched
    assert_eq!(first.ending_timeout(), Ok(12));
    first.destroy().unwrap();
    assert!(!instance_exists());
}

#[test]
fn test_destroy_without_instance_is_noop() {
    let _guard = serial();

    destroy_instance().unwrap();
    destroy_instance().unwrap();
    assert!(!instance_exists());

    let handle = create_instance(config()).unwrap();
    handle.destroy().unwrap();
    assert!(create_instance(config()).is_ok());
    destroy_instance().unwrap();
}

#[test]
fn test_handle_after_destroy_reports_no_instance() {
    let _guard = serial();

    let handle = create_instance(config()).unwrap();
    destroy_instance().unwrap();

    assert_eq!(handle.state(), Err(SamplerError::NoInstance));
    assert_eq!(handle.reset(), Err(SamplerError::NoInstance));
    let mut timer = FakeTimer::default();
    assert_eq!(handle.enable(&mut timer), Err(SamplerError::NoInstance));
    assert!(!timer.running);
}

#[test]
fn test_enable_configures_timer() {
    let _guard = serial();

    let handle = create_instance(config()).unwrap();
    let mut timer = FakeTimer::default();

    handle.enable(&mut timer).unwrap();
    assert_eq!(timer.counts, Some(100));
    assert!(timer.running);
    assert_eq!(handle.is_enabled(), Ok(true));

    handle.disable(&mut timer).unwrap();
    assert!(!timer.running);
    assert_eq!(handle.is_enabled(), Ok(false));

    handle.destroy().unwrap();
}

#[test]
fn test_enable_failure_leaves_sampler_disabled() {
    let _guard = serial();

    let handle = create_instance(config()).unwrap();
    let mut timer = FakeTimer {
        fail: true,
        ..FakeTimer::default()
    };

    assert_eq!(
        handle.enable(&mut timer),
        Err(SamplerError::Hal(HalError::ConfigurationError))
    );
    assert!(!timer.running);
    assert_eq!(handle.is_enabled(), Ok(false));
    assert_eq!(isr::on_tick(Mark), None);

    handle.destroy().unwrap();
}

#[test]
fn test_ticks_ignored_until_enabled() {
    let _guard = serial();

    assert_eq!(isr::on_tick(Mark), None);

    let handle = create_instance(config()).unwrap();
    assert_eq!(isr::on_tick(Mark), None);
    assert_eq!(handle.state(), Ok(SamplerState::Idle));

    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    assert_eq!(isr::on_tick(Mark), Some(SamplerState::Mark));

    handle.disable(&mut timer).unwrap();
    assert_eq!(isr::on_tick(Space), None);
    assert_eq!(handle.state(), Ok(SamplerState::Mark));

    handle.destroy().unwrap();
}

#[test]
fn test_capture_through_interrupt_entry() {
    let _guard = serial();

    let handle = create_instance(config().with_ending_timeout(1).with_mark_excess(0)).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();

    let mut readings = [Mark, Mark, Mark, Space, Space, Mark]
        .into_iter()
        .chain(std::iter::repeat(Space));
    let mut receiver = move || readings.next().unwrap_or(Space);

    while handle.is_ready() != Ok(true) {
        isr::sample_tick(&mut receiver);
    }

    assert_eq!(handle.len(), Ok(4));
    handle
        .with_capture(|view| {
            assert!(view.is_ready());
            assert_eq!(view.as_ticks(), &[3, 2, 1, 21]);
        })
        .unwrap();

    let capture = handle.snapshot::<8>().unwrap();
    assert!(!capture.is_truncated());
    assert_eq!(capture.view().to_string(), "+150 -100 +50 -1050");

    let short = handle.snapshot::<2>().unwrap();
    assert!(short.is_truncated());
    assert_eq!(short.recorded(), 4);

    handle.destroy().unwrap();
}

#[test]
fn test_reset_and_reenable_start_new_capture() {
    let _guard = serial();

    let handle = create_instance(config().with_capacity(2)).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();

    for reading in [Mark, Space, Mark, Space] {
        isr::on_tick(reading);
    }
    assert_eq!(handle.state(), Ok(SamplerState::Stop));
    assert_eq!(handle.len(), Ok(2));
    assert_eq!(handle.capacity(), Ok(2));

    handle.reset().unwrap();
    assert_eq!(handle.state(), Ok(SamplerState::Idle));
    assert_eq!(handle.len(), Ok(0));

    isr::on_tick(Mark);
    isr::on_tick(Space);
    assert_eq!(handle.len(), Ok(1));

    handle.enable(&mut timer).unwrap();
    assert_eq!(handle.state(), Ok(SamplerState::Idle));
    assert_eq!(handle.len(), Ok(0));

    handle.destroy().unwrap();
}

#[test]
fn test_timeouts_in_millis() {
    let _guard = serial();

    let handle = create_instance(
        config()
            .with_beginning_timeout(2000)
            .with_ending_timeout(35),
    )
    .unwrap();
    assert_eq!(handle.beginning_timeout(), Ok(2000));
    assert_eq!(handle.ending_timeout(), Ok(35));

    handle.set_beginning_timeout(0).unwrap();
    handle.set_ending_timeout(100).unwrap();
    assert_eq!(handle.beginning_timeout(), Ok(0));
    assert_eq!(handle.ending_timeout(), Ok(100));

    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    assert_eq!(isr::on_tick(Space), Some(SamplerState::Stop));
    assert_eq!(handle.len(), Ok(0));

    handle.destroy().unwrap();
}

#[test]
fn test_construction_parameters_are_kept() {
    let _guard = serial();

    let handle = create_instance(
        SamplerConfig::new(9)
            .with_pullup(true)
            .with_mark_excess(80),
    )
    .unwrap();
    assert_eq!(handle.pin(), Ok(9));
    assert_eq!(handle.pullup(), Ok(true));
    assert_eq!(handle.mark_excess(), Ok(80));

    handle.destroy().unwrap();
}

#[test]
fn test_enable_programs_fractional_mhz_clock() {
    let _guard = serial();

    let handle = create_instance(config().with_clock(TimerClock::new(20_000_000, 8))).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    assert_eq!(timer.counts, Some(125));

    handle.destroy().unwrap();
}

#[test]
fn test_enable_rejects_unusable_clock() {
    let _guard = serial();

    for clock in [TimerClock::new(16_000_000, 0), TimerClock::new(100_000, 8)] {
        let handle = create_instance(config().with_clock(clock)).unwrap();
        let mut timer = FakeTimer::default();

        assert_eq!(
            handle.enable(&mut timer),
            Err(SamplerError::Hal(HalError::ConfigurationError))
        );
        assert_eq!(timer.counts, None);
        assert!(!timer.running);
        assert_eq!(handle.is_enabled(), Ok(false));
        assert_eq!(isr::on_tick(Mark), None);

        handle.destroy().unwrap();
    }
}

#[test]
fn test_queries_inside_capture_callback() {
    let _guard = serial();

    let handle = create_instance(config()).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    for reading in [Mark, Mark, Space] {
        isr::on_tick(reading);
    }

    let (len, state, capacity) = handle
        .with_capture(|view| {
            assert_eq!(view.as_ticks(), &[2]);
            (handle.len(), handle.state(), handle.capacity())
        })
        .unwrap();
    assert_eq!(len, Ok(1));
    assert_eq!(state, Ok(SamplerState::Space));
    assert_eq!(capacity, Ok(10));

    let nested = handle
        .with_capture(|outer| handle.with_capture(|inner| inner.len() == outer.len()))
        .unwrap();
    assert_eq!(nested, Ok(true));

    handle.destroy().unwrap();
}

#[test]
fn test_changes_inside_capture_callback_are_refused() {
    let _guard = serial();

    let handle = create_instance(config()).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    isr::on_tick(Mark);
    isr::on_tick(Space);

    let results = handle
        .with_capture(|_| {
            (
                handle.reset(),
                handle.set_ending_timeout(5),
                isr::on_tick(Mark),
                destroy_instance(),
                create_instance(config()).map(|_| ()),
            )
        })
        .unwrap();
    assert_eq!(results.0, Err(SamplerError::Busy));
    assert_eq!(results.1, Err(SamplerError::Busy));
    assert_eq!(results.2, None);
    assert_eq!(results.3, Err(SamplerError::Busy));
    assert_eq!(results.4, Err(SamplerError::InstanceExists));

    assert!(instance_exists());
    assert_eq!(handle.len(), Ok(1));
    assert_eq!(handle.ending_timeout(), Ok(35));

    handle.destroy().unwrap();
}

#[test]
fn test_idle_ticks_mark_beginning_timeout() {
    let _guard = serial();

    let handle = create_instance(config().with_beginning_timeout(0)).unwrap();
    let mut timer = FakeTimer::default();
    handle.enable(&mut timer).unwrap();
    assert_eq!(handle.idle_ticks(), Ok(None));

    assert_eq!(isr::on_tick(Space), Some(SamplerState::Stop));
    assert_eq!(handle.len(), Ok(0));
    assert!(handle.idle_ticks().unwrap().is_some());

    handle.reset().unwrap();
    assert_eq!(handle.idle_ticks(), Ok(None));

    handle.destroy().unwrap();
}
