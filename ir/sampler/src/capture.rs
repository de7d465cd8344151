//! Capture queries for the decoding layer
//!
//! Durations alternate mark, space, mark, ... starting with a mark at index 0.
//! Receivers stretch marks and shorten spaces by roughly the same amount, so
//! the microsecond view removes `mark_excess` from marks and adds it to spaces.

use core::fmt;

use heapless::Vec;
use ir_core::{ticks_to_micros, Microseconds, SamplerState, Ticks};

/// Borrowed view of a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureView<'a> {
    durations: &'a [Ticks],
    state: SamplerState,
    mark_excess: Microseconds,
}

impl<'a> CaptureView<'a> {
    pub fn new(durations: &'a [Ticks], state: SamplerState, mark_excess: Microseconds) -> Self {
        Self {
            durations,
            state,
            mark_excess,
        }
    }

    /// Number of recorded durations
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Check if the capture is finished and safe to decode
    pub fn is_ready(&self) -> bool {
        self.state.is_stopped()
    }

    /// State the sampler was in when the view was taken
    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn mark_excess(&self) -> Microseconds {
        self.mark_excess
    }

    /// Raw durations in ticks
    pub fn as_ticks(&self) -> &'a [Ticks] {
        self.durations
    }

    /// Duration at `index` in ticks
    pub fn ticks(&self, index: usize) -> Option<Ticks> {
        self.durations.get(index).copied()
    }

    /// Check if the duration at `index` is a mark
    pub fn is_mark(&self, index: usize) -> bool {
        index % 2 == 0
    }

    /// Duration at `index` in microseconds, compensated for mark excess
    ///
    /// Saturates at [`Microseconds::MAX`].
    pub fn duration_micros(&self, index: usize) -> Option<Microseconds> {
        self.ticks(index)
            .map(|ticks| compensate(ticks, self.is_mark(index), self.mark_excess))
    }

    /// All durations in microseconds
    pub fn iter_micros(&self) -> impl Iterator<Item = Microseconds> + 'a {
        let mark_excess = self.mark_excess;
        self.durations
            .iter()
            .enumerate()
            .map(move |(index, &ticks)| compensate(ticks, index % 2 == 0, mark_excess))
    }
}

fn compensate(ticks: Ticks, mark: bool, mark_excess: Microseconds) -> Microseconds {
    let raw = ticks_to_micros(ticks);
    let excess = u64::from(mark_excess);
    let micros = if mark {
        raw.saturating_sub(excess)
    } else {
        raw + excess
    };
    micros.min(u64::from(Microseconds::MAX)) as Microseconds
}

/// `+mark -space +mark ...` in microseconds
impl fmt::Display for CaptureView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, micros) in self.iter_micros().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            let sign = if self.is_mark(index) { '+' } else { '-' };
            write!(f, "{}{}", sign, micros)?;
        }
        Ok(())
    }
}

/// Owned copy of a capture holding up to `N` durations
///
/// Durations past `N` are dropped; [`is_truncated`](Self::is_truncated)
/// reports whether that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture<const N: usize> {
    durations: Vec<Ticks, N>,
    recorded: usize,
    state: SamplerState,
    mark_excess: Microseconds,
}

impl<const N: usize> Capture<N> {
    /// Copy out of a borrowed view
    pub fn from_view(view: &CaptureView<'_>) -> Self {
        let ticks = view.as_ticks();
        let kept = &ticks[..ticks.len().min(N)];
        let durations = match Vec::from_slice(kept) {
            Ok(durations) => durations,
            Err(()) => Vec::new(),
        };
        Self {
            durations,
            recorded: view.len(),
            state: view.state(),
            mark_excess: view.mark_excess(),
        }
    }

    /// Borrowed view of the copied durations
    pub fn view(&self) -> CaptureView<'_> {
        CaptureView::new(&self.durations, self.state, self.mark_excess)
    }

    /// Number of durations the sampler had recorded
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Check if durations were dropped for lack of room
    pub fn is_truncated(&self) -> bool {
        self.recorded > self.durations.len()
    }
}
