//! Best-effort completion estimate for a running exploration.
//!
//! The estimate compares the collector's size against a closed-form count of
//! branching slots derived from the grid geometry. That count is an upper
//! bound on opportunities, not on the number of maximal paths, so the
//! percentage is a liveness signal only. It can stall below 100 or reach it
//! early.

use serde::{
    Deserialize,
    Serialize,
};
use tracing::trace;

/// Number of branching slots a `rows x cols` grid offers.
///
/// Corners offer 2 moves, edge cells 3 and interior cells 4.
/// Returns `None` for grids narrower than 2 in either dimension, where the
/// formula does not apply.
pub fn theoretical_max_opportunities(rows: usize, cols: usize) -> Option<u64> {
    if rows < 2 || cols < 2 {
        return None;
    }
    let rows = rows as u64;
    let cols = cols as u64;
    Some(8 + 6 * (rows - 2) + 6 * (cols - 2) + 4 * (rows - 2) * (cols - 2))
}

/// `min(100, floor(100 * count / max))`.
pub fn completion_percent(count: usize, max: u64) -> u8 {
    if max == 0 {
        return 100;
    }
    let pct = (count as u128 * 100) / max as u128;
    pct.min(100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub evaluated: usize,
    pub theoretical_max: Option<u64>,
    /// `None` when the grid has no theoretical maximum.
    pub percent: Option<u8>,
}

/// Receives progress events from the background sampler.
///
/// Implementations must return quickly, they run on the sampling thread.
pub trait ProgressObserver: Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Turns raw collector counts into monotonically non-decreasing events.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    theoretical_max: Option<u64>,
    last_percent: Option<u8>,
    last_count: usize,
}

impl ProgressTracker {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            theoretical_max: theoretical_max_opportunities(rows, cols),
            last_percent: None,
            last_count: 0,
        }
    }

    pub fn theoretical_max(&self) -> Option<u64> {
        self.theoretical_max
    }

    /// Feeds one sample of the collector size.
    ///
    /// Returns an event only when the reported value moves forward. Samples
    /// that would move it backwards are ignored.
    pub fn observe(&mut self, count: usize) -> Option<ProgressEvent> {
        trace!("Progress sample: {} paths", count);
        match self.theoretical_max {
            Some(max) => {
                let pct = completion_percent(count, max);
                if self.last_percent.is_some_and(|last| pct <= last) {
                    return None;
                }
                self.last_percent = Some(pct);
                self.last_count = count;
                Some(ProgressEvent {
                    evaluated: count,
                    theoretical_max: Some(max),
                    percent: Some(pct),
                })
            }
            None => {
                if count <= self.last_count {
                    return None;
                }
                self.last_count = count;
                Some(ProgressEvent {
                    evaluated: count,
                    theoretical_max: None,
                    percent: None,
                })
            }
        }
    }
}
