use std::time::Duration;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::SweepId;

/// Pending delayed axis re-checks, at most one per sweep.
///
/// Time is a host-supplied monotonic `Duration` so the schedule stays
/// deterministic and single-threaded; nothing here sleeps or spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescaleSchedule {
    cadence: Duration,
    pending: IndexMap<SweepId, Duration>,
}

impl RescaleSchedule {
    #[must_use]
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            pending: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Schedules a re-check one cadence after `now` unless one is already pending.
    ///
    /// Returns `true` when a new re-check was scheduled.
    pub fn request(&mut self, sweep: SweepId, now: Duration) -> bool {
        if self.pending.contains_key(&sweep) {
            return false;
        }
        self.pending
            .insert(sweep, now.saturating_add(self.cadence));
        true
    }

    /// Replaces any pending re-check for `sweep` with one a cadence after `now`.
    pub fn reschedule(&mut self, sweep: SweepId, now: Duration) {
        self.pending
            .insert(sweep, now.saturating_add(self.cadence));
    }

    pub fn cancel(&mut self, sweep: SweepId) -> bool {
        self.pending.shift_remove(&sweep).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    #[must_use]
    pub fn is_pending(&self, sweep: SweepId) -> bool {
        self.pending.contains_key(&sweep)
    }

    #[must_use]
    pub fn deadline(&self, sweep: SweepId) -> Option<Duration> {
        self.pending.get(&sweep).copied()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every re-check due at `now`, in scheduling order.
    pub fn take_due(&mut self, now: Duration) -> SmallVec<[SweepId; 4]> {
        let mut due = SmallVec::new();
        self.pending.retain(|sweep, deadline| {
            if *deadline <= now {
                due.push(*sweep);
                false
            } else {
                true
            }
        });
        due
    }
}
