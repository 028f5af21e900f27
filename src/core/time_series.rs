use serde::{Deserialize, Serialize};

use crate::core::types::Entry;

/// Ordered usage samples plus the known history extent.
///
/// Entries must be appended in ascending timestamp order; the store never
/// re-sorts, and every range query relies on that order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    entries: Vec<Entry>,
    history_start: Option<i64>,
    history_end: Option<i64>,
}

impl TimeSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Iterates entries with `start <= timestamp <= end`, stopping at the first
    /// entry past `end`.
    pub fn iter_between(&self, start: i64, end: i64) -> impl Iterator<Item = &Entry> + '_ {
        self.entries
            .iter()
            .take_while(move |entry| entry.timestamp() <= end)
            .filter(move |entry| entry.timestamp() >= start)
    }

    #[must_use]
    pub fn entries_between(&self, start: i64, end: i64) -> Vec<Entry> {
        self.iter_between(start, end).copied().collect()
    }

    /// Total bytes of the entries inside the inclusive window.
    #[must_use]
    pub fn sum_between(&self, start: i64, end: i64) -> i64 {
        saturate(self.iter_between(start, end).map(|e| i128::from(e.value())).sum())
    }

    /// Maximum value inside the inclusive window, `0` when it holds no entries.
    #[must_use]
    pub fn max_between(&self, start: i64, end: i64) -> i64 {
        self.iter_between(start, end)
            .map(|entry| entry.value())
            .max()
            .unwrap_or(0)
    }

    /// First index with `timestamp >= time`, clamped into `[0, size - 1]`.
    ///
    /// `None` only for an empty series. When several entries share `time`
    /// this is the first of them, so it can lie before [`Self::index_at_or_before`].
    #[must_use]
    pub fn index_at_or_after(&self, time: i64) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        let index = self.entries.partition_point(|entry| entry.timestamp() < time);
        Some(index.min(last))
    }

    /// Last index with `timestamp <= time`, clamped into `[0, size - 1]`.
    ///
    /// `None` only for an empty series. Duplicate timestamps resolve to the
    /// last of the run.
    #[must_use]
    pub fn index_at_or_before(&self, time: i64) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        let past = self.entries.partition_point(|entry| entry.timestamp() <= time);
        Some(past.saturating_sub(1).min(last))
    }

    /// Maximum value across all entries, `0` for an empty series.
    #[must_use]
    pub fn vertical_max(&self) -> i64 {
        self.entries.iter().map(|e| e.value()).max().unwrap_or(0)
    }

    /// Mean value across all entries, `1` for an empty series.
    #[must_use]
    pub fn mean_value(&self) -> i64 {
        if self.entries.is_empty() {
            return 1;
        }
        let sum: i128 = self.entries.iter().map(|e| i128::from(e.value())).sum();
        saturate(sum / self.entries.len() as i128)
    }

    pub fn set_history_range(&mut self, start: i64, end: i64) {
        self.history_start = Some(start);
        self.history_end = Some(end);
    }

    pub fn set_history_start(&mut self, start: i64) {
        self.history_start = Some(start);
    }

    pub fn set_history_end(&mut self, end: i64) {
        self.history_end = Some(end);
    }

    /// `None` until history has been recorded.
    #[must_use]
    pub fn history_start(&self) -> Option<i64> {
        self.history_start
    }

    #[must_use]
    pub fn history_end(&self) -> Option<i64> {
        self.history_end
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
