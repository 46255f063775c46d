//! Histogram of abort counts at commit time

use std::collections::BTreeMap;

/// Highest bucket created up front; larger abort counts grow the histogram on demand
pub const PREPOPULATED_MAX: u32 = 64;

/// Exact-bucket histogram: bucket `i` counts commits that had aborted `i` times
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbortHistogram {
    counts: Vec<u64>,
}

impl AbortHistogram {
    /// Create a histogram with zeroed buckets `0..=max_abort`, capped at
    /// [`PREPOPULATED_MAX`]
    pub fn new(max_abort: u32) -> Self {
        Self {
            counts: vec![0; max_abort.min(PREPOPULATED_MAX) as usize + 1],
        }
    }

    /// Record one commit with the given abort count
    pub fn observe(&mut self, abort_count: u32) {
        let idx = abort_count as usize;
        if idx >= self.counts.len() {
            self.counts.resize(idx + 1, 0);
        }
        self.counts[idx] += 1;
    }

    /// Count in one bucket
    pub fn count(&self, abort_count: u32) -> u64 {
        self.counts.get(abort_count as usize).copied().unwrap_or(0)
    }

    /// Get total count
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Mean abort count over all recorded commits
    pub fn mean(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, c)| i as u64 * c)
            .sum();
        weighted as f64 / total as f64
    }

    /// Buckets as an ordered map
    pub fn buckets(&self) -> BTreeMap<u32, u64> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, c)| (i as u32, *c))
            .collect()
    }
}

impl Default for AbortHistogram {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepopulated_buckets() {
        let hist = AbortHistogram::new(2);
        assert_eq!(hist.buckets().len(), 3);
        assert_eq!(hist.total_count(), 0);
        assert_eq!(hist.mean(), 0.0);
    }

    #[test]
    fn test_observe() {
        let mut hist = AbortHistogram::new(1);
        hist.observe(0);
        hist.observe(0);
        hist.observe(1);
        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(1), 1);
        assert_eq!(hist.count(5), 0);
        assert_eq!(hist.total_count(), 3);
        assert!((hist.mean() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_bound_prepopulates_only_up_to_cap() {
        let mut hist = AbortHistogram::new(u32::MAX);
        assert_eq!(hist.buckets().len(), PREPOPULATED_MAX as usize + 1);

        hist.observe(PREPOPULATED_MAX + 2);
        assert_eq!(hist.count(PREPOPULATED_MAX + 2), 1);
        assert_eq!(hist.count(PREPOPULATED_MAX + 1), 0);
        assert_eq!(hist.buckets().len(), PREPOPULATED_MAX as usize + 3);
    }

    #[test]
    fn test_observe_grows() {
        let mut hist = AbortHistogram::default();
        hist.observe(3);
        assert_eq!(hist.count(3), 1);
        assert_eq!(hist.buckets().len(), 4);
    }
}
