//! Process-lifetime outcome counters

use crate::AbortHistogram;

/// Commit, abort and discard counters plus the abort-count histogram.
///
/// Owned by the executor; reset only by constructing a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counters {
    commits: u64,
    aborts: u64,
    discards: u64,
    histogram: AbortHistogram,
}

impl Counters {
    /// Create zeroed counters; the histogram is pre-populated for `0..=max_abort`
    /// up to [`PREPOPULATED_MAX`](crate::PREPOPULATED_MAX)
    pub fn new(max_abort: u32) -> Self {
        Self {
            commits: 0,
            aborts: 0,
            discards: 0,
            histogram: AbortHistogram::new(max_abort),
        }
    }

    /// Record a commit of a transaction that had aborted `abort_count` times
    pub fn record_commit(&mut self, abort_count: u32) {
        self.commits += 1;
        self.histogram.observe(abort_count);
    }

    /// Record a failed execution attempt
    pub fn record_abort(&mut self) {
        self.aborts += 1;
    }

    /// Record a permanently dropped transaction
    pub fn record_discard(&mut self) {
        self.discards += 1;
    }

    /// Committed transactions
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Failed attempts
    pub fn aborts(&self) -> u64 {
        self.aborts
    }

    /// Discarded transactions
    pub fn discards(&self) -> u64 {
        self.discards
    }

    /// Abort counts at commit
    pub fn histogram(&self) -> &AbortHistogram {
        &self.histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut counters = Counters::new(1);
        counters.record_commit(0);
        counters.record_abort();
        counters.record_commit(1);
        counters.record_abort();
        counters.record_abort();
        counters.record_discard();

        assert_eq!(counters.commits(), 2);
        assert_eq!(counters.aborts(), 3);
        assert_eq!(counters.discards(), 1);
        assert_eq!(counters.histogram().count(0), 1);
        assert_eq!(counters.histogram().count(1), 1);
        assert_eq!(counters.histogram().total_count(), counters.commits());
    }
}
