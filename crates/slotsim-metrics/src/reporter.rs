//! Periodic and final run reporting

use crate::{Counters, SimulationSummary};
use tracing::info;

/// Queue depths and running discard count at one mini-batch boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodReport {
    /// Index of the mini-batch that just ended
    pub minibatch: u64,
    /// Queue length per node, each in slot order
    pub depths: Vec<Vec<usize>>,
    /// Discards so far
    pub discards: u64,
}

/// Observer of a simulation run.
///
/// Only reads simulation state; what it keeps is its own report history.
#[derive(Debug)]
pub struct MetricsReporter {
    /// Log every `log_every`-th boundary (0 disables periodic logging)
    log_every: u64,
    keep_history: bool,
    history: Vec<PeriodReport>,
    last: Option<PeriodReport>,
}

impl MetricsReporter {
    /// Reporter that logs every boundary and keeps only the latest report
    pub fn new() -> Self {
        Self {
            log_every: 1,
            keep_history: false,
            history: Vec::new(),
            last: None,
        }
    }

    /// Log only every `n`-th boundary
    pub fn with_log_every(mut self, n: u64) -> Self {
        self.log_every = n;
        self
    }

    /// Keep every period report in memory
    pub fn with_history(mut self) -> Self {
        self.keep_history = true;
        self
    }

    /// Called once per mini-batch boundary
    pub fn on_period_boundary(&mut self, minibatch: u64, depths: &[Vec<usize>], counters: &Counters) {
        let report = PeriodReport {
            minibatch,
            depths: depths.to_vec(),
            discards: counters.discards(),
        };

        if self.log_every > 0 && (minibatch + 1) % self.log_every == 0 {
            for (node, slots) in report.depths.iter().enumerate() {
                info!(
                    minibatch,
                    node,
                    discards = report.discards,
                    queue_depths = ?slots,
                    "mini-batch boundary"
                );
            }
        }

        if self.keep_history {
            self.history.push(report.clone());
        }
        self.last = Some(report);
    }

    /// Called once when the run ends
    pub fn on_finish(&mut self, summary: &SimulationSummary) {
        info!(timesteps = summary.timesteps, "Timesteps");
        info!(discards = summary.discards, "Discarded txns");
        info!(commits = summary.commits, "Committed txns");
        info!(aborts = summary.aborts, "Aborted attempts");
        info!(
            all_accelerated = summary.all_accelerated,
            pending = summary.pending,
            halted_early = summary.halted_early,
            "Run finished"
        );
        info!(
            histogram = ?summary.abort_histogram,
            mean = summary.mean_abort_count,
            "Txn abort counts"
        );
    }

    /// Latest period report
    pub fn last(&self) -> Option<&PeriodReport> {
        self.last.as_ref()
    }

    /// All kept period reports
    pub fn history(&self) -> &[PeriodReport] {
        &self.history
    }
}

impl Default for MetricsReporter {
    fn default() -> Self {
        Self::new()
    }
}
