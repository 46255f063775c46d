//! Run summary export

use crate::Counters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final figures of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Simulated time steps
    pub timesteps: u64,
    /// Mini-batches started
    pub minibatches: u64,
    /// Raw transactions read from the traces
    pub total_transactions: u64,
    /// Transactions dropped because every key was accelerated
    pub all_accelerated: u64,
    /// Committed transactions
    pub commits: u64,
    /// Failed execution attempts
    pub aborts: u64,
    /// Transactions discarded after exceeding the retry bound
    pub discards: u64,
    /// Transactions still queued when the run stopped
    pub pending: u64,
    /// Whether the step ceiling stopped the run
    pub halted_early: bool,
    /// Commits per abort count
    pub abort_histogram: BTreeMap<u32, u64>,
    /// Mean abort count of committed transactions
    pub mean_abort_count: f64,
}

impl SimulationSummary {
    /// Copy the counter fields from `counters`, leaving the rest zeroed
    pub fn from_counters(counters: &Counters) -> Self {
        Self {
            timesteps: 0,
            minibatches: 0,
            total_transactions: 0,
            all_accelerated: 0,
            commits: counters.commits(),
            aborts: counters.aborts(),
            discards: counters.discards(),
            pending: 0,
            halted_early: false,
            abort_histogram: counters.histogram().buckets(),
            mean_abort_count: counters.histogram().mean(),
        }
    }

    /// Whether every input transaction reached exactly one terminal state
    pub fn is_conserved(&self) -> bool {
        self.all_accelerated + self.discards + self.commits + self.pending
            == self.total_transactions
    }

    /// Export summary as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export summary as compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
