//! Whole-pipeline facade

use crate::commit_log::CommitSink;
use crate::error::SimulationResult;
use crate::executor::MiniBatchExecutor;
use crate::ingest::{ingest, RawTrace};
use slotsim_metrics::{MetricsReporter, SimulationSummary};
use slotsim_scheduler::ScheduleTable;
use slotsim_types::{FrequencyIndex, SimConfig};
use tracing::info;

/// A configured simulation, ingested and ready to run
pub struct Simulation<S: CommitSink> {
    executor: MiniBatchExecutor<S>,
}

impl<S: CommitSink> Simulation<S> {
    /// Validate the configuration, build the schedule table and ingest the traces
    pub fn new(
        config: &SimConfig,
        frequencies: &FrequencyIndex,
        traces: &[RawTrace],
        sink: S,
        reporter: MetricsReporter,
    ) -> SimulationResult<Self> {
        config.validate()?;

        let table = ScheduleTable::build(config.n_nodes, config.n_schedules, config.sched_len);
        info!(
            n_nodes = config.n_nodes,
            n_schedules = config.n_schedules,
            sched_len = config.sched_len,
            assignment = ?config.assignment,
            "Schedule table built"
        );

        let outcome = ingest(config, &table, frequencies, traces)?;
        let executor = MiniBatchExecutor::new(config, outcome, sink, reporter)?;
        Ok(Self { executor })
    }

    /// Run to completion
    pub fn run(&mut self) -> SimulationResult<SimulationSummary> {
        self.executor.run()
    }

    /// The executor
    pub fn executor(&self) -> &MiniBatchExecutor<S> {
        &self.executor
    }

    /// The executor, mutably (for stepping by hand)
    pub fn executor_mut(&mut self) -> &mut MiniBatchExecutor<S> {
        &mut self.executor
    }

    /// Consume the simulation, returning its executor
    pub fn into_executor(self) -> MiniBatchExecutor<S> {
        self.executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit_log::NullCommitLog;
    use crate::error::SimulationError;
    use slotsim_types::{ConfigError, Key};

    #[test]
    fn test_invalid_config_rejected_before_ingest() {
        let config = SimConfig {
            n_nodes: 1,
            ..Default::default()
        };
        let freqs = FrequencyIndex::from_records([(Key(1), 1)]).unwrap();
        let result = Simulation::new(&config, &freqs, &[], NullCommitLog, MetricsReporter::new());
        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::NodeCount(1)))
        ));
    }

    #[test]
    fn test_runs_to_completion() {
        let config = SimConfig {
            n_keys: 10,
            n_ops: 1,
            n_schedules: 2,
            sched_len: 2,
            mini_batch_period: 1,
            ..Default::default()
        };
        let freqs = FrequencyIndex::from_records((0..10).map(|k| (Key(k), 1))).unwrap();
        let traces = vec![vec![vec![Key(1)], vec![Key(2)]], vec![vec![Key(8)]]];

        let mut sim = Simulation::new(&config, &freqs, &traces, NullCommitLog, MetricsReporter::new())
            .unwrap();
        let summary = sim.run().unwrap();

        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.commits, 3);
        assert!(summary.is_conserved());
        assert!(sim.executor().queues().is_empty());
    }
}
