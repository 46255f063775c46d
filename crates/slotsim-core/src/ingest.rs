//! Ingestion: raw per-node traces to filled slot queues
//!
//! Filtering is independent per node and runs on the rayon pool. All
//! filter results are collected before the first assignment, and
//! assignment then walks nodes and traces in order so queue-depth
//! tie-breaks never depend on thread timing.

use crate::error::{SimulationError, SimulationResult};
use rayon::prelude::*;
use slotsim_scheduler::{
    FilterOutcome, ScheduleTable, SchedulerResult, SlotQueues, TransactionAssigner,
    TransactionFilter,
};
use slotsim_types::{FrequencyIndex, Key, NodeId, SimConfig, TxId};
use tracing::{debug, info};

/// One node's raw transactions, each a tuple of `n_ops` keys
pub type RawTrace = Vec<Vec<Key>>;

/// Queues ready for execution plus the ingestion tallies
#[derive(Debug)]
pub struct IngestOutcome {
    /// Filled slot queues
    pub queues: SlotQueues,
    /// Transactions whose keys were all accelerated
    pub all_accelerated: u64,
    /// Raw transactions read
    pub total_transactions: u64,
}

impl IngestOutcome {
    /// Wrap queues filled by other means; every queued transaction counts as input
    pub fn from_queues(queues: SlotQueues) -> Self {
        let total_transactions = queues.total_pending() as u64;
        Self {
            queues,
            all_accelerated: 0,
            total_transactions,
        }
    }
}

/// Filter and assign every transaction of every node
pub fn ingest(
    config: &SimConfig,
    table: &ScheduleTable,
    frequencies: &FrequencyIndex,
    traces: &[RawTrace],
) -> SimulationResult<IngestOutcome> {
    if traces.len() != config.n_nodes {
        return Err(SimulationError::TraceCount {
            expected: config.n_nodes,
            got: traces.len(),
        });
    }
    check_arity(config.n_ops, traces)?;

    let key_space = config.key_space();
    let filter = TransactionFilter::new(frequencies, config.accel_threshold, key_space);

    // Per-node results are gathered in node order so the reported error
    // is always the lowest node's
    let filtered: Vec<SchedulerResult<Vec<FilterOutcome>>> = traces
        .par_iter()
        .map(|trace| trace.iter().map(|raw| filter.filter(raw)).collect())
        .collect();
    let filtered = filtered
        .into_iter()
        .collect::<SchedulerResult<Vec<_>>>()?;

    let mut queues = SlotQueues::new(config.n_nodes, config.sched_len);
    let mut assigner = TransactionAssigner::new(table, key_space, config.assignment);
    let mut all_accelerated = 0u64;
    let mut total_transactions = 0u64;

    for (node, outcomes) in filtered.into_iter().enumerate() {
        let node = NodeId(node);
        let mut node_accelerated = 0u64;
        for (seq, outcome) in outcomes.into_iter().enumerate() {
            total_transactions += 1;
            match outcome {
                FilterOutcome::Scheduled(tx) => {
                    let tx = tx.into_transaction(TxId::new(node, seq as u64))?;
                    assigner.assign(tx, node, &mut queues)?;
                }
                FilterOutcome::AllAccelerated => node_accelerated += 1,
            }
        }
        debug!(
            %node,
            queued = queues.node(node)?.pending(),
            all_accelerated = node_accelerated,
            depths = ?queues.node(node)?.depths(),
            "node ingested"
        );
        all_accelerated += node_accelerated;
    }

    info!(
        total_transactions,
        all_accelerated,
        queued = queues.total_pending(),
        "Removed {} all-accelerated txns",
        all_accelerated
    );

    Ok(IngestOutcome {
        queues,
        all_accelerated,
        total_transactions,
    })
}

fn check_arity(n_ops: usize, traces: &[RawTrace]) -> SimulationResult<()> {
    for (node, trace) in traces.iter().enumerate() {
        if let Some((seq, raw)) = trace.iter().enumerate().find(|(_, raw)| raw.len() != n_ops) {
            return Err(SimulationError::Arity {
                node: NodeId(node),
                seq: seq as u64,
                len: raw.len(),
                n_ops,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotsim_scheduler::SchedulerError;
    use slotsim_types::AssignmentPolicy;

    fn config() -> SimConfig {
        SimConfig {
            n_nodes: 2,
            n_keys: 100,
            n_ops: 2,
            accel_threshold: 50,
            n_schedules: 4,
            sched_len: 4,
            mini_batch_period: 1,
            max_allow_abort_ct: 1,
            ..Default::default()
        }
    }

    fn freqs() -> FrequencyIndex {
        // keys 0..100: key 0 and 99 are hot
        FrequencyIndex::from_records((0..100).map(|k| {
            let count = if k == 0 || k == 99 { 1000 } else { k };
            (Key(k), count)
        }))
        .unwrap()
    }

    fn trace(rows: &[[u64; 2]]) -> RawTrace {
        rows.iter()
            .map(|row| row.iter().copied().map(Key).collect())
            .collect()
    }

    #[test]
    fn test_counts_all_accelerated() {
        let config = config();
        let table = ScheduleTable::build(2, 4, 4);
        let traces = vec![trace(&[[0, 99], [6, 7]]), trace(&[[99, 0]])];

        let out = ingest(&config, &table, &freqs(), &traces).unwrap();

        assert_eq!(out.total_transactions, 3);
        assert_eq!(out.all_accelerated, 2);
        assert_eq!(out.queues.total_pending(), 1);
        assert!(out.queues.node(NodeId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_assigns_by_schedule() {
        let config = config();
        let table = ScheduleTable::build(2, 4, 4);
        // [7, 6] ranks 7 first (freq 7 > 6); key 7: home 0, variant 3, node 0 owns slot 3
        let traces = vec![trace(&[[6, 7]]), Vec::new()];

        let out = ingest(&config, &table, &freqs(), &traces).unwrap();

        assert_eq!(out.queues.depth(NodeId(0), 3), 1);
        let tx = out.queues.node(NodeId(0)).unwrap().iter_slot(3).next().unwrap();
        assert_eq!(tx.keys(), &[Key(7), Key(6)]);
        assert_eq!(tx.id, TxId::new(NodeId(0), 0));
    }

    #[test]
    fn test_sequence_numbers_count_dropped() {
        let config = config();
        let table = ScheduleTable::build(2, 4, 4);
        let traces = vec![trace(&[[0, 99], [6, 7]]), Vec::new()];

        let out = ingest(&config, &table, &freqs(), &traces).unwrap();
        let tx = out.queues.node(NodeId(0)).unwrap().iter_slot(3).next().unwrap();
        assert_eq!(tx.id.seq, 1);
    }

    #[test]
    fn test_random_policy_is_reproducible() {
        let config = SimConfig {
            assignment: AssignmentPolicy::Random { seed: 3 },
            ..config()
        };
        let table = ScheduleTable::build(2, 4, 4);
        let rows: Vec<[u64; 2]> = (1..40).map(|k| [k, k + 50]).collect();
        let traces = vec![trace(&rows), trace(&rows)];

        let a = ingest(&config, &table, &freqs(), &traces).unwrap();
        let b = ingest(&config, &table, &freqs(), &traces).unwrap();
        assert_eq!(a.queues.depth_matrix(), b.queues.depth_matrix());
        assert_eq!(a.queues.total_pending(), 78);
    }

    // ==================== Input Errors ====================

    #[test]
    fn test_trace_count_mismatch() {
        let table = ScheduleTable::build(2, 4, 4);
        let err = ingest(&config(), &table, &freqs(), &[Vec::new()]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::TraceCount {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_wrong_arity() {
        let table = ScheduleTable::build(2, 4, 4);
        let traces = vec![vec![vec![Key(1), Key(2)], vec![Key(3)]], Vec::new()];
        let err = ingest(&config(), &table, &freqs(), &traces).unwrap_err();
        assert!(matches!(err, SimulationError::Arity { seq: 1, len: 1, .. }));
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        let table = ScheduleTable::build(2, 4, 4);
        let freqs = FrequencyIndex::from_records([(Key(1), 1)]).unwrap();
        let traces = vec![trace(&[[1, 2]]), Vec::new()];
        let err = ingest(&config(), &table, &freqs, &traces).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Scheduler(SchedulerError::UnknownKey(Key(2)))
        ));
    }

    #[test]
    fn test_first_failing_node_is_reported() {
        let table = ScheduleTable::build(2, 4, 4);
        let freqs = FrequencyIndex::from_records([(Key(1), 1)]).unwrap();
        let traces = vec![trace(&[[1, 2]]), trace(&[[1, 3]])];

        for _ in 0..16 {
            let err = ingest(&config(), &table, &freqs, &traces).unwrap_err();
            assert!(matches!(
                err,
                SimulationError::Scheduler(SchedulerError::UnknownKey(Key(2)))
            ));
        }
    }

    #[test]
    fn test_no_candidate_slot_is_fatal() {
        // table built with more variants than slots: key 5 (home 0,
        // variant 5) leaves node 0 no position
        let table = ScheduleTable::build(2, 6, 4);
        let traces = vec![trace(&[[5, 1]]), Vec::new()];

        let err = ingest(&config(), &table, &freqs(), &traces).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Scheduler(SchedulerError::NoCandidateSlot {
                node: NodeId(0),
                key: Key(5)
            })
        ));
    }
}
