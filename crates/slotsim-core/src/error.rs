//! Simulation error types

use slotsim_scheduler::SchedulerError;
use slotsim_types::{ConfigError, NodeId};
use thiserror::Error;

/// Fatal simulation errors.
///
/// Transaction conflicts are never errors; they only show up in counters.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Scheduling failed (malformed input or invariant violation)
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// One trace per node is required
    #[error("expected {expected} traces (one per node), got {got}")]
    TraceCount {
        /// Configured node count
        expected: usize,
        /// Traces supplied
        got: usize,
    },

    /// Raw transaction with the wrong number of keys
    #[error("transaction {seq} of node {node} has {len} keys, expected {n_ops}")]
    Arity {
        /// Originating node
        node: NodeId,
        /// Position in the trace
        seq: u64,
        /// Keys found
        len: usize,
        /// Configured keys per transaction
        n_ops: usize,
    },

    /// Queues built for a different node count or slot cycle
    #[error("queues are {nodes}x{slots}, configuration expects {expected_nodes}x{expected_slots}")]
    QueueShape {
        /// Configured node count
        expected_nodes: usize,
        /// Configured cycle length
        expected_slots: usize,
        /// Nodes in the queues
        nodes: usize,
        /// Slots in the queues
        slots: usize,
    },

    /// Commit log could not be written
    #[error("commit log error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
