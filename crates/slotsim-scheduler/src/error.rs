//! Error types for the scheduler

use slotsim_types::{Key, NodeId, Slot, TypesError};
use thiserror::Error;

/// Scheduler errors
///
/// Input errors come from malformed workload data; the rest are invariant
/// violations that point at a configuration or logic bug. Both are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Key has no entry in the frequency index
    #[error("key {0} has no frequency entry")]
    UnknownKey(Key),

    /// Invalid input value
    #[error(transparent)]
    Input(#[from] TypesError),

    /// Schedule lookup for a home node outside the table
    #[error("home node {node} out of range (n_nodes = {n_nodes})")]
    HomeNodeOutOfRange {
        /// Requested home node
        node: NodeId,
        /// Nodes in the table
        n_nodes: usize,
    },

    /// Schedule lookup for a variant outside the table
    #[error("schedule variant {variant} out of range (n_schedules = {n_schedules})")]
    VariantOutOfRange {
        /// Requested variant
        variant: usize,
        /// Variants in the table
        n_schedules: usize,
    },

    /// Node index outside the queue set
    #[error("node {node} out of range (n_nodes = {n_nodes})")]
    NodeOutOfRange {
        /// Requested node
        node: NodeId,
        /// Configured node count
        n_nodes: usize,
    },

    /// Slot index outside the cycle
    #[error("slot {slot} out of range (sched_len = {sched_len})")]
    SlotOutOfRange {
        /// Requested slot
        slot: Slot,
        /// Configured cycle length
        sched_len: usize,
    },

    /// Relaxed single-key constraint left no slot for the node
    #[error("no candidate slot for key {key} on node {node}")]
    NoCandidateSlot {
        /// Node the transaction belongs to
        node: NodeId,
        /// Highest-frequency key of the transaction
        key: Key,
    },
}

impl SchedulerError {
    /// Whether the error was caused by malformed input rather than a logic bug
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnknownKey(_) | Self::Input(_))
    }
}

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
