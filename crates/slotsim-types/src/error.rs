//! Error types for core types

use crate::key::Key;
use crate::transaction::TxId;
use thiserror::Error;

/// Configuration rejected by [`SimConfig::validate`](crate::SimConfig::validate)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Node count outside the supported range
    #[error("n_nodes must be in 2..=64, got {0}")]
    NodeCount(usize),

    /// Key space cannot be split evenly across nodes
    #[error("n_keys ({n_keys}) must be a positive multiple of n_nodes ({n_nodes})")]
    KeySpace {
        /// Configured key count
        n_keys: u64,
        /// Configured node count
        n_nodes: usize,
    },

    /// Transactions must carry at least one key
    #[error("n_ops must be positive")]
    ZeroOps,

    /// At least one schedule variant is required
    #[error("n_schedules must be positive")]
    ZeroSchedules,

    /// A variant index would fall outside the slot cycle
    #[error("n_schedules ({n_schedules}) must not exceed sched_len ({sched_len})")]
    SchedulesExceedCycle {
        /// Configured variant count
        n_schedules: usize,
        /// Configured cycle length
        sched_len: usize,
    },

    /// Cycle too short for every node to own a slot
    #[error("sched_len ({sched_len}) must be at least n_nodes ({n_nodes})")]
    CycleTooShort {
        /// Configured cycle length
        sched_len: usize,
        /// Configured node count
        n_nodes: usize,
    },

    /// Lock table would never be reset
    #[error("mini_batch_period must be positive")]
    ZeroPeriod,
}

/// Errors raised while building core values from input data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Key lies outside the configured key space
    #[error("key {key} out of range (n_keys = {n_keys})")]
    KeyOutOfRange {
        /// Offending key
        key: Key,
        /// Configured key count
        n_keys: u64,
    },

    /// Same key listed twice in the frequency input
    #[error("duplicate frequency entry for key {0}")]
    DuplicateFrequency(Key),

    /// Transaction with no coordinated keys
    #[error("transaction {0} has no keys")]
    EmptyTransaction(TxId),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for core type operations
pub type TypesResult<T> = Result<T, TypesError>;
