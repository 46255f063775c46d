//! Simulation configuration

use crate::error::ConfigError;
use crate::key::KeySpace;
use serde::{Deserialize, Serialize};

/// Largest supported node count (one bit per node in the active set)
const MAX_NODES: usize = 64;

/// How filtered transactions are placed into slot queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Hash-derived conflict-avoidance schedule with greedy load balancing
    #[default]
    Scheduled,
    /// Uniformly random slot per transaction (unscheduled baseline)
    Random {
        /// RNG seed, keeps the baseline reproducible
        seed: u64,
    },
}

/// Startup parameters of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of partitions
    #[serde(default = "default_n_nodes")]
    pub n_nodes: usize,
    /// Number of keys, split evenly across partitions
    #[serde(default = "default_n_keys")]
    pub n_keys: u64,
    /// Raw keys per transaction in the trace files
    #[serde(default = "default_n_ops")]
    pub n_ops: usize,
    /// Keys with frequency at or above this are accelerated
    #[serde(default = "default_accel_threshold")]
    pub accel_threshold: u64,
    /// Schedule variants per home node
    #[serde(default = "default_n_schedules")]
    pub n_schedules: usize,
    /// Slot cycle length
    #[serde(default = "default_sched_len")]
    pub sched_len: usize,
    /// Time steps per mini-batch
    #[serde(default = "default_mini_batch_period")]
    pub mini_batch_period: u64,
    /// Retries allowed before a transaction is discarded
    #[serde(default = "default_max_allow_abort_ct")]
    pub max_allow_abort_ct: u32,
    /// Slot assignment policy
    #[serde(default)]
    pub assignment: AssignmentPolicy,
    /// Optional ceiling on simulated time steps
    #[serde(default)]
    pub max_steps: Option<u64>,
}

fn default_n_nodes() -> usize {
    2
}

fn default_n_keys() -> u64 {
    10_000_000
}

fn default_n_ops() -> usize {
    8
}

fn default_accel_threshold() -> u64 {
    720
}

fn default_n_schedules() -> usize {
    10
}

fn default_sched_len() -> usize {
    10
}

fn default_mini_batch_period() -> u64 {
    5000
}

fn default_max_allow_abort_ct() -> u32 {
    1
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_nodes: default_n_nodes(),
            n_keys: default_n_keys(),
            n_ops: default_n_ops(),
            accel_threshold: default_accel_threshold(),
            n_schedules: default_n_schedules(),
            sched_len: default_sched_len(),
            mini_batch_period: default_mini_batch_period(),
            max_allow_abort_ct: default_max_allow_abort_ct(),
            assignment: AssignmentPolicy::default(),
            max_steps: None,
        }
    }
}

impl SimConfig {
    /// Check that the parameters describe a runnable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_nodes < 2 || self.n_nodes > MAX_NODES {
            return Err(ConfigError::NodeCount(self.n_nodes));
        }
        if self.n_keys == 0 || self.n_keys % self.n_nodes as u64 != 0 {
            return Err(ConfigError::KeySpace {
                n_keys: self.n_keys,
                n_nodes: self.n_nodes,
            });
        }
        if self.n_ops == 0 {
            return Err(ConfigError::ZeroOps);
        }
        if self.n_schedules == 0 {
            return Err(ConfigError::ZeroSchedules);
        }
        if self.n_schedules > self.sched_len {
            return Err(ConfigError::SchedulesExceedCycle {
                n_schedules: self.n_schedules,
                sched_len: self.sched_len,
            });
        }
        if self.sched_len < self.n_nodes {
            return Err(ConfigError::CycleTooShort {
                sched_len: self.sched_len,
                n_nodes: self.n_nodes,
            });
        }
        if self.mini_batch_period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }

    /// Key space described by `n_keys` and `n_nodes`
    pub fn key_space(&self) -> KeySpace {
        KeySpace::new(self.n_keys, self.n_nodes)
    }
}
