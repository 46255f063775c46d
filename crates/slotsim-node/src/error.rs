//! Binary error types

use slotsim_core::SimulationError;
use slotsim_types::{ConfigError, TypesError};
use std::path::PathBuf;
use thiserror::Error;

/// Malformed input file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Token that is not a non-negative integer
    #[error("{}:{line}: invalid integer {token:?}", path.display())]
    InvalidInteger {
        /// Input file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },

    /// Frequency record not of the form `key:count`
    #[error("{}:{line}: expected key:count, got {record:?}", path.display())]
    BadRecord {
        /// Input file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending record
        record: String,
    },

    /// Trace value count not a multiple of the transaction width
    #[error("{}: {values} values do not split into transactions of {n_ops} keys", path.display())]
    Arity {
        /// Input file
        path: PathBuf,
        /// Values read
        values: usize,
        /// Configured keys per transaction
        n_ops: usize,
    },

    /// Frequency records rejected as a whole
    #[error("{}: {source}", path.display())]
    Frequencies {
        /// Input file
        path: PathBuf,
        /// Underlying error
        source: TypesError,
    },
}

/// Binary error type
#[derive(Debug, Error)]
pub enum NodeError {
    /// File could not be read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a configuration
    #[error("invalid config file {}: {source}", path.display())]
    ConfigFile {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// Configuration rejected
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Input malformation
    #[error("malformed input: {0}")]
    Load(#[from] LoadError),

    /// Trace file count differs from the node count
    #[error("{got} trace files given for {expected} nodes")]
    TraceCount {
        /// Configured node count
        expected: usize,
        /// Trace files given
        got: usize,
    },

    /// Simulation failed
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for binary operations
pub type NodeResult<T> = Result<T, NodeError>;
