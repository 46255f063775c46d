//! # slotsim-core
//!
//! Discrete-time replay of slot-scheduled transactions.
//!
//! This crate provides:
//! - [`ingest`] - parallel filtering and sequential slot assignment of raw traces
//! - [`MiniBatchExecutor`] - round-robin execution over the slot cycle against a
//!   per-mini-batch lock table, with bounded retries and discards
//! - [`CommitSink`] - destination of `(node, minibatch, key)` commit records
//! - [`Simulation`] - the whole pipeline from raw input to run summary
//!
//! ## Architecture
//!
//! ```text
//! FrequencyIndex + raw traces
//!          |
//!   TransactionFilter (per node, parallel)
//!          |
//!   TransactionAssigner (per node, in trace order)
//!          |
//!   SlotQueues[node][slot]
//!          |
//!   MiniBatchExecutor --> CommitSink
//!          |
//!   MetricsReporter
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod commit_log;
mod error;
mod executor;
mod ingest;
mod simulation;

pub use commit_log::{CommitRecord, CommitSink, MemoryCommitLog, NullCommitLog, PerNodeWriter};
pub use error::{SimulationError, SimulationResult};
pub use executor::{MiniBatchExecutor, StepOutcome};
pub use ingest::{ingest, IngestOutcome, RawTrace};
pub use simulation::Simulation;
