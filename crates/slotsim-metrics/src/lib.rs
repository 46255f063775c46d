//! # slotsim-metrics
//!
//! Observability for simulation runs.
//!
//! Features:
//! - Exact-bucket histogram of abort counts at commit
//! - Commit, abort and discard counters
//! - Per-mini-batch queue depth reports
//! - JSON summary export

#![warn(missing_docs)]
#![warn(clippy::all)]

mod counters;
mod export;
mod histogram;
mod reporter;

pub use counters::Counters;
pub use export::SimulationSummary;
pub use histogram::{AbortHistogram, PREPOPULATED_MAX};
pub use reporter::{MetricsReporter, PeriodReport};
