//! # slotsim-scheduler
//!
//! Conflict-avoidance slot scheduling for partitioned multi-key transactions.
//!
//! Every key is mapped, through its home partition and a hash-selected
//! variant, to a cyclic ownership pattern over the slot cycle. A
//! transaction is queued on its originating node in a slot that its most
//! contended keys' patterns assign to that node, so nodes tend to touch
//! shared keys in different slots.
//!
//! Features:
//! - Schedule table construction and lookup
//! - Accelerated key filtering and contention ranking
//! - Two-level constrained slot assignment with greedy load balancing
//! - Per-(node, slot) FIFO queues
//! - Per-batch key lock table

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assigner;
mod error;
mod filter;
mod lock_table;
mod queue;
mod schedule;

pub use assigner::TransactionAssigner;
pub use error::{SchedulerError, SchedulerResult};
pub use filter::{FilterOutcome, FilteredTransaction, TransactionFilter};
pub use lock_table::LockTable;
pub use queue::{NodeQueues, SlotQueues};
pub use schedule::{ScheduleTable, ScheduleVariant};
