//! Mini-batch executor
//!
//! Advances global time one step at a time. Within a step every active
//! node tries the head of its queue for the current cycle slot against
//! the lock table; conflicts abort, retry at the tail of the same queue,
//! and are discarded once the retry bound is exceeded. Every
//! `mini_batch_period` steps the lock table is cleared and the cycle
//! moves to the next slot.

use crate::commit_log::{CommitRecord, CommitSink};
use crate::error::{SimulationError, SimulationResult};
use crate::ingest::IngestOutcome;
use slotsim_metrics::{Counters, MetricsReporter, SimulationSummary};
use slotsim_scheduler::{LockTable, SlotQueues};
use slotsim_types::{NodeId, SimConfig, Slot};
use tracing::{debug, info, warn};

/// Result of one time step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran; work may remain
    Running,
    /// Every queue of every node was empty, nothing ran
    Finished,
}

/// Nodes that still have queued work, one bit per node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ActiveNodes(u64);

impl ActiveNodes {
    fn from_queues(queues: &SlotQueues) -> Self {
        let mut bits = 0u64;
        for n in 0..queues.n_nodes() {
            if queues.node(NodeId(n)).is_ok_and(|q| !q.is_empty()) {
                bits |= 1 << n;
            }
        }
        Self(bits)
    }

    fn remove(&mut self, node: NodeId) {
        self.0 &= !(1 << node.index());
    }

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn iter(self) -> impl Iterator<Item = NodeId> {
        (0..u64::BITS as usize)
            .filter(move |n| self.0 & (1 << n) != 0)
            .map(NodeId)
    }
}

/// Discrete-time executor over filled slot queues.
///
/// Owns all mutable simulation state: queues, lock table, counters.
pub struct MiniBatchExecutor<S: CommitSink> {
    queues: SlotQueues,
    locks: LockTable,
    counters: Counters,
    reporter: MetricsReporter,
    sink: S,
    active: ActiveNodes,
    sched_len: usize,
    period: u64,
    max_abort: u32,
    max_steps: Option<u64>,
    step: u64,
    minibatch: u64,
    total_transactions: u64,
    all_accelerated: u64,
}

impl<S: CommitSink> MiniBatchExecutor<S> {
    /// Create an executor over ingested queues
    pub fn new(
        config: &SimConfig,
        ingest: IngestOutcome,
        sink: S,
        reporter: MetricsReporter,
    ) -> SimulationResult<Self> {
        config.validate()?;
        let queues = ingest.queues;
        if queues.n_nodes() != config.n_nodes || queues.sched_len() != config.sched_len {
            return Err(SimulationError::QueueShape {
                expected_nodes: config.n_nodes,
                expected_slots: config.sched_len,
                nodes: queues.n_nodes(),
                slots: queues.sched_len(),
            });
        }

        Ok(Self {
            active: ActiveNodes::from_queues(&queues),
            queues,
            locks: LockTable::new(),
            counters: Counters::new(config.max_allow_abort_ct),
            reporter,
            sink,
            sched_len: config.sched_len,
            period: config.mini_batch_period,
            max_abort: config.max_allow_abort_ct,
            max_steps: config.max_steps,
            step: 0,
            minibatch: 0,
            total_transactions: ingest.total_transactions,
            all_accelerated: ingest.all_accelerated,
        })
    }

    /// Advance one time step
    pub fn step(&mut self) -> SimulationResult<StepOutcome> {
        for node in self.active.iter() {
            if self.queues.node(node)?.is_empty() {
                debug!(%node, step = self.step, "node finished");
                self.active.remove(node);
            }
        }
        if self.active.is_empty() {
            return Ok(StepOutcome::Finished);
        }

        let slot = self.current_slot();
        for node in self.active.iter() {
            self.execute_head(node, slot)?;
        }

        self.step += 1;
        if self.step % self.period == 0 {
            self.end_minibatch();
        }
        Ok(StepOutcome::Running)
    }

    /// Run until every queue is empty or the step ceiling is reached
    pub fn run(&mut self) -> SimulationResult<SimulationSummary> {
        info!(
            queued = self.queues.total_pending(),
            sched_len = self.sched_len,
            period = self.period,
            "Simulation starting"
        );

        let mut halted_early = false;
        loop {
            if let Some(limit) = self.max_steps {
                if self.step >= limit && !self.queues.is_empty() {
                    warn!(
                        limit,
                        pending = self.queues.total_pending(),
                        "Step ceiling reached, stopping"
                    );
                    halted_early = true;
                    break;
                }
            }
            if self.step()? == StepOutcome::Finished {
                break;
            }
        }
        self.sink.flush()?;

        let summary = SimulationSummary {
            halted_early,
            ..self.summary()
        };
        self.reporter.on_finish(&summary);
        Ok(summary)
    }

    /// Figures of the run so far
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            timesteps: self.step,
            minibatches: self.step.div_ceil(self.period),
            total_transactions: self.total_transactions,
            all_accelerated: self.all_accelerated,
            pending: self.queues.total_pending() as u64,
            ..SimulationSummary::from_counters(&self.counters)
        }
    }

    fn execute_head(&mut self, node: NodeId, slot: Slot) -> SimulationResult<()> {
        let Some(mut tx) = self.queues.pop(node, slot) else {
            return Ok(());
        };

        match self.locks.try_acquire_all(tx.keys(), node) {
            Ok(()) => {
                debug!(tx = %tx.id, %node, slot, aborts = tx.abort_count, "commit");
                self.counters.record_commit(tx.abort_count);
                for &key in tx.keys() {
                    self.sink.record(CommitRecord {
                        node,
                        minibatch: self.minibatch,
                        key,
                    })?;
                }
            }
            Err((key, holder)) => {
                self.counters.record_abort();
                let aborts = tx.record_abort();
                if aborts <= self.max_abort {
                    debug!(tx = %tx.id, %node, %key, %holder, aborts, "abort, requeued");
                    self.queues.push(node, slot, tx)?;
                } else {
                    debug!(tx = %tx.id, %node, %key, %holder, aborts, "abort, discarded");
                    self.counters.record_discard();
                }
            }
        }
        Ok(())
    }

    fn end_minibatch(&mut self) {
        let depths = self.queues.depth_matrix();
        self.reporter
            .on_period_boundary(self.minibatch, &depths, &self.counters);
        self.locks.clear();
        self.minibatch += 1;
    }

    /// Cycle slot executed in the current mini-batch
    pub fn current_slot(&self) -> Slot {
        (self.minibatch % self.sched_len as u64) as Slot
    }

    /// Index of the current mini-batch
    pub fn current_minibatch(&self) -> u64 {
        self.minibatch
    }

    /// Time steps taken so far
    pub fn timestep(&self) -> u64 {
        self.step
    }

    /// Lock table of the current mini-batch
    pub fn lock_table(&self) -> &LockTable {
        &self.locks
    }

    /// Slot queues
    pub fn queues(&self) -> &SlotQueues {
        &self.queues
    }

    /// Outcome counters
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Reporter
    pub fn reporter(&self) -> &MetricsReporter {
        &self.reporter
    }

    /// Commit sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the executor, returning its commit sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
