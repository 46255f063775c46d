//! Transaction assigner - buckets every transaction into one (node, slot) queue
//!
//! Candidate slots for a transaction on node `n` are the positions where
//! the pattern of its highest-frequency key is owned by `n`, intersected
//! with the same condition for its second key when it has one. The
//! lightest candidate queue wins, lowest slot on ties. An empty
//! intersection relaxes to the first key alone.

use crate::error::{SchedulerError, SchedulerResult};
use crate::queue::SlotQueues;
use crate::schedule::ScheduleTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotsim_types::{AssignmentPolicy, Key, KeySpace, NodeId, Slot, Transaction};
use tracing::trace;

enum Placement {
    Scheduled,
    Random(StdRng),
}

/// Places transactions into slot queues
pub struct TransactionAssigner<'a> {
    table: &'a ScheduleTable,
    key_space: KeySpace,
    placement: Placement,
}

impl<'a> TransactionAssigner<'a> {
    /// Create an assigner over a schedule table
    pub fn new(table: &'a ScheduleTable, key_space: KeySpace, policy: AssignmentPolicy) -> Self {
        let placement = match policy {
            AssignmentPolicy::Scheduled => Placement::Scheduled,
            AssignmentPolicy::Random { seed } => Placement::Random(StdRng::seed_from_u64(seed)),
        };
        Self {
            table,
            key_space,
            placement,
        }
    }

    /// Pick the slot on `node` for a transaction whose two highest-frequency
    /// keys are `primary` and `secondary`, given each slot's current queue
    /// depth.
    pub fn pick_slot<F>(
        &mut self,
        primary: Key,
        secondary: Option<Key>,
        node: NodeId,
        depth: F,
    ) -> SchedulerResult<Slot>
    where
        F: Fn(Slot) -> usize,
    {
        if node.index() >= self.table.n_nodes() {
            return Err(SchedulerError::NodeOutOfRange {
                node,
                n_nodes: self.table.n_nodes(),
            });
        }
        let sched_len = self.table.sched_len();

        match &mut self.placement {
            Placement::Random(rng) => Ok(rng.gen_range(0..sched_len)),
            Placement::Scheduled => {
                let first = self.table.pattern_for(primary, &self.key_space)?;

                if let Some(k1) = secondary {
                    let second = self.table.pattern_for(k1, &self.key_space)?;
                    let both = lightest(
                        first.slots_owned_by(node).filter(|&s| second.owner(s) == node),
                        &depth,
                    );
                    if let Some(slot) = both {
                        return Ok(slot);
                    }
                    trace!(%node, %primary, %k1, "empty two-key intersection, relaxing");
                }

                lightest(first.slots_owned_by(node), &depth)
                    .ok_or(SchedulerError::NoCandidateSlot { node, key: primary })
            }
        }
    }

    /// Assign a transaction to a slot of `node` and append it to that queue
    pub fn assign(
        &mut self,
        tx: Transaction,
        node: NodeId,
        queues: &mut SlotQueues,
    ) -> SchedulerResult<Slot> {
        let slot = {
            let node_queues = queues.node(node)?;
            self.pick_slot(tx.primary_key(), tx.secondary_key(), node, |s| {
                node_queues.depth(s)
            })?
        };
        queues.push(node, slot, tx)?;
        Ok(slot)
    }
}

/// Lowest-depth candidate; `min_by_key` keeps the first minimum and
/// candidates come in ascending order, so ties go to the lowest slot
fn lightest<D>(candidates: impl Iterator<Item = Slot>, depth: &D) -> Option<Slot>
where
    D: Fn(Slot) -> usize,
{
    candidates.min_by_key(|&s| depth(s))
}
