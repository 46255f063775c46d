//! Per-(node, slot) FIFO queues

use crate::error::{SchedulerError, SchedulerResult};
use slotsim_types::{NodeId, Slot, Transaction};
use std::collections::VecDeque;

/// One node's queues, a fixed array indexed by slot
#[derive(Clone, Debug)]
pub struct NodeQueues {
    slots: Box<[VecDeque<Transaction>]>,
    pending: usize,
}

impl NodeQueues {
    fn new(sched_len: usize) -> Self {
        Self {
            slots: (0..sched_len).map(|_| VecDeque::new()).collect(),
            pending: 0,
        }
    }

    /// Queue length of a slot
    pub fn depth(&self, slot: Slot) -> usize {
        self.slots.get(slot).map_or(0, VecDeque::len)
    }

    /// Queue lengths in slot order
    pub fn depths(&self) -> Vec<usize> {
        self.slots.iter().map(VecDeque::len).collect()
    }

    /// Transactions queued across all slots
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Check if every slot queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Iterate the transactions of one slot, head first
    pub fn iter_slot(&self, slot: Slot) -> impl Iterator<Item = &Transaction> {
        self.slots.get(slot).into_iter().flatten()
    }
}

/// All nodes' slot queues
#[derive(Clone, Debug)]
pub struct SlotQueues {
    nodes: Vec<NodeQueues>,
    sched_len: usize,
}

impl SlotQueues {
    /// Create empty queues for `n_nodes` nodes and a `sched_len` slot cycle
    pub fn new(n_nodes: usize, sched_len: usize) -> Self {
        Self {
            nodes: (0..n_nodes).map(|_| NodeQueues::new(sched_len)).collect(),
            sched_len,
        }
    }

    /// Number of nodes
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Slot cycle length
    pub fn sched_len(&self) -> usize {
        self.sched_len
    }

    /// Queues of one node
    pub fn node(&self, node: NodeId) -> SchedulerResult<&NodeQueues> {
        self.nodes
            .get(node.index())
            .ok_or(SchedulerError::NodeOutOfRange {
                node,
                n_nodes: self.nodes.len(),
            })
    }

    /// Append a transaction at the tail of `(node, slot)`
    pub fn push(&mut self, node: NodeId, slot: Slot, tx: Transaction) -> SchedulerResult<()> {
        let queues = self.node_mut(node)?;
        let sched_len = queues.slots.len();
        let queue = queues
            .slots
            .get_mut(slot)
            .ok_or(SchedulerError::SlotOutOfRange { slot, sched_len })?;
        queue.push_back(tx);
        queues.pending += 1;
        Ok(())
    }

    /// Remove the head transaction of `(node, slot)`
    pub fn pop(&mut self, node: NodeId, slot: Slot) -> Option<Transaction> {
        let queues = self.nodes.get_mut(node.index())?;
        let tx = queues.slots.get_mut(slot)?.pop_front()?;
        queues.pending -= 1;
        Some(tx)
    }

    /// Queue length of `(node, slot)`, zero when out of range
    pub fn depth(&self, node: NodeId, slot: Slot) -> usize {
        self.nodes.get(node.index()).map_or(0, |q| q.depth(slot))
    }

    /// Queue lengths per node, each in slot order
    pub fn depth_matrix(&self) -> Vec<Vec<usize>> {
        self.nodes.iter().map(NodeQueues::depths).collect()
    }

    /// Transactions queued anywhere
    pub fn total_pending(&self) -> usize {
        self.nodes.iter().map(NodeQueues::pending).sum()
    }

    /// Check if every queue of every node is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(NodeQueues::is_empty)
    }

    fn node_mut(&mut self, node: NodeId) -> SchedulerResult<&mut NodeQueues> {
        let n_nodes = self.nodes.len();
        self.nodes
            .get_mut(node.index())
            .ok_or(SchedulerError::NodeOutOfRange { node, n_nodes })
    }
}
