//! Transaction types

use crate::error::{TypesError, TypesResult};
use crate::key::{Key, NodeId};
use std::fmt;

/// Transaction identifier: originating node and position in its trace
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId {
    /// Node whose trace produced the transaction
    pub node: NodeId,
    /// 0-based ordinal within that trace
    pub seq: u64,
}

impl TxId {
    /// Create a new transaction ID
    pub fn new(node: NodeId, seq: u64) -> Self {
        Self { node, seq }
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.node, self.seq)
    }
}

/// A scheduled transaction.
///
/// `keys` is never empty and is ordered by descending key frequency, so
/// `keys[0]` is the most contended key. A transaction is owned by exactly
/// one slot queue at a time and moves between queues by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction ID
    pub id: TxId,
    keys: Vec<Key>,
    /// Failed execution attempts so far
    pub abort_count: u32,
}

impl Transaction {
    /// Create a transaction from an already filtered, non-empty key sequence
    pub fn new(id: TxId, keys: Vec<Key>) -> TypesResult<Self> {
        if keys.is_empty() {
            return Err(TypesError::EmptyTransaction(id));
        }
        Ok(Self {
            id,
            keys,
            abort_count: 0,
        })
    }

    /// Keys in descending frequency order
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Highest-frequency key
    pub fn primary_key(&self) -> Key {
        self.keys[0]
    }

    /// Second highest-frequency key, if any
    pub fn secondary_key(&self) -> Option<Key> {
        self.keys.get(1).copied()
    }

    /// Record a failed attempt and return the new abort count
    pub fn record_abort(&mut self) -> u32 {
        self.abort_count += 1;
        self.abort_count
    }
}
