//! Lock Table (LT) - tracks which node holds each key within a mini-batch

use slotsim_types::{Key, NodeId};
use std::collections::HashMap;

/// Lock table for the current mini-batch.
///
/// Each key is held by at most one node. Locks are only ever released all
/// at once, at a mini-batch boundary.
#[derive(Debug, Default)]
pub struct LockTable {
    /// Map from key to holding node
    owners: HashMap<Key, NodeId>,
}

impl LockTable {
    /// Create a new empty lock table
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
        }
    }

    /// First key in `keys` held by a node other than `node`
    pub fn conflict(&self, keys: &[Key], node: NodeId) -> Option<(Key, NodeId)> {
        keys.iter().find_map(|key| match self.owners.get(key) {
            Some(&owner) if owner != node => Some((*key, owner)),
            _ => None,
        })
    }

    /// Acquire every key for `node`, or none of them.
    ///
    /// Returns `Err((key, owner))` for the first conflicting key. Keys
    /// already held by `node` are re-acquired without change.
    pub fn try_acquire_all(&mut self, keys: &[Key], node: NodeId) -> Result<(), (Key, NodeId)> {
        if let Some(conflict) = self.conflict(keys, node) {
            return Err(conflict);
        }
        for key in keys {
            self.owners.insert(*key, node);
        }
        Ok(())
    }

    /// Get the holder of a key
    pub fn owner(&self, key: Key) -> Option<NodeId> {
        self.owners.get(&key).copied()
    }

    /// Get the total number of held keys
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Release every lock
    pub fn clear(&mut self) {
        self.owners.clear();
    }
}
