//! Key and node identifiers

use crate::error::{TypesError, TypesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the repeating slot cycle
pub type Slot = usize;

/// Globally unique key identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub u64);

impl Key {
    /// Create a new key
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw key value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Key {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partition (node) identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new node ID
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the node index
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The key range and its split into equal contiguous partitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySpace {
    n_keys: u64,
    n_nodes: usize,
}

impl KeySpace {
    /// Create a key space of `n_keys` keys over `n_nodes` partitions.
    ///
    /// Callers are expected to have validated that `n_keys` is a positive
    /// multiple of `n_nodes` (see [`SimConfig::validate`](crate::SimConfig::validate)).
    pub fn new(n_keys: u64, n_nodes: usize) -> Self {
        Self { n_keys, n_nodes }
    }

    /// Total number of keys
    pub fn n_keys(&self) -> u64 {
        self.n_keys
    }

    /// Number of partitions
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Keys per partition
    pub fn partition_size(&self) -> u64 {
        self.n_keys / self.n_nodes as u64
    }

    /// Check that a key belongs to this key space
    pub fn check(&self, key: Key) -> TypesResult<Key> {
        if key.0 < self.n_keys {
            Ok(key)
        } else {
            Err(TypesError::KeyOutOfRange {
                key,
                n_keys: self.n_keys,
            })
        }
    }

    /// The partition a key belongs to: `key / (n_keys / n_nodes)`
    pub fn home_node(&self, key: Key) -> NodeId {
        NodeId((key.0 / self.partition_size()) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(42).to_string(), "42");
        assert_eq!(NodeId::new(3).to_string(), "3");
    }

    #[test]
    fn test_key_ordering() {
        assert!(Key::new(1) < Key::new(2));
        assert_eq!(Key::from(5u64), Key::new(5));
    }

    #[test]
    fn test_home_node_two_partitions() {
        let space = KeySpace::new(10_000_000, 2);
        assert_eq!(space.partition_size(), 5_000_000);
        assert_eq!(space.home_node(Key::new(0)), NodeId(0));
        assert_eq!(space.home_node(Key::new(4_999_999)), NodeId(0));
        assert_eq!(space.home_node(Key::new(5_000_000)), NodeId(1));
        assert_eq!(space.home_node(Key::new(9_999_999)), NodeId(1));
    }

    #[test]
    fn test_home_node_four_partitions() {
        let space = KeySpace::new(100, 4);
        assert_eq!(space.home_node(Key::new(24)), NodeId(0));
        assert_eq!(space.home_node(Key::new(25)), NodeId(1));
        assert_eq!(space.home_node(Key::new(99)), NodeId(3));
    }

    #[test]
    fn test_check_out_of_range() {
        let space = KeySpace::new(100, 2);
        assert!(space.check(Key::new(99)).is_ok());
        assert_eq!(
            space.check(Key::new(100)),
            Err(TypesError::KeyOutOfRange {
                key: Key::new(100),
                n_keys: 100
            })
        );
    }
}
