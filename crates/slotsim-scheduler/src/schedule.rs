//! Schedule Table - per-key cyclic slot ownership patterns
//!
//! For home node `n` and variant `v`, the pattern owner at cycle position
//! `p` is `n` when `p == v` and another node otherwise. With two nodes the
//! other node is fixed; with more, positions rotate through the non-home
//! nodes in ascending order.

use crate::error::{SchedulerError, SchedulerResult};
use slotsim_types::{Key, KeySpace, NodeId, Slot};

/// One cyclic ownership pattern: the owner node of each slot position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleVariant {
    owners: Box<[NodeId]>,
}

impl ScheduleVariant {
    /// Owner of a slot position
    ///
    /// # Panics
    ///
    /// Panics if `slot` is outside the cycle.
    pub fn owner(&self, slot: Slot) -> NodeId {
        self.owners[slot]
    }

    /// Owners in cycle order
    pub fn owners(&self) -> &[NodeId] {
        &self.owners
    }

    /// Slot positions owned by `node`, ascending
    pub fn slots_owned_by(&self, node: NodeId) -> impl Iterator<Item = Slot> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == node)
            .map(|(slot, _)| slot)
    }
}

/// Immutable (home node, variant) -> pattern table, built once at startup
#[derive(Clone, Debug)]
pub struct ScheduleTable {
    n_nodes: usize,
    n_schedules: usize,
    sched_len: usize,
    /// Row-major by home node, then variant
    variants: Vec<ScheduleVariant>,
}

impl ScheduleTable {
    /// Build the table for `n_nodes` partitions, `n_schedules` variants per
    /// partition and a `sched_len` slot cycle.
    pub fn build(n_nodes: usize, n_schedules: usize, sched_len: usize) -> Self {
        let mut variants = Vec::with_capacity(n_nodes * n_schedules);
        for home in 0..n_nodes {
            for variant in 0..n_schedules {
                let owners = (0..sched_len)
                    .map(|pos| owner_at(home, variant, pos, n_nodes))
                    .collect();
                variants.push(ScheduleVariant { owners });
            }
        }

        Self {
            n_nodes,
            n_schedules,
            sched_len,
            variants,
        }
    }

    /// Pattern for a home node and variant
    pub fn lookup(&self, home: NodeId, variant: usize) -> SchedulerResult<&ScheduleVariant> {
        if home.index() >= self.n_nodes {
            return Err(SchedulerError::HomeNodeOutOfRange {
                node: home,
                n_nodes: self.n_nodes,
            });
        }
        if variant >= self.n_schedules {
            return Err(SchedulerError::VariantOutOfRange {
                variant,
                n_schedules: self.n_schedules,
            });
        }
        Ok(&self.variants[home.index() * self.n_schedules + variant])
    }

    /// Variant selected for a key: `hash(key) mod n_schedules`, with the
    /// identity hash on the key value
    pub fn variant_for(&self, key: Key) -> usize {
        (key.as_u64() % self.n_schedules as u64) as usize
    }

    /// Pattern governing a key
    pub fn pattern_for(&self, key: Key, key_space: &KeySpace) -> SchedulerResult<&ScheduleVariant> {
        let key = key_space.check(key)?;
        self.lookup(key_space.home_node(key), self.variant_for(key))
    }

    /// Number of partitions
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Variants per partition
    pub fn n_schedules(&self) -> usize {
        self.n_schedules
    }

    /// Slot cycle length
    pub fn sched_len(&self) -> usize {
        self.sched_len
    }
}

fn owner_at(home: usize, variant: usize, pos: Slot, n_nodes: usize) -> NodeId {
    if pos == variant || n_nodes < 2 {
        return NodeId(home);
    }
    // rank among the positions that do not belong to the home node
    let rank = if pos < variant { pos } else { pos - 1 };
    let other = rank % (n_nodes - 1);
    NodeId(if other < home { other } else { other + 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_two_node_patterns() {
        let table = ScheduleTable::build(2, 4, 4);

        let p = table.lookup(NodeId(0), 2).unwrap();
        assert_eq!(p.owners(), ids(&[1, 1, 0, 1]).as_slice());

        let p = table.lookup(NodeId(1), 0).unwrap();
        assert_eq!(p.owners(), ids(&[1, 0, 0, 0]).as_slice());
    }

    #[test]
    fn test_home_owns_exactly_variant_position_with_two_nodes() {
        let table = ScheduleTable::build(2, 10, 10);
        for home in 0..2 {
            for v in 0..10 {
                let p = table.lookup(NodeId(home), v).unwrap();
                let owned: Vec<Slot> = p.slots_owned_by(NodeId(home)).collect();
                assert_eq!(owned, vec![v]);
                assert_eq!(p.slots_owned_by(NodeId(1 - home)).count(), 9);
            }
        }
    }

    #[test]
    fn test_three_node_rotation() {
        let table = ScheduleTable::build(3, 3, 5);
        let p = table.lookup(NodeId(1), 1).unwrap();
        // non-home nodes are 0 and 2, rotated over positions 0, 2, 3, 4
        assert_eq!(p.owners(), ids(&[0, 1, 2, 0, 2]).as_slice());
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = ScheduleTable::build(2, 4, 4);
        assert_eq!(
            table.lookup(NodeId(0), 4),
            Err(SchedulerError::VariantOutOfRange {
                variant: 4,
                n_schedules: 4
            })
        );
        assert_eq!(
            table.lookup(NodeId(2), 0),
            Err(SchedulerError::HomeNodeOutOfRange {
                node: NodeId(2),
                n_nodes: 2
            })
        );
    }

    #[test]
    fn test_pattern_for_key() {
        let table = ScheduleTable::build(2, 4, 4);
        let space = KeySpace::new(100, 2);

        // key 57: home 1, variant 57 % 4 = 1
        let p = table.pattern_for(Key(57), &space).unwrap();
        assert_eq!(p, table.lookup(NodeId(1), 1).unwrap());

        assert!(matches!(
            table.pattern_for(Key(100), &space),
            Err(SchedulerError::Input(_))
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = ScheduleTable::build(4, 6, 8);
        let b = ScheduleTable::build(4, 6, 8);
        for home in 0..4 {
            for v in 0..6 {
                assert_eq!(
                    a.lookup(NodeId(home), v).unwrap(),
                    b.lookup(NodeId(home), v).unwrap()
                );
            }
        }
    }

    proptest! {
        #[test]
        fn prop_every_node_owns_a_slot(
            n_nodes in 2usize..8,
            extra_len in 0usize..8,
            sched_frac in 0.0f64..1.0,
        ) {
            let sched_len = n_nodes + extra_len;
            let n_schedules = 1 + ((sched_len - 1) as f64 * sched_frac) as usize;
            let table = ScheduleTable::build(n_nodes, n_schedules, sched_len);

            for home in 0..n_nodes {
                for v in 0..n_schedules {
                    let p = table.lookup(NodeId(home), v).unwrap();
                    prop_assert_eq!(p.owners().len(), sched_len);
                    prop_assert_eq!(p.owner(v), NodeId(home));
                    for node in 0..n_nodes {
                        prop_assert!(p.slots_owned_by(NodeId(node)).next().is_some());
                    }
                }
            }
        }
    }
}
