//! Key frequency index

use crate::error::{TypesError, TypesResult};
use crate::key::Key;
use std::collections::HashMap;

/// Immutable mapping from key to observed occurrence count
#[derive(Clone, Debug, Default)]
pub struct FrequencyIndex {
    counts: HashMap<Key, u64>,
}

impl FrequencyIndex {
    /// Build an index from `(key, count)` records.
    ///
    /// A key listed more than once is rejected.
    pub fn from_records<I>(records: I) -> TypesResult<Self>
    where
        I: IntoIterator<Item = (Key, u64)>,
    {
        let records = records.into_iter();
        let mut counts = HashMap::with_capacity(records.size_hint().0);
        for (key, count) in records {
            if counts.insert(key, count).is_some() {
                return Err(TypesError::DuplicateFrequency(key));
            }
        }
        Ok(Self { counts })
    }

    /// Occurrence count of a key, `None` if the key was never observed
    pub fn get(&self, key: Key) -> Option<u64> {
        self.counts.get(&key).copied()
    }

    /// Number of keys in the index
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
