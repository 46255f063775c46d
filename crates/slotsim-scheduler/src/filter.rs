//! Transaction filter - strips accelerated keys and ranks the rest by contention

use crate::error::{SchedulerError, SchedulerResult};
use slotsim_types::{FrequencyIndex, Key, KeySpace, Transaction, TxId};
use std::cmp::Reverse;

/// Non-empty key sequence ordered by descending frequency
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredTransaction {
    keys: Vec<Key>,
}

impl FilteredTransaction {
    /// Ranked keys
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Turn into a schedulable transaction
    pub fn into_transaction(self, id: TxId) -> SchedulerResult<Transaction> {
        Ok(Transaction::new(id, self.keys)?)
    }
}

/// Result of filtering one raw transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOutcome {
    /// At least one coordinated key remains
    Scheduled(FilteredTransaction),
    /// Every key was accelerated; the transaction never reaches the assigner
    AllAccelerated,
}

/// Removes keys at or above the acceleration threshold and sorts the rest
/// by strictly descending frequency, ties broken by ascending key value
pub struct TransactionFilter<'a> {
    frequencies: &'a FrequencyIndex,
    accel_threshold: u64,
    key_space: KeySpace,
}

impl<'a> TransactionFilter<'a> {
    /// Create a new filter
    pub fn new(frequencies: &'a FrequencyIndex, accel_threshold: u64, key_space: KeySpace) -> Self {
        Self {
            frequencies,
            accel_threshold,
            key_space,
        }
    }

    /// Filter one raw key tuple.
    ///
    /// Fails if a key is outside the key space or has no frequency entry.
    pub fn filter(&self, raw: &[Key]) -> SchedulerResult<FilterOutcome> {
        let mut ranked = Vec::with_capacity(raw.len());
        for &key in raw {
            let key = self.key_space.check(key)?;
            let freq = self
                .frequencies
                .get(key)
                .ok_or(SchedulerError::UnknownKey(key))?;
            if freq < self.accel_threshold {
                ranked.push((freq, key));
            }
        }

        if ranked.is_empty() {
            return Ok(FilterOutcome::AllAccelerated);
        }

        ranked.sort_unstable_by_key(|&(freq, key)| (Reverse(freq), key));
        Ok(FilterOutcome::Scheduled(FilteredTransaction {
            keys: ranked.into_iter().map(|(_, key)| key).collect(),
        }))
    }
}
