//! # slotsim-types
//!
//! Core types shared by every crate of the slot scheduling simulator.
//!
//! This crate provides:
//! - [`Key`], [`NodeId`] and [`KeySpace`] - key identifiers and their home partition
//! - [`Transaction`] - a filtered key sequence plus its abort count
//! - [`FrequencyIndex`] - the read-only key to occurrence count mapping
//! - [`SimConfig`] - the startup parameters of a run

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod frequency;
mod key;
mod transaction;

pub use config::{AssignmentPolicy, SimConfig};
pub use error::{ConfigError, TypesError, TypesResult};
pub use frequency::FrequencyIndex;
pub use key::{Key, KeySpace, NodeId, Slot};
pub use transaction::{Transaction, TxId};
