//! Committed-transaction log
//!
//! One record per (committed transaction, key), written as the
//! whitespace-separated line `node minibatch key`.

use slotsim_types::{Key, NodeId};
use std::fmt;
use std::io::{self, Write};

/// One committed key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitRecord {
    /// Committing node
    pub node: NodeId,
    /// Mini-batch index of the commit
    pub minibatch: u64,
    /// Committed key
    pub key: Key,
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.node, self.minibatch, self.key)
    }
}

/// Destination of commit records
pub trait CommitSink {
    /// Record one committed key
    fn record(&mut self, record: CommitRecord) -> io::Result<()>;

    /// Push buffered records to their destination
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCommitLog;

impl CommitSink for NullCommitLog {
    fn record(&mut self, _record: CommitRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every record in memory, in commit order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryCommitLog {
    records: Vec<CommitRecord>,
}

impl MemoryCommitLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in commit order
    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    /// Records of one node, in commit order
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &CommitRecord> {
        self.records.iter().filter(move |r| r.node == node)
    }
}

impl CommitSink for MemoryCommitLog {
    fn record(&mut self, record: CommitRecord) -> io::Result<()> {
        self.records.push(record);
        Ok(())
    }
}

/// Writes each node's records to that node's writer
#[derive(Debug)]
pub struct PerNodeWriter<W: Write> {
    writers: Vec<W>,
}

impl<W: Write> PerNodeWriter<W> {
    /// One writer per node, indexed by node
    pub fn new(writers: Vec<W>) -> Self {
        Self { writers }
    }

    /// Give the writers back
    pub fn into_inner(self) -> Vec<W> {
        self.writers
    }
}

impl<W: Write> CommitSink for PerNodeWriter<W> {
    fn record(&mut self, record: CommitRecord) -> io::Result<()> {
        let writer = self.writers.get_mut(record.node.index()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no commit log for node {}", record.node),
            )
        })?;
        writeln!(writer, "{record}")
    }

    fn flush(&mut self) -> io::Result<()> {
        for writer in &mut self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}
