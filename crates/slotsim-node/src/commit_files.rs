//! Per-node commit log files
//!
//! Node `n` writes `log_<n>` in the output directory. Records go to
//! `log_<n>.tmp` first; the files are renamed into place only by
//! [`FileCommitLog::finish`].

use slotsim_core::{CommitRecord, CommitSink, PerNodeWriter};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Final path of a node's commit log
pub fn log_path(dir: &Path, node: usize) -> PathBuf {
    dir.join(format!("log_{node}"))
}

fn tmp_path(dir: &Path, node: usize) -> PathBuf {
    dir.join(format!("log_{node}.tmp"))
}

/// Commit sink writing one buffered file per node
pub struct FileCommitLog {
    writers: PerNodeWriter<BufWriter<File>>,
    dir: PathBuf,
    n_nodes: usize,
}

impl FileCommitLog {
    /// Create the temporary log files of `n_nodes` nodes under `dir`
    pub fn create(dir: &Path, n_nodes: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let writers = (0..n_nodes)
            .map(|node| File::create(tmp_path(dir, node)).map(BufWriter::new))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Self {
            writers: PerNodeWriter::new(writers),
            dir: dir.to_path_buf(),
            n_nodes,
        })
    }

    /// Flush and move every log into place, returning the final paths
    pub fn finish(mut self) -> io::Result<Vec<PathBuf>> {
        self.writers.flush()?;
        drop(self.writers);

        let mut paths = Vec::with_capacity(self.n_nodes);
        for node in 0..self.n_nodes {
            let path = log_path(&self.dir, node);
            fs::rename(tmp_path(&self.dir, node), &path)?;
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Remove the temporary logs left by a failed run
pub fn remove_partial(dir: &Path, n_nodes: usize) {
    for node in 0..n_nodes {
        let path = tmp_path(dir, node);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to remove partial log {:?}: {}", path, e);
            }
        }
    }
}

impl CommitSink for FileCommitLog {
    fn record(&mut self, record: CommitRecord) -> io::Result<()> {
        self.writers.record(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writers.flush()
    }
}
