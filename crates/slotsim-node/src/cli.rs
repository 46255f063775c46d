//! CLI argument parsing for slotsim

use clap::Parser;
use std::path::PathBuf;

/// Slot-scheduled mini-batch execution simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "slotsim")]
#[command(about = "Replay per-node transaction traces through slot-scheduled mini-batches")]
#[command(version)]
pub struct Cli {
    /// Key frequency file (`key:count` records)
    pub freq_file: PathBuf,

    /// One trace file per node, in node order
    #[arg(required = true)]
    pub trace_files: Vec<PathBuf>,

    /// TOML configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for the per-node commit logs
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write the run summary as JSON to this file
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Number of nodes
    #[arg(long)]
    pub n_nodes: Option<usize>,

    /// Number of keys
    #[arg(long)]
    pub n_keys: Option<u64>,

    /// Keys per raw transaction
    #[arg(long)]
    pub n_ops: Option<usize>,

    /// Frequency at or above which a key is accelerated
    #[arg(long)]
    pub accel_threshold: Option<u64>,

    /// Schedule variants per home node
    #[arg(long)]
    pub n_schedules: Option<usize>,

    /// Slot cycle length
    #[arg(long)]
    pub sched_len: Option<usize>,

    /// Time steps per mini-batch
    #[arg(long)]
    pub mini_batch_period: Option<u64>,

    /// Retries allowed before a transaction is discarded
    #[arg(long)]
    pub max_abort: Option<u32>,

    /// Stop after this many time steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Place transactions in random slots with this seed instead of scheduling
    #[arg(long)]
    pub random_seed: Option<u64>,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["slotsim", "freq.txt", "t0.txt", "t1.txt"]);
        assert_eq!(cli.freq_file, PathBuf::from("freq.txt"));
        assert_eq!(
            cli.trace_files,
            vec![PathBuf::from("t0.txt"), PathBuf::from("t1.txt")]
        );
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(cli.summary_json.is_none());
        assert!(cli.n_nodes.is_none());
        assert!(cli.random_seed.is_none());
    }

    #[test]
    fn test_cli_custom_values() {
        let cli = Cli::parse_from([
            "slotsim",
            "--config", "sim.toml",
            "--log-level", "debug",
            "--out-dir", "/tmp/logs",
            "--summary-json", "/tmp/summary.json",
            "--n-nodes", "3",
            "--n-keys", "3000",
            "--n-ops", "4",
            "--accel-threshold", "100",
            "--n-schedules", "5",
            "--sched-len", "6",
            "--mini-batch-period", "50",
            "--max-abort", "2",
            "--max-steps", "1000",
            "--random-seed", "7",
            "freq.txt", "a", "b", "c",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("sim.toml")));
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(cli.summary_json, Some(PathBuf::from("/tmp/summary.json")));
        assert_eq!(cli.n_nodes, Some(3));
        assert_eq!(cli.n_keys, Some(3000));
        assert_eq!(cli.n_ops, Some(4));
        assert_eq!(cli.accel_threshold, Some(100));
        assert_eq!(cli.n_schedules, Some(5));
        assert_eq!(cli.sched_len, Some(6));
        assert_eq!(cli.mini_batch_period, Some(50));
        assert_eq!(cli.max_abort, Some(2));
        assert_eq!(cli.max_steps, Some(1000));
        assert_eq!(cli.random_seed, Some(7));
        assert_eq!(cli.trace_files.len(), 3);
    }

    #[test]
    fn test_cli_requires_trace() {
        assert!(Cli::try_parse_from(["slotsim", "freq.txt"]).is_err());
    }
}
