//! slotsim binary
//!
//! Loads a key frequency file and one trace per node, runs the mini-batch
//! simulation and writes one commit log per node plus a run summary.

mod cli;
mod commit_files;
mod config;
mod error;
mod loader;

use anyhow::Result;
use cli::Cli;
use commit_files::FileCommitLog;
use error::{NodeError, NodeResult};
use slotsim_core::{RawTrace, Simulation};
use slotsim_metrics::{MetricsReporter, SimulationSummary};
use slotsim_types::{FrequencyIndex, SimConfig};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("slotsim starting...");

    let config = config::resolve(&cli)?;
    if cli.trace_files.len() != config.n_nodes {
        return Err(NodeError::TraceCount {
            expected: config.n_nodes,
            got: cli.trace_files.len(),
        }
        .into());
    }

    let frequencies = loader::load_frequencies(&cli.freq_file)?;
    let traces = cli
        .trace_files
        .iter()
        .map(|path| loader::load_trace(path, config.n_ops))
        .collect::<NodeResult<Vec<_>>>()?;

    let summary = run(&config, &frequencies, &traces, &cli.out_dir)?;

    let json = summary.to_json()?;
    if let Some(path) = &cli.summary_json {
        std::fs::write(path, &json)?;
        tracing::info!("Summary written to {:?}", path);
    }
    println!("{json}");

    tracing::info!("slotsim finished");
    Ok(())
}

/// Run the simulation, publishing the commit logs only if it succeeds
fn run(
    config: &SimConfig,
    frequencies: &FrequencyIndex,
    traces: &[RawTrace],
    out_dir: &Path,
) -> NodeResult<SimulationSummary> {
    let sink = FileCommitLog::create(out_dir, config.n_nodes)?;

    match simulate(config, frequencies, traces, sink) {
        Ok((summary, sink)) => {
            for path in sink.finish()? {
                tracing::info!("Commit log written to {:?}", path);
            }
            Ok(summary)
        }
        Err(e) => {
            commit_files::remove_partial(out_dir, config.n_nodes);
            Err(e)
        }
    }
}

fn simulate(
    config: &SimConfig,
    frequencies: &FrequencyIndex,
    traces: &[RawTrace],
    sink: FileCommitLog,
) -> NodeResult<(SimulationSummary, FileCommitLog)> {
    let mut sim = Simulation::new(config, frequencies, traces, sink, MetricsReporter::new())?;
    let summary = sim.run()?;
    Ok((summary, sim.into_executor().into_sink()))
}
