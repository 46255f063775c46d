//! Run configuration: TOML file plus command-line overrides

use crate::cli::Cli;
use crate::error::{NodeError, NodeResult};
use slotsim_types::{AssignmentPolicy, SimConfig};
use std::path::Path;

/// Load a `SimConfig` from a TOML file; absent fields take their defaults
pub fn load_config_file(path: &Path) -> NodeResult<SimConfig> {
    tracing::info!("Loading config from {:?}", path);
    let content = std::fs::read_to_string(path).map_err(|source| NodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| NodeError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the run configuration: config file (or defaults), then CLI flags, then validation
pub fn resolve(cli: &Cli) -> NodeResult<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => SimConfig::default(),
    };
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut SimConfig, cli: &Cli) {
    if let Some(n) = cli.n_nodes {
        config.n_nodes = n;
    }
    if let Some(n) = cli.n_keys {
        config.n_keys = n;
    }
    if let Some(n) = cli.n_ops {
        config.n_ops = n;
    }
    if let Some(n) = cli.accel_threshold {
        config.accel_threshold = n;
    }
    if let Some(n) = cli.n_schedules {
        config.n_schedules = n;
    }
    if let Some(n) = cli.sched_len {
        config.sched_len = n;
    }
    if let Some(n) = cli.mini_batch_period {
        config.mini_batch_period = n;
    }
    if let Some(n) = cli.max_abort {
        config.max_allow_abort_ct = n;
    }
    if let Some(n) = cli.max_steps {
        config.max_steps = Some(n);
    }
    if let Some(seed) = cli.random_seed {
        config.assignment = AssignmentPolicy::Random { seed };
    }
}
