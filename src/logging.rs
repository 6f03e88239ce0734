//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only the session's own output (the
//! board, move reports, JSON lines).

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Build the filter: an explicit `--log-level` wins, then RUST_LOG, then `warn`
pub fn filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level).map_err(|err| anyhow!("bad log filter {level:?}: {err}")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global subscriber
pub fn init(level: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
