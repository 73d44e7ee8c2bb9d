//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use climate_pulse_core::{Record, ingest};

pub mod analyze;
pub mod info;
pub mod summary;

/// Load and prepare a CSV dataset, enforcing the configured size limit.
pub fn load_dataset(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Vec<Record>> {
    ingest::load_records(path, max_bytes).with_context(|| format!("failed to load {path}"))
}
