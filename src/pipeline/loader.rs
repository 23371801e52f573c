//! Dataset loader for CSV files.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load a training table from a CSV file.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let lf = LazyCsvReader::new(path)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?;

    lf.collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))
}

/// Load one record from a JSON file for the predict command.
pub fn load_record(path: &Path) -> Result<super::schema::Record> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open record file: {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse record JSON: {}", path.display()))
}
