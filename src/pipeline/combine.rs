//! Column combination: numeric columns followed by one-hot columns.
//!
//! The combined column order is the contract every later stage is fit
//! against, so it is captured as a manifest here and persisted with the
//! artifacts.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PipelineError;
use super::manifest::ColumnManifest;
use super::schema::NUMERIC_FIELDS;

/// Concatenate numeric columns (declared order, cast to f64) with the
/// encoder's one-hot columns (already in field/category order).
///
/// Returns the combined matrix and the frozen manifest describing it.
pub fn combine_columns(
    cleaned: &DataFrame,
    encoded: &DataFrame,
) -> Result<(DataFrame, ColumnManifest)> {
    let mut columns: Vec<Column> = Vec::with_capacity(NUMERIC_FIELDS.len() + encoded.width());

    for name in NUMERIC_FIELDS {
        let column = cleaned
            .column(name)
            .map_err(|_| PipelineError::MissingRequiredField(name.to_string()))?;
        let cast = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        columns.push(cast);
    }

    columns.extend(encoded.get_columns().iter().cloned());

    let combined = DataFrame::new(columns).context("Failed to combine feature columns")?;
    let manifest = ColumnManifest::new(
        combined
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string()),
    );

    Ok((combined, manifest))
}

/// Column names of a DataFrame as owned strings, for manifest checks.
pub fn live_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}
