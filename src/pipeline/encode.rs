//! One-hot encoding with frozen per-field vocabularies.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use super::schema::CATEGORICAL_FIELDS;

/// Sorted distinct categories observed for one field at fit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVocabulary {
    pub field: String,
    /// Ascending; never grows after fit
    pub categories: Vec<i64>,
}

/// Frozen vocabularies for every categorical field, in declared field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingTable {
    pub fields: Vec<FieldVocabulary>,
}

impl EncodingTable {
    /// Names of the emitted one-hot columns: `<field>_<category>`, fields in
    /// declared order, categories ascending. This is the fixed output width.
    pub fn output_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|vocab| {
                vocab
                    .categories
                    .iter()
                    .map(move |category| format!("{}_{}", vocab.field, category))
            })
            .collect()
    }
}

/// Values of a categorical column as i64 (nulls preserved).
fn categorical_values(df: &DataFrame, field: &str) -> Result<Vec<Option<i64>>> {
    let column = df
        .column(field)
        .map_err(|_| PipelineError::MissingRequiredField(field.to_string()))?;
    let cast = column
        .cast(&DataType::Int64)
        .with_context(|| format!("Categorical column '{}' is not integer-coded", field))?;
    Ok(cast.i64()?.into_iter().collect())
}

/// Collect the sorted distinct categories of every categorical field.
pub fn fit_encoder(df: &DataFrame) -> Result<EncodingTable> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset.into());
    }

    let mut fields = Vec::with_capacity(CATEGORICAL_FIELDS.len());
    for field in CATEGORICAL_FIELDS {
        let mut categories: Vec<i64> = categorical_values(df, field)?
            .into_iter()
            .flatten()
            .collect();
        categories.sort_unstable();
        categories.dedup();

        fields.push(FieldVocabulary {
            field: field.to_string(),
            categories,
        });
    }

    Ok(EncodingTable { fields })
}

/// Emit fixed-width one-hot columns for every categorical field.
///
/// A value outside the frozen vocabulary (or a null) yields an all-zero row
/// for that field; the count of such values is returned alongside the frame
/// so callers can report it. Never an error.
pub fn encode(df: &DataFrame, table: &EncodingTable) -> Result<(DataFrame, usize)> {
    let height = df.height();
    let mut columns: Vec<Column> = Vec::new();
    let mut unknown_values = 0usize;

    for vocab in &table.fields {
        let values = categorical_values(df, &vocab.field)?;

        unknown_values += values
            .iter()
            .filter(|v| !matches!(v, Some(c) if vocab.categories.binary_search(c).is_ok()))
            .count();

        for category in &vocab.categories {
            let indicator: Vec<f64> = values
                .iter()
                .map(|v| if *v == Some(*category) { 1.0 } else { 0.0 })
                .collect();
            debug_assert_eq!(indicator.len(), height);
            columns.push(Column::new(
                format!("{}_{}", vocab.field, category).into(),
                indicator,
            ));
        }
    }

    let encoded = DataFrame::new(columns).context("Failed to assemble one-hot columns")?;
    Ok((encoded, unknown_values))
}
