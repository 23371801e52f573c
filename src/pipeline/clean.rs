//! Missing-value imputation and IQR outlier clamping.
//!
//! Statistics are computed once at fit time and frozen, so a single record
//! at inference is cleaned with the same medians and bounds the training
//! table was cleaned with.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use super::schema::NUMERIC_FIELDS;

/// IQR multiplier for the outlier bounds
const IQR_FACTOR: f64 = 1.5;

/// Frozen per-column cleaning statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Median of the non-null fit-time values, used to fill missing entries
    pub median: f64,
    /// Lower clamp bound: Q1 - 1.5 * IQR
    pub lower: f64,
    /// Upper clamp bound: Q3 + 1.5 * IQR
    pub upper: f64,
}

/// Cleaning state for every numeric column, in declared column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerState {
    pub columns: Vec<(String, ColumnStats)>,
}

/// Linear-interpolated quantile over an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let fraction = position - low as f64;
        sorted[low] + (sorted[high] - sorted[low]) * fraction
    }
}

/// Non-null values of a numeric column as f64.
fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::MissingRequiredField(name.to_string()))?;
    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    Ok(cast.f64()?.into_iter().flatten().collect())
}

/// Compute medians and IQR clamp bounds for every numeric column.
///
/// Quantiles are taken over the imputed column (nulls replaced with the
/// median first), matching the fill-then-clamp order of the transform.
pub fn fit_cleaner(df: &DataFrame) -> Result<CleanerState> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset.into());
    }

    let mut columns = Vec::with_capacity(NUMERIC_FIELDS.len());
    for name in NUMERIC_FIELDS {
        let mut values = column_values(df, name)?;
        if values.is_empty() {
            return Err(PipelineError::MissingRequiredField(name.to_string()).into());
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = quantile(&values, 0.5);

        // Quantiles over the imputed column: nulls became the median, so
        // pad the sorted values accordingly before taking Q1/Q3.
        let null_count = df.height() - values.len();
        let stats = if null_count > 0 {
            let mut imputed = values;
            imputed.extend(std::iter::repeat(median).take(null_count));
            imputed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            bounds_from(&imputed, median)
        } else {
            bounds_from(&values, median)
        };

        columns.push((name.to_string(), stats));
    }

    Ok(CleanerState { columns })
}

fn bounds_from(sorted: &[f64], median: f64) -> ColumnStats {
    let q1 = quantile(sorted, 0.25);
    let q3 = quantile(sorted, 0.75);
    let iqr = q3 - q1;
    ColumnStats {
        median,
        lower: q1 - IQR_FACTOR * iqr,
        upper: q3 + IQR_FACTOR * iqr,
    }
}

/// Fill nulls with the frozen median, then clamp to the frozen bounds.
///
/// Non-numeric (categorical) columns pass through untouched. Values outside
/// the bounds are pinned to the bound, never dropped; an IQR of zero pins
/// the whole column to Q1.
pub fn apply_cleaner(df: &DataFrame, state: &CleanerState) -> Result<DataFrame> {
    let mut cleaned = df.clone();
    for (name, stats) in &state.columns {
        let column = cleaned
            .column(name)
            .map_err(|_| PipelineError::MissingRequiredField(name.clone()))?;
        let cast = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;

        let clamped: Vec<f64> = cast
            .f64()?
            .into_iter()
            .map(|value| {
                value
                    .unwrap_or(stats.median)
                    .clamp(stats.lower, stats.upper)
            })
            .collect();

        cleaned.replace(name, Series::new(name.as_str().into(), clamped))?;
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&values, 0.0) - 1.0).abs() < 1e-12);
        assert!((quantile(&values, 1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_iqr_pins_column_to_constant() {
        let stats = bounds_from(&[7.0, 7.0, 7.0, 7.0], 7.0);
        assert_eq!(stats.lower, 7.0);
        assert_eq!(stats.upper, 7.0);
        assert_eq!(3.0f64.clamp(stats.lower, stats.upper), 7.0);
        assert_eq!(11.0f64.clamp(stats.lower, stats.upper), 7.0);
    }
}
