//! Min-max scaling with frozen per-column bounds.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::combine::live_columns;
use super::manifest::ColumnManifest;

/// Frozen (min, max) for one combined column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRange {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

/// Scaling state: per-column bounds plus the manifest they were fit against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerState {
    pub manifest: ColumnManifest,
    /// One entry per manifest column, same order
    pub ranges: Vec<ColumnRange>,
}

/// Record min and max of every column over the fit-time rows.
pub fn fit_scaler(df: &DataFrame, manifest: &ColumnManifest) -> Result<ScalerState> {
    manifest.ensure_matches(&live_columns(df), "scaler-fit")?;

    let mut ranges = Vec::with_capacity(manifest.len());
    for name in manifest.columns() {
        let ca = df.column(name)?.f64()?.clone();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in ca.into_iter().flatten() {
            min = min.min(value);
            max = max.max(value);
        }
        ranges.push(ColumnRange {
            column: name.clone(),
            min,
            max,
        });
    }

    Ok(ScalerState {
        manifest: manifest.clone(),
        ranges,
    })
}

/// Apply `(x - min) / (max - min)` per column after enforcing the manifest.
///
/// A zero-range column maps to 0.0 everywhere. Inputs outside the fit-time
/// range are NOT clamped: inference values may land outside [0, 1], and the
/// downstream Gaussian densities accept that. Keep it that way.
pub fn apply_scaler(df: &DataFrame, state: &ScalerState) -> Result<DataFrame> {
    state.manifest.ensure_matches(&live_columns(df), "scaler")?;

    let mut columns: Vec<Column> = Vec::with_capacity(state.ranges.len());
    for range in &state.ranges {
        let ca = df.column(&range.column)?.f64()?.clone();
        let span = range.max - range.min;
        let scaled: Vec<f64> = ca
            .into_iter()
            .map(|value| {
                let value = value.unwrap_or(range.min);
                if span == 0.0 {
                    0.0
                } else {
                    (value - range.min) / span
                }
            })
            .collect();
        columns.push(Column::new(range.column.as_str().into(), scaled));
    }

    DataFrame::new(columns).context("Failed to assemble scaled columns")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> (DataFrame, ScalerState) {
        let df = df! {
            "a" => [0.0, 5.0, 10.0],
            "b" => [3.0, 3.0, 3.0],
        }
        .unwrap();
        let manifest = ColumnManifest::new(["a", "b"]);
        let state = fit_scaler(&df, &manifest).unwrap();
        (df, state)
    }

    #[test]
    fn fit_data_scales_into_unit_interval() {
        let (df, state) = fitted();
        let scaled = apply_scaler(&df, &state).unwrap();
        let a: Vec<f64> = scaled.column("a").unwrap().f64().unwrap().into_iter().flatten().collect();
        assert_eq!(a, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn zero_range_column_maps_to_zero() {
        let (df, state) = fitted();
        let scaled = apply_scaler(&df, &state).unwrap();
        let b: Vec<f64> = scaled.column("b").unwrap().f64().unwrap().into_iter().flatten().collect();
        assert_eq!(b, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_range_inputs_are_not_clamped() {
        let (_, state) = fitted();
        let wide = df! {
            "a" => [20.0, -10.0],
            "b" => [3.0, 3.0],
        }
        .unwrap();
        let scaled = apply_scaler(&wide, &state).unwrap();
        let a: Vec<f64> = scaled.column("a").unwrap().f64().unwrap().into_iter().flatten().collect();
        assert_eq!(a, vec![2.0, -1.0]);
    }

    #[test]
    fn permuted_columns_are_rejected_before_scaling() {
        let (_, state) = fitted();
        let permuted = df! {
            "b" => [3.0],
            "a" => [1.0],
        }
        .unwrap();
        assert!(apply_scaler(&permuted, &state).is_err());
    }
}
