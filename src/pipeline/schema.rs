//! Fixed record schema for the heart-disease dataset.
//!
//! The pipeline is built for one fixed table shape: nine numeric fields,
//! four integer-coded categorical fields, and a binary target. Field order
//! here is load-bearing: numeric columns enter the combined matrix in the
//! order declared below, categorical fields are encoded in the order
//! declared below.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Numeric fields, in combined-matrix order.
pub const NUMERIC_FIELDS: [&str; 9] = [
    "age", "sex", "trestbps", "chol", "fbs", "thalach", "exang", "oldpeak", "ca",
];

/// Categorical fields, in encoding order.
pub const CATEGORICAL_FIELDS: [&str; 4] = ["cp", "restecg", "slope", "thal"];

/// Name of the binary label column expected at fit time.
pub const DEFAULT_TARGET: &str = "target";

/// One patient record as presented to the inference entry point.
///
/// Numeric fields may be absent; the cleaner fills them from its frozen
/// medians. Categorical fields are required: a record without them cannot
/// be encoded and is rejected before any stage runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub age: Option<f64>,
    pub sex: Option<f64>,
    pub cp: i64,
    pub trestbps: Option<f64>,
    pub chol: Option<f64>,
    pub fbs: Option<f64>,
    pub restecg: i64,
    pub thalach: Option<f64>,
    pub exang: Option<f64>,
    pub oldpeak: Option<f64>,
    pub slope: i64,
    pub ca: Option<f64>,
    pub thal: i64,
}

impl Record {
    /// Build a single-row DataFrame with the raw fit-time column layout so
    /// the record can flow through the same stage code as a full table.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let numeric: [(&str, Option<f64>); 9] = [
            ("age", self.age),
            ("sex", self.sex),
            ("trestbps", self.trestbps),
            ("chol", self.chol),
            ("fbs", self.fbs),
            ("thalach", self.thalach),
            ("exang", self.exang),
            ("oldpeak", self.oldpeak),
            ("ca", self.ca),
        ];
        let categorical: [(&str, i64); 4] = [
            ("cp", self.cp),
            ("restecg", self.restecg),
            ("slope", self.slope),
            ("thal", self.thal),
        ];

        let mut columns: Vec<Column> = Vec::with_capacity(13);
        for (name, value) in numeric {
            columns.push(Column::new(name.into(), vec![value]));
        }
        for (name, value) in categorical {
            columns.push(Column::new(name.into(), vec![value]));
        }

        DataFrame::new(columns).context("Failed to build single-record DataFrame")
    }
}

/// Check that every required feature column is present in `df`.
///
/// A missing column is fatal at fit time; extra columns (the target, sample
/// identifiers) are allowed and ignored by later stages.
pub fn validate_schema(df: &DataFrame) -> Result<(), PipelineError> {
    for field in NUMERIC_FIELDS.iter().chain(CATEGORICAL_FIELDS.iter()) {
        if df.column(field).is_err() {
            return Err(PipelineError::MissingRequiredField(field.to_string()));
        }
    }
    Ok(())
}

/// Extract the binary target column as 0/1 labels.
///
/// Nulls and values other than 0/1 are fatal: label mapping or multi-class
/// handling is out of scope for this pipeline.
pub fn extract_target(df: &DataFrame, target: &str) -> Result<Vec<i64>> {
    let column = df
        .column(target)
        .map_err(|_| PipelineError::MissingRequiredField(target.to_string()))?;

    let cast = column
        .cast(&DataType::Int64)
        .with_context(|| format!("Target column '{}' is not numeric", target))?;
    let ca = cast.i64()?;

    let mut labels = Vec::with_capacity(df.height());
    for value in ca.into_iter() {
        match value {
            Some(v @ (0 | 1)) => labels.push(v),
            _ => return Err(PipelineError::NonBinaryTarget(target.to_string()).into()),
        }
    }
    Ok(labels)
}
