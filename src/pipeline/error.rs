//! Error types for the training/inference pipeline.
//!
//! Structural problems (wrong columns, missing fields, non-binary target)
//! abort the call and surface to the caller. Per-row conditions such as
//! unknown categories or zero-range columns are absorbed by the stage that
//! encounters them and never appear here.

use thiserror::Error;

/// Errors that abort a fit or transform call.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The live input's columns differ from the manifest a stage was fit
    /// against. Order matters: a permuted column list is a mismatch.
    #[error(
        "column manifest mismatch at stage '{stage}': expected {expected} columns {expected_head:?}..., found {found} columns {found_head:?}..."
    )]
    SchemaMismatch {
        /// Stage whose manifest check failed (e.g. "scaler", "selector")
        stage: String,
        /// Number of columns the stage was fit against
        expected: usize,
        /// Number of columns presented
        found: usize,
        /// Leading expected column names, for diagnostics
        expected_head: Vec<String>,
        /// Leading presented column names, for diagnostics
        found_head: Vec<String>,
    },

    /// A required column or record field is absent.
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// The target column contains values other than 0 and 1.
    #[error("target column '{0}' must contain only binary 0/1 values")]
    NonBinaryTarget(String),

    /// The dataset has no rows to fit on.
    #[error("dataset is empty - nothing to fit")]
    EmptyDataset,
}
