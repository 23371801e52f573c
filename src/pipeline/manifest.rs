//! Ordered column manifests.
//!
//! Every fitted stage records the exact column sequence it was fit against.
//! At transform time the live input is checked against that sequence before
//! any computation happens; a permuted, missing, or extra column is a fatal
//! `SchemaMismatch`, never silently reordered.

use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// How many column names to include in mismatch diagnostics
const DIAGNOSTIC_HEAD: usize = 5;

/// An ordered, frozen sequence of column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnManifest {
    columns: Vec<String>,
}

impl ColumnManifest {
    /// Freeze an ordered column sequence. Duplicates are dropped keeping the
    /// first occurrence, preserving order.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = std::collections::HashSet::new();
        let columns = columns
            .into_iter()
            .map(Into::into)
            .filter(|c| seen.insert(c.clone()))
            .collect();
        Self { columns }
    }

    /// The frozen column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in the manifest, if present.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Assert that `actual` equals this manifest exactly (names and order).
    ///
    /// Returns `SchemaMismatch` naming `stage` on any difference. Called at
    /// the top of every transform before touching any data.
    pub fn ensure_matches(&self, actual: &[String], stage: &str) -> Result<(), PipelineError> {
        if self.columns == actual {
            return Ok(());
        }

        // Report from the first divergence so long manifests stay readable
        let first_diff = self
            .columns
            .iter()
            .zip(actual.iter())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| self.columns.len().min(actual.len()));

        let head = |cols: &[String]| -> Vec<String> {
            cols.iter()
                .skip(first_diff.saturating_sub(1))
                .take(DIAGNOSTIC_HEAD)
                .cloned()
                .collect()
        };

        Err(PipelineError::SchemaMismatch {
            stage: stage.to_string(),
            expected: self.columns.len(),
            found: actual.len(),
            expected_head: head(&self.columns),
            found_head: head(actual),
        })
    }
}
