//! Gaussian Naive Bayes over the selected feature subset.

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::combine::live_columns;
use super::error::PipelineError;

/// Variance floor; constant columns would otherwise produce a degenerate
/// density with zero variance.
const VAR_EPSILON: f64 = 1e-9;

/// Per-class Gaussian parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub label: i64,
    pub prior: f64,
    /// One mean per feature, in `feature_columns` order
    pub means: Vec<f64>,
    /// One variance per feature, floored above zero
    pub variances: Vec<f64>,
}

/// Fitted classifier parameters, immutable after fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierState {
    /// The selected columns the model was fit on, in selection order
    pub feature_columns: Vec<String>,
    /// One summary per class, ascending label order
    pub classes: Vec<ClassSummary>,
}

/// A predicted label with normalized class probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: i64,
    /// `probabilities[c]` is P(class = c | features); sums to 1
    pub probabilities: [f64; 2],
}

/// Fit priors, per-(feature, class) means and variances.
///
/// Variances are population variances (divide by class count) floored at a
/// small epsilon so constant columns keep a proper density.
pub fn fit_classifier(df: &DataFrame, labels: &[i64]) -> Result<ClassifierState> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset.into());
    }

    let feature_columns = live_columns(df);
    let rows = to_rows(df)?;
    let total = labels.len() as f64;

    let mut classes = Vec::with_capacity(2);
    for class in [0i64, 1] {
        let members: Vec<&Vec<f64>> = rows
            .iter()
            .zip(labels.iter())
            .filter(|(_, &l)| l == class)
            .map(|(row, _)| row)
            .collect();
        let count = members.len() as f64;
        let prior = count / total;

        let width = feature_columns.len();
        let mut means = vec![0.0; width];
        let mut variances = vec![VAR_EPSILON; width];

        if !members.is_empty() {
            for j in 0..width {
                let mean = members.iter().map(|row| row[j]).sum::<f64>() / count;
                let variance = members
                    .iter()
                    .map(|row| (row[j] - mean).powi(2))
                    .sum::<f64>()
                    / count;
                means[j] = mean;
                variances[j] = variance.max(VAR_EPSILON);
            }
        }

        classes.push(ClassSummary {
            label: class,
            prior,
            means,
            variances,
        });
    }

    Ok(ClassifierState {
        feature_columns,
        classes,
    })
}

/// Joint log-likelihood of a feature row under one class.
fn log_score(summary: &ClassSummary, row: &[f64]) -> f64 {
    let mut score = if summary.prior > 0.0 {
        summary.prior.ln()
    } else {
        f64::NEG_INFINITY
    };
    for ((&x, &mean), &variance) in row
        .iter()
        .zip(summary.means.iter())
        .zip(summary.variances.iter())
    {
        score += -0.5 * (2.0 * std::f64::consts::PI * variance).ln()
            - (x - mean).powi(2) / (2.0 * variance);
    }
    score
}

/// Predict the label and class probabilities for one feature row.
///
/// The row must carry exactly the features the model was fit on, in the
/// frozen selection order; a wrong width is a schema mismatch. Exact score
/// ties resolve to the lower class label.
pub fn predict(state: &ClassifierState, row: &[f64]) -> Result<Prediction> {
    if row.len() != state.feature_columns.len() {
        return Err(PipelineError::SchemaMismatch {
            stage: "classifier".to_string(),
            expected: state.feature_columns.len(),
            found: row.len(),
            expected_head: state.feature_columns.iter().take(5).cloned().collect(),
            found_head: Vec::new(),
        }
        .into());
    }

    let scores: Vec<f64> = state
        .classes
        .iter()
        .map(|summary| log_score(summary, row))
        .collect();

    // Classes are in ascending label order; strict > keeps the lower label
    // on exact ties.
    let mut best = 0usize;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }

    // Softmax over the log scores, shifted for stability
    let max_score = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let sum: f64 = exp.iter().sum();
    let probabilities = [exp[0] / sum, exp[1] / sum];

    Ok(Prediction {
        label: state.classes[best].label,
        probabilities,
    })
}

/// Predict labels for every row of a selected-feature DataFrame.
pub fn predict_frame(state: &ClassifierState, df: &DataFrame) -> Result<Vec<Prediction>> {
    let columns = live_columns(df);
    if columns != state.feature_columns {
        return Err(PipelineError::SchemaMismatch {
            stage: "classifier".to_string(),
            expected: state.feature_columns.len(),
            found: columns.len(),
            expected_head: state.feature_columns.iter().take(5).cloned().collect(),
            found_head: columns.iter().take(5).cloned().collect(),
        }
        .into());
    }

    to_rows(df)?
        .iter()
        .map(|row| predict(state, row))
        .collect()
}

/// Materialize a DataFrame of f64 columns as row vectors.
fn to_rows(df: &DataFrame) -> Result<Vec<Vec<f64>>> {
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        let ca = column.f64()?;
        for (i, value) in ca.into_iter().enumerate() {
            rows[i].push(value.unwrap_or(0.0));
        }
    }
    Ok(rows)
}
