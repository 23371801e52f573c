//! Mutual-information feature ranking and top-k selection.
//!
//! Scores use a deterministic equal-width histogram estimator: each column
//! is discretized into a fixed number of bins over its observed range and
//! MI is computed from the joint (bin, label) counts with natural log.
//! One-hot columns collapse to two occupied bins, so the estimator handles
//! numeric and indicator columns uniformly.

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::combine::live_columns;
use super::error::PipelineError;
use super::manifest::ColumnManifest;

/// Default number of histogram bins for MI estimation
pub const DEFAULT_MI_BINS: usize = 10;

/// Default number of selected features
pub const DEFAULT_NUM_FEATURES: usize = 10;

/// One column's mutual-information score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScore {
    pub column: String,
    pub score: f64,
}

/// Frozen ranking and selection.
///
/// `ranking` is diagnostic: every input column, descending by score, ties
/// broken by original column position. `selected`/`selected_indices` are the
/// top-k columns kept in input-manifest order; that order is what the
/// classifier is fit on and must be replayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorState {
    pub manifest: ColumnManifest,
    pub ranking: Vec<FeatureScore>,
    pub selected: Vec<String>,
    pub selected_indices: Vec<usize>,
}

/// Mutual information between a column and binary labels, in nats.
///
/// A zero-range column carries no information and scores 0 rather than
/// erroring. Never negative (up to floating point rounding).
pub fn mutual_information(values: &[f64], labels: &[i64], bins: usize) -> f64 {
    debug_assert_eq!(values.len(), labels.len());
    let n = values.len();
    if n == 0 || bins == 0 {
        return 0.0;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }

    // joint[bin][class] counts
    let mut joint = vec![[0usize; 2]; bins];
    for (&value, &label) in values.iter().zip(labels.iter()) {
        let bin = (((value - min) / span) * bins as f64) as usize;
        let bin = bin.min(bins - 1);
        joint[bin][label as usize] += 1;
    }

    let class_totals = [
        labels.iter().filter(|&&l| l == 0).count(),
        labels.iter().filter(|&&l| l == 1).count(),
    ];

    let total = n as f64;
    let mut mi = 0.0;
    for row in &joint {
        let bin_total = row[0] + row[1];
        if bin_total == 0 {
            continue;
        }
        for class in 0..2 {
            let count = row[class];
            if count == 0 || class_totals[class] == 0 {
                continue;
            }
            let p_joint = count as f64 / total;
            let p_bin = bin_total as f64 / total;
            let p_class = class_totals[class] as f64 / total;
            mi += p_joint * (p_joint / (p_bin * p_class)).ln();
        }
    }
    mi.max(0.0)
}

/// Score every column against the target and freeze the top-k subset.
pub fn fit_selector(
    df: &DataFrame,
    labels: &[i64],
    manifest: &ColumnManifest,
    num_features: usize,
    bins: usize,
) -> Result<SelectorState> {
    manifest.ensure_matches(&live_columns(df), "selector-fit")?;
    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset.into());
    }

    // Extract once, score in parallel; scores land at their column index so
    // rayon's scheduling never affects the ranking.
    let column_values: Vec<Vec<f64>> = manifest
        .columns()
        .iter()
        .map(|name| {
            Ok(df
                .column(name)?
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect())
        })
        .collect::<Result<_>>()?;

    let scores: Vec<f64> = column_values
        .par_iter()
        .map(|values| mutual_information(values, labels, bins))
        .collect();

    let mut order: Vec<usize> = (0..manifest.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let ranking: Vec<FeatureScore> = order
        .iter()
        .map(|&i| FeatureScore {
            column: manifest.columns()[i].clone(),
            score: scores[i],
        })
        .collect();

    // Top-k by score, then back to input-column order for the projection
    let mut selected_indices: Vec<usize> =
        order.iter().take(num_features.min(manifest.len())).copied().collect();
    selected_indices.sort_unstable();
    let selected = selected_indices
        .iter()
        .map(|&i| manifest.columns()[i].clone())
        .collect();

    Ok(SelectorState {
        manifest: manifest.clone(),
        ranking,
        selected,
        selected_indices,
    })
}

/// Project onto the frozen selected columns after enforcing the manifest.
pub fn apply_selector(df: &DataFrame, state: &SelectorState) -> Result<DataFrame> {
    state.manifest.ensure_matches(&live_columns(df), "selector")?;
    df.select(state.selected.iter().map(|s| s.as_str()))
        .context("Failed to project onto selected columns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_informative_column_outranks_noise() {
        let labels: Vec<i64> = (0..40).map(|i| i % 2).collect();
        let informative: Vec<f64> = labels.iter().map(|&l| l as f64).collect();
        let constant = vec![0.5; 40];

        let hi = mutual_information(&informative, &labels, 10);
        let lo = mutual_information(&constant, &labels, 10);
        assert!(hi > 0.6, "expected ~ln(2), got {hi}");
        assert_eq!(lo, 0.0);
    }

    #[test]
    fn independent_column_scores_near_zero() {
        let labels: Vec<i64> = (0..40).map(|i| i % 2).collect();
        // Same value distribution in both classes
        let values: Vec<f64> = (0..40).map(|i| (i / 2) as f64).collect();
        let mi = mutual_information(&values, &labels, 4);
        assert!(mi < 0.05, "expected near-zero MI, got {mi}");
    }
}
