//! Fit entry point: raw table + configuration -> frozen artifacts.

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::classify::{fit_classifier, predict_frame, ClassifierState};
use super::clean::{apply_cleaner, fit_cleaner, CleanerState};
use super::combine::combine_columns;
use super::encode::{encode, fit_encoder, EncodingTable};
use super::manifest::ColumnManifest;
use super::scale::{apply_scaler, fit_scaler, ScalerState};
use super::schema::{extract_target, validate_schema, DEFAULT_TARGET};
use super::select::{
    apply_selector, fit_selector, SelectorState, DEFAULT_MI_BINS, DEFAULT_NUM_FEATURES,
};
use super::split::{stratified_split, take_labels, take_rows};

/// Training configuration. Persisted into the artifact metadata so a run can
/// be reproduced exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Name of the binary label column
    pub target: String,
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
    /// Seed for the stratified split
    pub seed: u64,
    /// Number of features the selector keeps
    pub num_features: usize,
    /// Histogram bins for the mutual-information estimator
    pub mi_bins: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            test_fraction: 0.2,
            seed: 42,
            num_features: DEFAULT_NUM_FEATURES,
            mi_bins: DEFAULT_MI_BINS,
        }
    }
}

/// The complete set of frozen stage states one fit run produces.
#[derive(Debug, Clone)]
pub struct TrainedArtifacts {
    pub cleaner: CleanerState,
    pub encoder: EncodingTable,
    pub combined_manifest: ColumnManifest,
    pub scaler: ScalerState,
    pub selector: SelectorState,
    pub classifier: ClassifierState,
}

/// What happened during a fit run, for reporting.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub combined_features: usize,
    pub selected_features: usize,
    /// Fit-time values outside the frozen vocabularies (always 0 on the data
    /// the vocabularies were built from; present for symmetry with inference)
    pub unknown_categories: usize,
    /// Accuracy on the held-out split
    pub test_accuracy: f64,
}

/// Fit the full pipeline on a raw table.
///
/// Pure function of (table, config): validates the schema, fits each stage
/// in order on the data the previous stages produced, and evaluates the
/// classifier on the held-out split. Nothing is written to disk here; pass
/// the artifacts to an `ArtifactStore` to persist them.
pub fn fit_pipeline(df: &DataFrame, config: &TrainConfig) -> Result<(TrainedArtifacts, TrainReport)> {
    validate_schema(df)?;
    let labels = extract_target(df, &config.target)?;

    // Clean, encode, combine, scale on the full fit-time table
    let cleaner = fit_cleaner(df)?;
    let cleaned = apply_cleaner(df, &cleaner)?;

    let encoder = fit_encoder(&cleaned)?;
    let (encoded, unknown_categories) = encode(&cleaned, &encoder)?;

    let (combined, combined_manifest) = combine_columns(&cleaned, &encoded)?;

    let scaler = fit_scaler(&combined, &combined_manifest)?;
    let scaled = apply_scaler(&combined, &scaler)?;

    // Selector and classifier are fit on the training split only
    let split = stratified_split(&labels, config.test_fraction, config.seed)?;
    let train_frame = take_rows(&scaled, &split.train)?;
    let train_labels = take_labels(&labels, &split.train);

    let selector = fit_selector(
        &train_frame,
        &train_labels,
        &combined_manifest,
        config.num_features,
        config.mi_bins,
    )?;
    let selected_train = apply_selector(&train_frame, &selector)?;

    let classifier = fit_classifier(&selected_train, &train_labels)?;

    // Held-out evaluation
    let test_frame = take_rows(&scaled, &split.test)?;
    let test_labels = take_labels(&labels, &split.test);
    let selected_test = apply_selector(&test_frame, &selector)?;
    let predictions = predict_frame(&classifier, &selected_test)?;
    let correct = predictions
        .iter()
        .zip(test_labels.iter())
        .filter(|(p, &l)| p.label == l)
        .count();
    let test_accuracy = if test_labels.is_empty() {
        0.0
    } else {
        correct as f64 / test_labels.len() as f64
    };

    let report = TrainReport {
        rows: df.height(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        combined_features: combined_manifest.len(),
        selected_features: selector.selected.len(),
        unknown_categories,
        test_accuracy,
    };

    let artifacts = TrainedArtifacts {
        cleaner,
        encoder,
        combined_manifest,
        scaler,
        selector,
        classifier,
    };

    Ok((artifacts, report))
}
