//! Inference entry point: replay the frozen pipeline on one record.

use anyhow::Result;

use super::classify::{predict, Prediction};
use super::clean::apply_cleaner;
use super::combine::{combine_columns, live_columns};
use super::encode::encode;
use super::scale::apply_scaler;
use super::schema::Record;
use super::select::apply_selector;
use super::train::TrainedArtifacts;

/// Classify one raw record using only persisted state.
///
/// Replays cleaner -> encoder -> combiner -> scaler -> selector ->
/// classifier. Every manifest-bearing stage re-asserts its input columns, so
/// drift between the frozen artifacts and this code path surfaces as a
/// `SchemaMismatch` instead of a silently wrong prediction. Unknown
/// categories fall back to the all-zero one-hot row, as at fit time.
pub fn predict_record(artifacts: &TrainedArtifacts, record: &Record) -> Result<Prediction> {
    let raw = record.to_dataframe()?;

    let cleaned = apply_cleaner(&raw, &artifacts.cleaner)?;
    let (encoded, _unknown) = encode(&cleaned, &artifacts.encoder)?;
    let (combined, manifest) = combine_columns(&cleaned, &encoded)?;

    // The combiner's output must still be the layout everything downstream
    // was fit against.
    artifacts
        .combined_manifest
        .ensure_matches(&live_columns(&combined), "combiner")?;
    debug_assert_eq!(manifest, artifacts.combined_manifest);

    let scaled = apply_scaler(&combined, &artifacts.scaler)?;
    let selected = apply_selector(&scaled, &artifacts.selector)?;

    let row: Vec<f64> = selected
        .get_columns()
        .iter()
        .map(|column| Ok(column.f64()?.get(0).unwrap_or(0.0)))
        .collect::<Result<_>>()?;

    predict(&artifacts.classifier, &row)
}
