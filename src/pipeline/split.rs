//! Seeded stratified train/test split.

use anyhow::Result;
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use super::error::PipelineError;

/// Row indices of the two split halves, each sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices stratified by class, shuffled with a seeded RNG.
///
/// Each class pool is shuffled independently (class 0 first, then class 1)
/// and `round(pool_size * test_fraction)` rows go to the test half, so the
/// class balance of the full table is preserved on both sides. The same
/// (labels, fraction, seed) triple always produces the same split.
pub fn stratified_split(
    labels: &[i64],
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices> {
    if labels.is_empty() {
        return Err(PipelineError::EmptyDataset.into());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0i64, 1] {
        let mut pool: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();
        pool.shuffle(&mut rng);

        let test_count = (pool.len() as f64 * test_fraction).round() as usize;
        test.extend(pool.iter().take(test_count));
        train.extend(pool.iter().skip(test_count));
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(SplitIndices { train, test })
}

/// Project a DataFrame onto a sorted index list.
pub fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame> {
    let indices: IdxCa = IdxCa::from_vec(
        "rows".into(),
        rows.iter().map(|&i| i as IdxSize).collect(),
    );
    Ok(df.take(&indices)?)
}

/// Project a label vector onto a sorted index list.
pub fn take_labels(labels: &[i64], rows: &[usize]) -> Vec<i64> {
    rows.iter().map(|&i| labels[i]).collect()
}
