//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Generate a synthetic heart-disease table with the fixed record schema.
///
/// Values follow the ranges of the UCI heart-disease fields. The target is
/// correlated with `thalach` and `oldpeak` so feature selection and the
/// classifier have real signal to find. Deterministic for a given seed.
pub fn heart_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut age = Vec::with_capacity(rows);
    let mut sex = Vec::with_capacity(rows);
    let mut cp = Vec::with_capacity(rows);
    let mut trestbps = Vec::with_capacity(rows);
    let mut chol = Vec::with_capacity(rows);
    let mut fbs = Vec::with_capacity(rows);
    let mut restecg = Vec::with_capacity(rows);
    let mut thalach = Vec::with_capacity(rows);
    let mut exang = Vec::with_capacity(rows);
    let mut oldpeak = Vec::with_capacity(rows);
    let mut slope = Vec::with_capacity(rows);
    let mut ca = Vec::with_capacity(rows);
    let mut thal = Vec::with_capacity(rows);
    let mut target = Vec::with_capacity(rows);

    for _ in 0..rows {
        let heart_rate: f64 = rng.gen_range(71.0..202.0);
        let st_depression: f64 = rng.gen_range(0.0..6.2);
        // Low peak heart rate and high ST depression push towards class 1
        let label = i64::from(heart_rate < 140.0 || st_depression > 4.0);

        age.push(rng.gen_range(29i64..77) as f64);
        sex.push(rng.gen_range(0i64..2) as f64);
        cp.push(rng.gen_range(0i64..4));
        trestbps.push(rng.gen_range(90.0f64..200.0));
        chol.push(rng.gen_range(120.0f64..564.0));
        fbs.push(rng.gen_range(0i64..2) as f64);
        restecg.push(rng.gen_range(0i64..3));
        thalach.push(heart_rate);
        exang.push(rng.gen_range(0i64..2) as f64);
        oldpeak.push(st_depression);
        slope.push(rng.gen_range(0i64..3));
        ca.push(rng.gen_range(0i64..4) as f64);
        thal.push(rng.gen_range(0i64..3));
        target.push(label);
    }

    df! {
        "age" => age,
        "sex" => sex,
        "cp" => cp,
        "trestbps" => trestbps,
        "chol" => chol,
        "fbs" => fbs,
        "restecg" => restecg,
        "thalach" => thalach,
        "exang" => exang,
        "oldpeak" => oldpeak,
        "slope" => slope,
        "ca" => ca,
        "thal" => thal,
        "target" => target,
    }
    .unwrap()
}

/// The same table with some `chol` and `trestbps` entries nulled out, to
/// exercise median imputation.
pub fn heart_dataframe_with_missing(rows: usize, seed: u64) -> DataFrame {
    let mut df = heart_dataframe(rows, seed);
    for column in ["chol", "trestbps"] {
        let values: Vec<Option<f64>> = df
            .column(column)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(i, v)| if i % 10 == 3 { None } else { v })
            .collect();
        df.replace(column, Series::new(column.into(), values)).unwrap();
    }
    df
}

/// Write a DataFrame to a temp CSV, returning the handle and the path.
pub fn write_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    (dir, path)
}
