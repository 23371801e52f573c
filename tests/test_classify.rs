//! Integration tests for the Gaussian Naive Bayes classifier

use polars::prelude::*;
use riskpipe::pipeline::{fit_classifier, predict, predict_frame};

#[path = "common/mod.rs"]
mod common;

fn separable_fixture() -> (DataFrame, Vec<i64>) {
    let labels: Vec<i64> = (0..40).map(|i| i % 2).collect();
    let f1: Vec<f64> = labels
        .iter()
        .enumerate()
        .map(|(i, &l)| l as f64 * 0.8 + (i % 4) as f64 * 0.02)
        .collect();
    let f2: Vec<f64> = labels
        .iter()
        .enumerate()
        .map(|(i, &l)| (1 - l) as f64 * 0.7 + (i % 3) as f64 * 0.03)
        .collect();
    let df = df! { "f1" => f1, "f2" => f2 }.unwrap();
    (df, labels)
}

#[test]
fn priors_reflect_class_frequencies() {
    let df = df! { "f1" => [0.0, 0.1, 0.2, 0.9] }.unwrap();
    let state = fit_classifier(&df, &[0, 0, 0, 1]).unwrap();
    assert!((state.classes[0].prior - 0.75).abs() < 1e-12);
    assert!((state.classes[1].prior - 0.25).abs() < 1e-12);
}

#[test]
fn fitting_twice_yields_identical_parameters() {
    let (df, labels) = separable_fixture();
    let a = fit_classifier(&df, &labels).unwrap();
    let b = fit_classifier(&df, &labels).unwrap();

    for (ca, cb) in a.classes.iter().zip(b.classes.iter()) {
        assert_eq!(ca.prior.to_bits(), cb.prior.to_bits());
        for (ma, mb) in ca.means.iter().zip(cb.means.iter()) {
            assert_eq!(ma.to_bits(), mb.to_bits());
        }
        for (va, vb) in ca.variances.iter().zip(cb.variances.iter()) {
            assert_eq!(va.to_bits(), vb.to_bits());
        }
    }
}

#[test]
fn separable_classes_are_recovered_on_the_fit_data() {
    let (df, labels) = separable_fixture();
    let state = fit_classifier(&df, &labels).unwrap();
    let predictions = predict_frame(&state, &df).unwrap();

    let correct = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(p, &l)| p.label == l)
        .count();
    assert_eq!(correct, labels.len(), "fit data should be fully separable");
}

#[test]
fn probabilities_are_normalized() {
    let (df, labels) = separable_fixture();
    let state = fit_classifier(&df, &labels).unwrap();

    let p = predict(&state, &[0.4, 0.35]).unwrap();
    assert!((p.probabilities[0] + p.probabilities[1] - 1.0).abs() < 1e-12);
    assert!(p.probabilities.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn out_of_range_inputs_still_produce_a_prediction() {
    // Unclamped scaling can hand the classifier values outside [0, 1]
    let (df, labels) = separable_fixture();
    let state = fit_classifier(&df, &labels).unwrap();

    let p = predict(&state, &[3.5, -2.0]).unwrap();
    assert!(p.probabilities[0].is_finite() && p.probabilities[1].is_finite());
}
