//! Riskpipe: deterministic training pipeline for binary risk classification
//!
//! Turns a table of patient clinical measurements into a Gaussian Naive
//! Bayes risk classifier, persisting every fitted stage (cleaning
//! statistics, category tables, scaling bounds, feature selection, model
//! parameters) together with the exact column manifest it expects, so a
//! serving process can replay the pipeline on single records byte-for-byte.

pub mod artifacts;
pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
