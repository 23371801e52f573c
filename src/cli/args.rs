//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Riskpipe - train and serve a deterministic heart-disease risk classifier
#[derive(Parser, Debug)]
#[command(name = "riskpipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the full pipeline on a CSV table and persist the artifacts
    Train {
        /// Input CSV file with the fixed record schema plus a target column
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the artifact files into
        #[arg(short = 'o', long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Name of the binary target column
        #[arg(short, long, default_value = "target")]
        target: String,

        /// Number of features the selector keeps
        #[arg(long, default_value = "10")]
        num_features: usize,

        /// Fraction of rows held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_fraction: f64,

        /// Seed for the stratified train/test split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Histogram bins for the mutual-information estimator
        #[arg(long, default_value = "10")]
        mi_bins: usize,
    },

    /// Classify one record (JSON file) using previously persisted artifacts
    Predict {
        /// Directory holding the artifact files from a train run
        #[arg(short, long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// JSON file with a single patient record
        #[arg(short, long)]
        record: PathBuf,
    },
}
