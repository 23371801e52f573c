//! Riskpipe CLI
//!
//! `train` fits the full pipeline on a CSV table and persists one artifact
//! generation; `predict` replays the frozen pipeline on a single JSON
//! record.

mod artifacts;
mod cli;
mod pipeline;
mod report;
mod utils;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use artifacts::ArtifactStore;
use cli::{Cli, Commands};
use pipeline::{fit_pipeline, load_dataset, load_record, predict_record, TrainConfig};
use report::TrainingSummary;
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_info,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            input,
            artifacts,
            target,
            num_features,
            test_fraction,
            seed,
            mi_bins,
        } => {
            let config = TrainConfig {
                target,
                test_fraction,
                seed,
                num_features,
                mi_bins,
            };
            run_train(&input, &artifacts, &config)
        }
        Commands::Predict { artifacts, record } => run_predict(&artifacts, &record),
    }
}

fn run_train(input: &Path, artifact_dir: &Path, config: &TrainConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let df = load_dataset(input)?;
    let (rows, cols) = df.shape();
    print_success("Dataset loaded");
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    print_step_time(step_start.elapsed());

    // Step 2: Fit the pipeline end to end
    print_step_header(2, "Fit Pipeline");
    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning, encoding, scaling, ranking features...");
    let (trained, train_report) = fit_pipeline(&df, config)?;
    finish_with_success(&spinner, "Pipeline fit complete");
    if train_report.unknown_categories > 0 {
        print_info(&format!(
            "{} categorical value(s) fell outside the frozen vocabularies",
            train_report.unknown_categories
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 3: Persist artifacts
    print_step_header(3, "Persist Artifacts");
    let step_start = Instant::now();
    let store = ArtifactStore::new(artifact_dir);
    store.save(&trained, config)?;
    print_success(&format!("Artifacts written to {}", store.dir().display()));
    print_step_time(step_start.elapsed());

    let summary = TrainingSummary::new(train_report, &trained.selector.ranking);
    summary.display();

    print_completion();
    Ok(())
}

fn run_predict(artifact_dir: &Path, record_path: &Path) -> Result<()> {
    let store = ArtifactStore::new(artifact_dir);
    let trained = store.load()?;
    let record = load_record(record_path)?;

    let prediction = predict_record(&trained, &record)?;

    let label_text = if prediction.label == 1 {
        style("at risk (1)").red().bold()
    } else {
        style("not at risk (0)").green().bold()
    };
    println!("    Prediction: {}", label_text);
    println!(
        "    Probabilities: class 0 = {:.4}, class 1 = {:.4}",
        prediction.probabilities[0], prediction.probabilities[1]
    );
    Ok(())
}
