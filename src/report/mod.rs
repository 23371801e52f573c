//! Report module - training run summaries

pub mod summary;

pub use summary::TrainingSummary;
