//! Offline training pipeline
//!
//! This module turns a cleaned [`Dataset`](crate::data::Dataset) into an
//! [`ArtifactBundle`](crate::io::ArtifactBundle):
//! - Class balancing (see [`crate::balance`])
//! - Seeded train/test split
//! - Scaler fit on the training split only
//! - Random forest fit and held-out evaluation
//! - Probe prediction for a forced high-demand input
//!
//! # Example
//!
//! ```no_run
//! use demanda::data::load_dataset;
//! use demanda::train::{run_training, PipelineConfig};
//!
//! let dataset = load_dataset("sales.csv").unwrap();
//! let outcome = run_training(&dataset, &PipelineConfig::default()).unwrap();
//! println!("R² = {:.2}%", outcome.report.evaluation.r2_percent);
//! ```

mod metrics;
mod pipeline;
mod split;


pub use metrics::{Evaluation, Metric, R2Score, MAE, MSE, RMSE};
pub use pipeline::{
    probe_prediction, run_training, PipelineConfig, ProbePrediction, TrainingOutcome,
    TrainingReport,
};
pub use split::{train_test_split, SplitIndices};
