//! # Demanda: Retail Demand Forecasting
//!
//! Demanda predicts retail unit demand from pricing and merchandising
//! signals. An offline pipeline fits a random forest on historical sales and
//! writes a flat artifact bundle; the prediction service loads that bundle
//! once and answers requests with the same feature engineering.
//!
//! ## Architecture
//!
//! - **data**: CSV ingestion of historical sale records
//! - **features**: Feature schema, `price_per_unit` derivation, request validation
//! - **balance**: Upsampling of high-demand observations
//! - **preprocess**: Z-score scaling
//! - **model**: Regression trees and the random forest estimator
//! - **train**: Train/test split, metrics and the end-to-end pipeline
//! - **config**: Declarative YAML configuration and the CLI
//! - **io**: Artifact bundle saving and loading (JSON, YAML formats)
//! - **inference**: Frozen-artifact predictor
//! - **server**: HTTP prediction service

pub mod balance;
pub mod config;
pub mod data;
pub mod features;
pub mod inference;
pub mod io;
pub mod model;
pub mod preprocess;
pub mod server;
pub mod train;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use features::{FeatureVector, FEATURE_NAMES, N_FEATURES};
pub use inference::{PredictionResult, Predictor};
pub use io::ArtifactBundle;
