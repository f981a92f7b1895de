//! Error types for Demanda

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Model error: {0}")]
    Model(#[from] crate::model::ModelError),

    #[error("Scaler error: {0}")]
    Scaler(#[from] crate::preprocess::ScalerError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] crate::io::ArtifactError),
}

pub type Result<T> = std::result::Result<T, Error>;
