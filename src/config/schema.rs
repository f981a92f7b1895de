//! YAML schema definitions for declarative training configuration

use crate::io::ArtifactFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete training specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Input dataset
    pub data: DataConfig,

    /// Where and how artifacts are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Class balancing
    #[serde(default)]
    pub balance: BalanceSpec,

    /// Train/test split
    #[serde(default)]
    pub split: SplitSpec,

    /// Random forest hyperparameters
    #[serde(default)]
    pub forest: ForestSpec,

    /// Seed for resampling, splitting and tree bootstrapping
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file with historical sales
    pub path: PathBuf,
}

/// Artifact output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub format: ArtifactFormat,

    /// Pretty-print JSON artifacts
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: ArtifactFormat::default(),
            pretty: true,
        }
    }
}

/// Class balancing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSpec {
    /// `units_sold` above this is high demand
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Resampled high-demand rows per low-demand row
    #[serde(default = "default_factor")]
    pub factor: usize,
}

impl Default for BalanceSpec {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            factor: default_factor(),
        }
    }
}

/// Train/test split configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSpec {
    #[serde(default = "default_test_size")]
    pub test_size: f64,
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
        }
    }
}

/// Random forest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestSpec {
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,

    #[serde(default = "default_true")]
    pub bootstrap: bool,
}

impl Default for ForestSpec {
    fn default() -> Self {
        Self {
            n_estimators: default_n_estimators(),
            max_depth: default_max_depth(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            bootstrap: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./artifacts")
}

fn default_threshold() -> f64 {
    20.0
}

fn default_factor() -> usize {
    3
}

fn default_test_size() -> f64 {
    0.2
}

fn default_n_estimators() -> usize {
    300
}

fn default_max_depth() -> usize {
    30
}

fn default_min_samples_split() -> usize {
    2
}

fn default_min_samples_leaf() -> usize {
    1
}
