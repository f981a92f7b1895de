//! Single-command training from YAML configuration

use super::builder::{build_pipeline_config, build_save_config};
use super::schema::TrainSpec;
use super::validate::validate_config;
use crate::data::load_dataset;
use crate::error::{Error, Result};
use crate::io::save_artifacts;
use crate::train::{run_training, TrainingReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a completed training run produced
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub report: TrainingReport,
    pub artifacts_dir: PathBuf,
    pub artifact_paths: Vec<PathBuf>,
}

/// Train from YAML configuration file
///
/// This is the main entry point for declarative training. It:
/// 1. Loads, parses and validates the YAML config
/// 2. Loads and cleans the CSV dataset
/// 3. Balances, splits, scales and fits the forest
/// 4. Saves the five artifacts
///
/// # Example
///
/// ```no_run
/// use demanda::config::train_from_yaml;
///
/// let summary = train_from_yaml("config.yaml")?;
/// println!("R² = {:.2}%", summary.report.evaluation.r2_percent);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainingSummary> {
    let spec = load_config(config_path)?;
    train_from_spec(&spec)
}

/// Run training for an already loaded and validated spec
pub fn train_from_spec(spec: &TrainSpec) -> Result<TrainingSummary> {
    info!(data = %spec.data.path.display(), "Loading dataset");
    let dataset = load_dataset(&spec.data.path)?;

    let outcome = run_training(&dataset, &build_pipeline_config(spec))?;
    let artifact_paths = save_artifacts(&outcome.bundle, &spec.output.dir, &build_save_config(spec))?;

    Ok(TrainingSummary {
        report: outcome.report,
        artifacts_dir: spec.output.dir.clone(),
        artifact_paths,
    })
}

/// Load training spec from YAML file (without running training)
///
/// Useful for testing config parsing and validation separately from training.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec = parse_config(&yaml_content)?;

    validate_config(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    Ok(spec)
}

/// Parse a spec from YAML text without validating it
pub fn parse_config(yaml: &str) -> Result<TrainSpec> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}
