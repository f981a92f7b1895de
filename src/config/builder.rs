//! Build training components from configuration

use super::schema::{ForestSpec, TrainSpec};
use crate::balance::BalanceConfig;
use crate::io::SaveConfig;
use crate::model::{ForestParams, TreeParams};
use crate::train::PipelineConfig;

/// Build forest hyperparameters; the top-level seed drives bootstrapping
pub fn build_forest_params(spec: &ForestSpec, seed: u64) -> ForestParams {
    ForestParams {
        n_estimators: spec.n_estimators,
        tree: TreeParams {
            max_depth: spec.max_depth,
            min_samples_split: spec.min_samples_split,
            min_samples_leaf: spec.min_samples_leaf,
        },
        bootstrap: spec.bootstrap,
        seed,
    }
}

/// Build the full pipeline configuration.
///
/// One seed drives resampling, shuffling, splitting and bootstrapping.
pub fn build_pipeline_config(spec: &TrainSpec) -> PipelineConfig {
    PipelineConfig {
        balance: BalanceConfig {
            threshold: spec.balance.threshold,
            factor: spec.balance.factor,
            seed: spec.seed,
        },
        test_size: spec.split.test_size,
        split_seed: spec.seed,
        forest: build_forest_params(&spec.forest, spec.seed),
    }
}

pub fn build_save_config(spec: &TrainSpec) -> SaveConfig {
    SaveConfig::new(spec.output.format).with_pretty(spec.output.pretty)
}
