//! End-to-end training run

use super::metrics::Evaluation;
use super::split::train_test_split;
use crate::balance::{balance, BalanceConfig, BalanceReport};
use crate::data::{Dataset, Record, ValidIds};
use crate::features::{feature_matrix, targets, FeatureVector};
use crate::io::ArtifactBundle;
use crate::model::{ForestParams, RandomForestRegressor, Regressor};
use crate::preprocess::StandardScaler;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Knobs for one training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub balance: BalanceConfig,

    /// Fraction of the balanced rows held out for evaluation
    pub test_size: f64,

    /// Seed for the train/test shuffle
    pub split_seed: u64,

    pub forest: ForestParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            balance: BalanceConfig::default(),
            test_size: 0.2,
            split_seed: 42,
            forest: ForestParams::default(),
        }
    }
}

/// Prediction for a synthetic high-demand input, used as a sanity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbePrediction {
    pub features: Vec<f64>,
    pub predicted_units: f64,
    pub predicted_demand_percentage: f64,
}

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub balance: BalanceReport,
    pub train_rows: usize,
    pub test_rows: usize,
    pub evaluation: Evaluation,
    pub max_demand: f64,
    pub n_store_ids: usize,
    pub n_sku_ids: usize,
    pub probe: Option<ProbePrediction>,
    pub duration_secs: f64,
}

/// Fitted artifacts plus the report describing how they were produced
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub bundle: ArtifactBundle,
    pub report: TrainingReport,
}

/// Train a forest on `dataset`.
///
/// `max_demand` and the valid identifier sets come from the full cleaned
/// dataset, before any resampling. The scaler sees only the training split.
pub fn run_training(dataset: &Dataset, config: &PipelineConfig) -> Result<TrainingOutcome> {
    let start = Instant::now();

    let max_demand = dataset.max_demand().ok_or_else(|| {
        Error::EmptyDataset("dataset has no usable rows after cleaning".to_string())
    })?;
    let valid_ids = dataset.valid_ids();
    if max_demand <= 0.0 {
        warn!(max_demand, "Maximum units_sold is not positive; demand percentages will be unavailable");
    }

    let (balanced, balance_report) = balance(&dataset.records, &config.balance)?;

    let split = train_test_split(balanced.len(), config.test_size, config.split_seed)?;
    let train: Vec<Record> = split.train.iter().map(|&i| balanced[i]).collect();
    let test: Vec<Record> = split.test.iter().map(|&i| balanced[i]).collect();
    debug!(train = train.len(), test = test.len(), "Split balanced records");

    let (scaler, x_train) = StandardScaler::fit_transform(&feature_matrix(&train))?;
    let y_train = targets(&train);

    info!(
        n_estimators = config.forest.n_estimators,
        max_depth = config.forest.tree.max_depth,
        rows = train.len(),
        "Fitting random forest"
    );
    let forest = RandomForestRegressor::fit(&x_train, &y_train, &config.forest)?;

    let x_test = scaler.transform(&feature_matrix(&test))?;
    let evaluation = Evaluation::compute(&forest.predict(&x_test), &targets(&test));
    info!(
        mse = evaluation.mse,
        mae = evaluation.mae,
        r2_percent = evaluation.r2_percent,
        "Evaluated on held-out split"
    );

    let probe = probe_prediction(&forest, &scaler, &valid_ids, max_demand)?;
    if let Some(probe) = &probe {
        info!(
            predicted_units = probe.predicted_units,
            predicted_demand_percentage = probe.predicted_demand_percentage,
            "Probe prediction for forced high-demand input"
        );
    }

    let report = TrainingReport {
        trained_at: Utc::now(),
        rows_loaded: dataset.len(),
        rows_dropped: dataset.dropped,
        balance: balance_report,
        train_rows: train.len(),
        test_rows: test.len(),
        evaluation,
        max_demand,
        n_store_ids: valid_ids.store_ids.len(),
        n_sku_ids: valid_ids.sku_ids.len(),
        probe,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    let bundle = ArtifactBundle {
        estimator: forest,
        scaler,
        max_demand,
        valid_ids,
        r2_score: evaluation.r2_percent,
    };

    Ok(TrainingOutcome { bundle, report })
}

/// Predict for the largest known store and SKU at a high price with both
/// merchandising flags set and `price_per_unit` fixed at 50.
///
/// Returns `None` when there are no identifiers to build the input from.
pub fn probe_prediction<M: Regressor>(
    model: &M,
    scaler: &StandardScaler,
    valid_ids: &ValidIds,
    max_demand: f64,
) -> Result<Option<ProbePrediction>> {
    let (Some(store), Some(sku)) = (valid_ids.max_store(), valid_ids.max_sku()) else {
        return Ok(None);
    };

    let features = FeatureVector::from_values([store as f64, sku as f64, 1000.0, 200.0, 1.0, 1.0, 50.0]);
    let scaled = scaler.transform_row(features.as_slice())?;
    let predicted_units = model.predict_row(&scaled.to_vec());
    let predicted_demand_percentage = if max_demand > 0.0 {
        predicted_units / max_demand * 100.0
    } else {
        0.0
    };

    Ok(Some(ProbePrediction {
        features: features.as_slice().to_vec(),
        predicted_units,
        predicted_demand_percentage,
    }))
}
