//! Class balancing by upsampling high-demand observations
//!
//! Historical sales skew heavily toward low unit counts. Before fitting, the
//! high-demand class is resampled with replacement to a multiple of the
//! low-demand class and the combined set is shuffled with a fixed seed.


use crate::data::Record;
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Balancing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Observations with `units_sold` strictly above this are high demand
    pub threshold: f64,

    /// Resampled high-demand size as a multiple of the low-demand size
    pub factor: usize,

    /// Seed for resampling and shuffling
    pub seed: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            factor: 3,
            seed: 42,
        }
    }
}

/// Class sizes before and after balancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub low_demand: usize,
    pub high_demand: usize,
    pub high_resampled: usize,
    pub total: usize,
}

/// Split records into `(high_demand, low_demand)`
pub fn partition(records: &[Record], threshold: f64) -> (Vec<Record>, Vec<Record>) {
    records
        .iter()
        .copied()
        .partition(|r| r.is_high_demand(threshold))
}

/// Draw `n_samples` rows from `rows` with replacement
pub fn upsample<R: Rng>(rows: &[Record], n_samples: usize, rng: &mut R) -> Vec<Record> {
    if rows.is_empty() {
        return Vec::new();
    }
    (0..n_samples)
        .map(|_| rows[rng.random_range(0..rows.len())])
        .collect()
}

/// Rebalance `records` and shuffle the result deterministically.
///
/// When one class is empty there is nothing to rebalance against: the other
/// class is used unresampled and a warning is logged. An empty input is an
/// error.
pub fn balance(records: &[Record], config: &BalanceConfig) -> Result<(Vec<Record>, BalanceReport)> {
    let (high, low) = partition(records, config.threshold);

    let resampled = match (high.is_empty(), low.is_empty()) {
        (true, true) => {
            return Err(Error::EmptyDataset(
                "no records available for balancing".to_string(),
            ))
        }
        (false, true) => {
            warn!(
                high_demand = high.len(),
                "No low-demand records; using high-demand records unresampled"
            );
            high.clone()
        }
        (true, false) => {
            warn!(
                low_demand = low.len(),
                "No high-demand records; training on low-demand records only"
            );
            Vec::new()
        }
        (false, false) => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            upsample(&high, low.len() * config.factor, &mut rng)
        }
    };

    let report = BalanceReport {
        low_demand: low.len(),
        high_demand: high.len(),
        high_resampled: resampled.len(),
        total: low.len() + resampled.len(),
    };

    let mut combined = low;
    combined.extend(resampled);
    let mut rng = StdRng::seed_from_u64(config.seed);
    combined.shuffle(&mut rng);

    info!(
        low_demand = report.low_demand,
        high_demand = report.high_demand,
        high_resampled = report.high_resampled,
        total = report.total,
        "Balanced training records"
    );

    Ok((combined, report))
}
