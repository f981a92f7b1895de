//! Feature schema shared by training and inference
//!
//! The column order defined here is the order the scaler and the forest are
//! fit on. Both phases build vectors through [`FeatureVector`], so the order
//! cannot drift between them.
//!
//! # `price_per_unit`
//!
//! The derived feature is `total_price / (denominator + 1)`. Training divides
//! by `units_sold` (the target) while inference divides by `base_price`. The
//! two formulas are kept as-is so that artifacts reproduce the historical
//! model's numbers; the training formula leaks the target and is a known
//! defect of the feature definition.

mod validate;



pub use validate::{validate_request, RequestError, ValidatedRequest};

use crate::data::Record;
use ndarray::{Array1, Array2};

/// Raw request fields, in feature order
pub const RAW_FIELDS: [&str; 6] = [
    "store_id",
    "sku_id",
    "total_price",
    "base_price",
    "is_featured_sku",
    "is_display_sku",
];

/// Model input columns, in the order the scaler is fit on
pub const FEATURE_NAMES: [&str; 7] = [
    "store_id",
    "sku_id",
    "total_price",
    "base_price",
    "is_featured_sku",
    "is_display_sku",
    "price_per_unit",
];

pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// `total_price / (denominator + 1)`
pub fn price_per_unit(total_price: f64, denominator: f64) -> f64 {
    total_price / (denominator + 1.0)
}

/// One model-ready row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn from_values(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }

    /// Training-time transform: `price_per_unit` divides by `units_sold`
    pub fn for_training(record: &Record) -> Self {
        Self([
            record.store_id as f64,
            record.sku_id as f64,
            record.total_price,
            record.base_price,
            record.is_featured_sku,
            record.is_display_sku,
            price_per_unit(record.total_price, record.units_sold),
        ])
    }

    /// Inference-time transform: `price_per_unit` divides by `base_price`
    pub fn for_inference(request: &ValidatedRequest) -> Self {
        Self([
            request.store_id as f64,
            request.sku_id as f64,
            request.total_price,
            request.base_price,
            request.is_featured_sku,
            request.is_display_sku,
            price_per_unit(request.total_price, request.base_price),
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn price_per_unit(&self) -> f64 {
        self.0[N_FEATURES - 1]
    }

    /// Index of the first non-finite value, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.0.iter().position(|v| !v.is_finite())
    }
}

/// Training feature matrix, one row per record
pub fn feature_matrix(records: &[Record]) -> Array2<f64> {
    let mut x = Array2::zeros((records.len(), N_FEATURES));
    for (mut row, record) in x.rows_mut().into_iter().zip(records) {
        for (cell, value) in row
            .iter_mut()
            .zip(FeatureVector::for_training(record).as_slice())
        {
            *cell = *value;
        }
    }
    x
}

/// Training targets (`units_sold`)
pub fn targets(records: &[Record]) -> Array1<f64> {
    records.iter().map(|r| r.units_sold).collect()
}
