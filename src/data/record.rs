//! Sale records and the identifier universe

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the training target column
pub const TARGET: &str = "units_sold";

/// One historical sale observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub store_id: i64,
    pub sku_id: i64,
    pub total_price: f64,
    pub base_price: f64,
    pub is_featured_sku: f64,
    pub is_display_sku: f64,
    pub units_sold: f64,
}

impl Record {
    /// Whether this observation falls in the high-demand class
    pub fn is_high_demand(&self, threshold: f64) -> bool {
        self.units_sold > threshold
    }
}

/// Store and SKU identifiers seen during training
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidIds {
    pub store_ids: BTreeSet<i64>,
    pub sku_ids: BTreeSet<i64>,
}

impl ValidIds {
    /// Collect every identifier present in `records`
    pub fn from_records(records: &[Record]) -> Self {
        let mut ids = Self::default();
        for record in records {
            ids.store_ids.insert(record.store_id);
            ids.sku_ids.insert(record.sku_id);
        }
        ids
    }

    /// Membership test for a numeric store identifier
    pub fn contains_store(&self, value: f64) -> bool {
        id_from_number(value).is_some_and(|id| self.store_ids.contains(&id))
    }

    /// Membership test for a numeric SKU identifier
    pub fn contains_sku(&self, value: f64) -> bool {
        id_from_number(value).is_some_and(|id| self.sku_ids.contains(&id))
    }

    pub fn max_store(&self) -> Option<i64> {
        self.store_ids.last().copied()
    }

    pub fn max_sku(&self) -> Option<i64> {
        self.sku_ids.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.store_ids.is_empty() || self.sku_ids.is_empty()
    }
}

/// Convert a JSON/CSV number to an identifier.
///
/// Only finite integral values inside the `i64` range qualify; `3.0` is the
/// identifier `3`, while `3.5` is no identifier at all.
pub fn id_from_number(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}
