//! Inference-time request validation

use super::RAW_FIELDS;
use crate::data::{id_from_number, ValidIds};
use serde_json::Value;
use thiserror::Error;

/// Client-side validation failures. Messages are returned to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("Invalid or missing value for: {0}")]
    InvalidField(&'static str),

    #[error("Invalid Store ID.")]
    UnknownStore,

    #[error("Invalid SKU ID.")]
    UnknownSku,

    #[error("'Featured SKU' must be 0 or 1.")]
    InvalidFeaturedFlag,

    #[error("'Display SKU' must be 0 or 1.")]
    InvalidDisplayFlag,
}

/// A request that passed every check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedRequest {
    pub store_id: i64,
    pub sku_id: i64,
    pub total_price: f64,
    pub base_price: f64,
    pub is_featured_sku: f64,
    pub is_display_sku: f64,
}

fn is_binary(value: f64) -> bool {
    value == 0.0 || value == 1.0
}

/// Validate a JSON request against the feature schema and the trained
/// identifier universe.
///
/// Checks run in a fixed order and stop at the first failure: every raw field
/// present and numeric, store known, SKU known, featured flag binary, display
/// flag binary.
pub fn validate_request(payload: &Value, ids: &ValidIds) -> Result<ValidatedRequest, RequestError> {
    let object = payload.as_object().ok_or(RequestError::NotAnObject)?;

    let mut values = [0.0; RAW_FIELDS.len()];
    for (slot, field) in values.iter_mut().zip(RAW_FIELDS) {
        *slot = object
            .get(field)
            .and_then(Value::as_f64)
            .ok_or(RequestError::InvalidField(field))?;
    }
    let [store, sku, total_price, base_price, featured, display] = values;

    let store_id = id_from_number(store)
        .filter(|_| ids.contains_store(store))
        .ok_or(RequestError::UnknownStore)?;
    let sku_id = id_from_number(sku)
        .filter(|_| ids.contains_sku(sku))
        .ok_or(RequestError::UnknownSku)?;

    if !is_binary(featured) {
        return Err(RequestError::InvalidFeaturedFlag);
    }
    if !is_binary(display) {
        return Err(RequestError::InvalidDisplayFlag);
    }

    Ok(ValidatedRequest {
        store_id,
        sku_id,
        total_price,
        base_price,
        is_featured_sku: featured,
        is_display_sku: display,
    })
}
