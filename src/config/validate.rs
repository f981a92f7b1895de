//! Configuration validation

use super::schema::TrainSpec;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path does not exist: {0}")]
    DataPathNotFound(String),

    #[error("Invalid test size: {0} (must be in (0, 1))")]
    InvalidTestSize(f64),

    #[error("Invalid demand threshold: {0} (must be finite)")]
    InvalidThreshold(f64),

    #[error("Invalid resampling factor: {0} (must be > 0)")]
    InvalidFactor(usize),

    #[error("Invalid n_estimators: {0} (must be > 0)")]
    InvalidEstimators(usize),

    #[error("Invalid max_depth: {0} (must be > 0)")]
    InvalidMaxDepth(usize),

    #[error("Invalid min_samples_split: {0} (must be >= 2)")]
    InvalidMinSamplesSplit(usize),

    #[error("Invalid min_samples_leaf: {0} (must be >= 1)")]
    InvalidMinSamplesLeaf(usize),
}

/// Validate a training specification
///
/// Checks:
/// - The data path exists
/// - Numeric values are in valid ranges
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    // Skip in tests where files may not exist
    #[cfg(not(test))]
    if !spec.data.path.exists() {
        return Err(ValidationError::DataPathNotFound(
            spec.data.path.display().to_string(),
        ));
    }

    let test_size = spec.split.test_size;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ValidationError::InvalidTestSize(test_size));
    }

    if !spec.balance.threshold.is_finite() {
        return Err(ValidationError::InvalidThreshold(spec.balance.threshold));
    }

    if spec.balance.factor == 0 {
        return Err(ValidationError::InvalidFactor(spec.balance.factor));
    }

    let forest = &spec.forest;
    if forest.n_estimators == 0 {
        return Err(ValidationError::InvalidEstimators(forest.n_estimators));
    }
    if forest.max_depth == 0 {
        return Err(ValidationError::InvalidMaxDepth(forest.max_depth));
    }
    if forest.min_samples_split < 2 {
        return Err(ValidationError::InvalidMinSamplesSplit(
            forest.min_samples_split,
        ));
    }
    if forest.min_samples_leaf == 0 {
        return Err(ValidationError::InvalidMinSamplesLeaf(
            forest.min_samples_leaf,
        ));
    }

    Ok(())
}
