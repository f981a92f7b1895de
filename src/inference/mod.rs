//! Online inference over a loaded artifact bundle
//!
//! A [`Predictor`] validates a request against the trained identifier
//! universe, applies the inference-time feature transform and the frozen
//! scaler, and classifies the result against the training-time maximum
//! demand. Validation failures never reach the model.

mod predictor;


pub use predictor::{
    round2, InferenceError, PredictError, PredictionResult, Predictor, HIGH_DEMAND_PERCENT,
};
