//! Feature preprocessing

mod scaler;

pub use scaler::{ScalerError, StandardScaler};
