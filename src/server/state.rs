//! Server application state
//!
//! Built once at startup and never mutated; handlers receive cheap clones.

use crate::inference::Predictor;
use crate::io::load_artifacts;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when the artifact bundle failed to load
    pub predictor: Option<Arc<Predictor>>,

    /// Why the bundle failed to load
    pub load_error: Option<Arc<str>>,

    pub start_time: Instant,
}

impl AppState {
    pub fn ready(predictor: Predictor) -> Self {
        Self {
            predictor: Some(Arc::new(predictor)),
            load_error: None,
            start_time: Instant::now(),
        }
    }

    pub fn not_ready(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            predictor: None,
            load_error: Some(reason.into()),
            start_time: Instant::now(),
        }
    }

    /// Load the artifact bundle from `dir`.
    ///
    /// Never fails: a missing or corrupt bundle yields a not-ready state and
    /// the cause is logged.
    pub fn load(dir: &Path) -> Self {
        match load_artifacts(dir) {
            Ok(bundle) => {
                info!(dir = %dir.display(), "Model components loaded");
                Self::ready(Predictor::from_bundle(bundle))
            }
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "Failed to load model components");
                Self::not_ready(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_some()
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
