//! Artifact I/O - Loading and saving trained bundles
//!
//! A bundle is written as five files in one directory (`model`, `scaler`,
//! `max_demand`, `valid_ids`, `r2_score`), each in JSON or YAML.

mod bundle;
mod format;
mod load;
mod save;


pub use bundle::{ArtifactBundle, ArtifactError, ArtifactKind, BundleSummary};
pub use format::{ArtifactFormat, SaveConfig};
pub use load::{find_artifact, load_artifacts};
pub use save::save_artifacts;
