//! Artifact saving

use super::bundle::{ArtifactBundle, ArtifactError, ArtifactKind};
use super::format::{ArtifactFormat, SaveConfig};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write all five artifacts into `dir`, creating it if needed.
///
/// Returns the written paths in [`ArtifactKind::ALL`] order.
///
/// # Example
///
/// ```no_run
/// use demanda::io::{save_artifacts, ArtifactFormat, SaveConfig};
/// # fn bundle() -> demanda::io::ArtifactBundle { unimplemented!() }
///
/// let config = SaveConfig::new(ArtifactFormat::Json);
/// save_artifacts(&bundle(), "artifacts", &config).unwrap();
/// ```
pub fn save_artifacts(
    bundle: &ArtifactBundle,
    dir: impl AsRef<Path>,
    config: &SaveConfig,
) -> Result<Vec<PathBuf>, ArtifactError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = vec![
        write_artifact(dir, ArtifactKind::Model, &bundle.estimator, config)?,
        write_artifact(dir, ArtifactKind::Scaler, &bundle.scaler, config)?,
        write_artifact(dir, ArtifactKind::MaxDemand, &bundle.max_demand, config)?,
        write_artifact(dir, ArtifactKind::ValidIds, &bundle.valid_ids, config)?,
        write_artifact(dir, ArtifactKind::R2Score, &bundle.r2_score, config)?,
    ];

    info!(
        dir = %dir.display(),
        format = config.format.extension(),
        "Saved artifacts"
    );
    Ok(paths)
}

fn write_artifact<T: Serialize>(
    dir: &Path,
    kind: ArtifactKind,
    value: &T,
    config: &SaveConfig,
) -> Result<PathBuf, ArtifactError> {
    let serialize_err = |message: String| ArtifactError::Serialize {
        name: kind.stem(),
        message,
    };

    let data = match config.format {
        ArtifactFormat::Json if config.pretty => {
            serde_json::to_string_pretty(value).map_err(|e| serialize_err(e.to_string()))?
        }
        ArtifactFormat::Json => {
            serde_json::to_string(value).map_err(|e| serialize_err(e.to_string()))?
        }
        ArtifactFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| serialize_err(e.to_string()))?
        }
    };

    let path = dir.join(format!("{}.{}", kind.stem(), config.format.extension()));
    fs::write(&path, data).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "Wrote artifact");
    Ok(path)
}
