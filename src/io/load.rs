//! Artifact loading

use super::bundle::{ArtifactBundle, ArtifactError, ArtifactKind};
use super::format::ArtifactFormat;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load and cross-check all five artifacts from `dir`.
///
/// Each artifact may be JSON or YAML independently; the format is detected
/// from the file extension. The bundle is returned only if every artifact
/// loads and [`ArtifactBundle::check_consistency`] passes.
///
/// # Example
///
/// ```no_run
/// use demanda::io::load_artifacts;
///
/// let bundle = load_artifacts("artifacts").unwrap();
/// println!("R² = {:.2}%", bundle.r2_score);
/// ```
pub fn load_artifacts(dir: impl AsRef<Path>) -> Result<ArtifactBundle, ArtifactError> {
    let dir = dir.as_ref();

    let bundle = ArtifactBundle {
        estimator: read_artifact(dir, ArtifactKind::Model)?,
        scaler: read_artifact(dir, ArtifactKind::Scaler)?,
        max_demand: read_artifact(dir, ArtifactKind::MaxDemand)?,
        valid_ids: read_artifact(dir, ArtifactKind::ValidIds)?,
        r2_score: read_artifact(dir, ArtifactKind::R2Score)?,
    };
    bundle.check_consistency()?;

    info!(
        dir = %dir.display(),
        n_estimators = bundle.estimator.n_estimators(),
        max_demand = bundle.max_demand,
        "Loaded artifacts"
    );
    Ok(bundle)
}

/// Path of the first existing file for `kind`, probing JSON before YAML
pub fn find_artifact(dir: &Path, kind: ArtifactKind) -> Option<(PathBuf, ArtifactFormat)> {
    ArtifactFormat::ALL.iter().find_map(|format| {
        format
            .accepted_extensions()
            .iter()
            .map(|ext| dir.join(format!("{}.{ext}", kind.stem())))
            .find(|path| path.is_file())
            .map(|path| (path, *format))
    })
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, kind: ArtifactKind) -> Result<T, ArtifactError> {
    let (path, format) = find_artifact(dir, kind).ok_or_else(|| ArtifactError::Missing {
        name: kind.stem(),
        dir: dir.to_path_buf(),
    })?;

    let content = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;

    let parsed = match format {
        ArtifactFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        ArtifactFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ArtifactError::Parse { path, message })
}
