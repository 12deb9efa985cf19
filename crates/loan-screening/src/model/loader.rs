use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::artifact::{ArtifactError, ModelArtifact};
use super::ensemble::GradientBoostedClassifier;

/// Startup-time loader failures. Both variants are fatal: the service
/// cannot produce a single prediction without a usable artifact, so the
/// process exits instead of serving a degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },
    #[error("failed to load model artifact {}: {source}", path.display())]
    ArtifactLoad {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },
}

/// Deserialize and validate the classifier artifact. Called exactly once,
/// before the listener binds.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<GradientBoostedClassifier, ModelError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ModelError::ArtifactNotFound {
            path: path.to_path_buf(),
        });
    }

    let load_error = |source: ArtifactError| ModelError::ArtifactLoad {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(|err| load_error(err.into()))?;
    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|err| load_error(err.into()))?;
    let classifier = GradientBoostedClassifier::new(artifact).map_err(load_error)?;

    info!(
        path = %path.display(),
        trees = classifier.tree_count(),
        "loan classifier loaded",
    );
    Ok(classifier)
}
