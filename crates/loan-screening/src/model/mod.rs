pub mod artifact;
mod ensemble;
mod loader;

pub use artifact::{ArtifactError, ModelArtifact, TreeNode};
pub use ensemble::GradientBoostedClassifier;
pub use loader::{load_classifier, ModelError};

use serde::{Deserialize, Serialize};

use crate::screening::domain::LoanApplicationRecord;

/// Outcome label the classifier assigns to a record. `Approved` is the
/// positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionLabel {
    Approved,
    Rejected,
}

/// Capability surface of the loaded model: one label call, one
/// positive-class probability call. Implementations must tolerate
/// concurrent read-only use.
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &LoanApplicationRecord) -> Result<DecisionLabel, InferenceError>;

    /// Probability of the positive (approved) class, in [0, 1].
    fn predict_probability(&self, record: &LoanApplicationRecord) -> Result<f64, InferenceError>;
}

/// Submission-time inference failures. Recoverable: the current submission
/// aborts with a user-visible message and the next one may retry.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("feature '{name}' is not a finite number ({value})")]
    NonFiniteFeature { name: &'static str, value: f64 },
    #[error("ensemble margin is not a finite number")]
    NonFiniteMargin,
}
