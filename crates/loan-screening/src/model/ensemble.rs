use super::artifact::{ArtifactError, ModelArtifact};
use super::{Classifier, DecisionLabel, InferenceError};
use crate::screening::domain::{LoanApplicationRecord, FEATURE_NAMES};

/// Pre-trained gradient-boosted tree ensemble decoded from a model artifact.
///
/// Immutable after construction; `predict` and `predict_probability` only
/// read, so one instance can be shared across handlers without locking.
#[derive(Debug)]
pub struct GradientBoostedClassifier {
    artifact: ModelArtifact,
}

impl GradientBoostedClassifier {
    /// Build a classifier from a decoded artifact, validating it against
    /// the compiled-in training schema.
    pub fn new(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate(&FEATURE_NAMES)?;
        Ok(Self { artifact })
    }

    pub fn tree_count(&self) -> usize {
        self.artifact.trees.len()
    }

    fn positive_probability(
        &self,
        record: &LoanApplicationRecord,
    ) -> Result<f64, InferenceError> {
        let features = record.feature_vector();
        for (name, value) in FEATURE_NAMES.iter().zip(features.iter()) {
            if !value.is_finite() {
                return Err(InferenceError::NonFiniteFeature {
                    name,
                    value: *value,
                });
            }
        }

        let margin = self
            .artifact
            .trees
            .iter()
            .fold(self.artifact.base_score, |acc, tree| {
                acc + tree.evaluate(&features)
            });
        if !margin.is_finite() {
            return Err(InferenceError::NonFiniteMargin);
        }

        Ok(sigmoid(margin))
    }
}

impl Classifier for GradientBoostedClassifier {
    fn predict(&self, record: &LoanApplicationRecord) -> Result<DecisionLabel, InferenceError> {
        let probability = self.positive_probability(record)?;
        if probability >= self.artifact.threshold {
            Ok(DecisionLabel::Approved)
        } else {
            Ok(DecisionLabel::Rejected)
        }
    }

    fn predict_probability(&self, record: &LoanApplicationRecord) -> Result<f64, InferenceError> {
        self.positive_probability(record)
    }
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
