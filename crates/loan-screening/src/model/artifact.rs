use serde::{Deserialize, Serialize};

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// On-disk JSON layout of a serialized gradient-boosted binary classifier.
///
/// The artifact declares the exact feature columns it was trained on so a
/// drifted schema is caught at load time rather than producing silently
/// misaligned predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    /// Margin-space bias added before the logistic transform.
    #[serde(default)]
    pub base_score: f64,
    /// Positive-class probability at or above which the label is "approved".
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub trees: Vec<TreeNode>,
}

fn default_threshold() -> f64 {
    0.5
}

/// One node of a regression tree. Traversal goes left when the feature
/// value is strictly below the split threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    pub(crate) fn evaluate(&self, features: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] < *threshold {
                    left.evaluate(features)
                } else {
                    right.evaluate(features)
                }
            }
        }
    }

    fn max_feature_index(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                let mut max = *feature;
                if let Some(child) = left.max_feature_index() {
                    max = max.max(child);
                }
                if let Some(child) = right.max_feature_index() {
                    max = max.max(child);
                }
                Some(max)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact is not a valid model document: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unsupported artifact format version {found} (supported: {SUPPORTED_FORMAT_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("feature column {position} is {found:?}, training schema expects {expected:?}")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: Option<String>,
    },
    #[error("tree {tree} splits on feature index {feature}, schema has only {width} columns")]
    SplitOutOfRange {
        tree: usize,
        feature: usize,
        width: usize,
    },
    #[error("decision threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
    #[error("artifact contains no trees")]
    EmptyEnsemble,
}

impl ModelArtifact {
    /// Check the artifact against the schema the binary was compiled with.
    pub fn validate(&self, schema: &[&str]) -> Result<(), ArtifactError> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
            });
        }

        for (position, expected) in schema.iter().enumerate() {
            let found = self.feature_names.get(position);
            if found.map(String::as_str) != Some(*expected) {
                return Err(ArtifactError::SchemaMismatch {
                    position,
                    expected: (*expected).to_string(),
                    found: found.cloned(),
                });
            }
        }
        if self.feature_names.len() != schema.len() {
            return Err(ArtifactError::SchemaMismatch {
                position: schema.len(),
                expected: "<end of schema>".to_string(),
                found: self.feature_names.get(schema.len()).cloned(),
            });
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ArtifactError::InvalidThreshold(self.threshold));
        }

        if self.trees.is_empty() {
            return Err(ArtifactError::EmptyEnsemble);
        }

        for (index, tree) in self.trees.iter().enumerate() {
            if let Some(feature) = tree.max_feature_index() {
                if feature >= schema.len() {
                    return Err(ArtifactError::SplitOutOfRange {
                        tree: index,
                        feature,
                        width: schema.len(),
                    });
                }
            }
        }

        Ok(())
    }
}
