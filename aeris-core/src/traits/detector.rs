use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

/// Which detector variant a window runs. Selected at configuration time;
/// switching variants cold-starts every existing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    IsolationForest,
    OneClassSvm,
    LocalOutlierFactor,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectorKind::IsolationForest => "isolation_forest",
            DetectorKind::OneClassSvm => "one_class_svm",
            DetectorKind::LocalOutlierFactor => "local_outlier_factor",
        };
        f.write_str(name)
    }
}

/// Pluggable trainable/scoreable outlier model.
///
/// Samples are normalized, fixed-dimension vectors; the native score's
/// direction and range are variant-specific. Cross-variant comparison goes
/// through the uniform score-normalization policy in the scoring crate.
pub trait IDetectorModel: Send + Sync {
    /// Fit the model on the current window contents.
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<(), DetectionError>;

    /// Native model score for one sample. Direction is variant-specific.
    fn score(&self, sample: &[f64]) -> Result<f64, DetectionError>;

    /// The model's own inlier/outlier verdict for one sample.
    fn classify(&self, sample: &[f64]) -> Result<bool, DetectionError>;

    fn kind(&self) -> DetectorKind;
}
