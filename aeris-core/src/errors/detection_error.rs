/// Anomaly-detection errors. All are absorbed at the window/model boundary
/// into a neutral result; telemetry flow never stops on these.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no resolvable features in record")]
    EmptyFeatures,

    #[error("model is not fitted yet")]
    NotFitted,

    #[error("model fit failed: {reason}")]
    FitFailed { reason: String },

    #[error("scoring failed: {reason}")]
    ScoreFailed { reason: String },

    #[error("normalizer is degenerate: {reason}")]
    DegenerateNormalizer { reason: String },
}
