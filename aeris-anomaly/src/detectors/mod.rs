//! Detector variants and the uniform score-normalization policy.

mod isolation;
mod lof;
mod svm;

pub use isolation::IsolationForest;
pub use lof::LocalOutlierFactor;
pub use svm::OneClassSvm;

use aeris_core::traits::{DetectorKind, IDetectorModel};

/// Build a fresh, unfitted model for the selected variant.
pub fn build(kind: DetectorKind) -> Box<dyn IDetectorModel> {
    match kind {
        DetectorKind::IsolationForest => Box::new(IsolationForest::default()),
        DetectorKind::OneClassSvm => Box::new(OneClassSvm::default()),
        DetectorKind::LocalOutlierFactor => Box::new(LocalOutlierFactor::default()),
    }
}

/// Map a variant-specific native score onto the comparable [0, 1] range.
///
/// Margin variants (higher native = more normal) use an affine map with
/// empirically calibrated offset/scale; the local-density variant (lower
/// native = more anomalous) negates.
pub fn normalize_score(kind: DetectorKind, native: f64) -> f64 {
    let mapped = match kind {
        DetectorKind::IsolationForest => (native + 0.5) / 1.0,
        DetectorKind::OneClassSvm => (native + 1.0) / 2.0,
        DetectorKind::LocalOutlierFactor => -native,
    };
    if mapped.is_nan() {
        // Numerical failure degrades to the neutral zero score.
        return 0.0;
    }
    mapped.clamp(0.0, 1.0)
}
