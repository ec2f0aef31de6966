mod detector;
mod source;

pub use detector::{DetectorKind, IDetectorModel};
pub use source::ITelemetrySource;
