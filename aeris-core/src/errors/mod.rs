//! Error taxonomy. No variant here is fatal to the process: detection
//! failures degrade to neutral results, fault rejections surface to the
//! immediate caller.

mod detection_error;
mod fault_error;

pub use detection_error::DetectionError;
pub use fault_error::FaultError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum AerisError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Fault(#[from] FaultError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

pub type AerisResult<T> = Result<T, AerisError>;
