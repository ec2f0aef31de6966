//! # aeris-core
//!
//! Foundation crate for the Aeris UAV telemetry pipeline.
//! Defines all types, traits, errors, config, and the alert bus.
//! Every other crate in the workspace depends on this.

pub mod alert;
pub mod bus;
pub mod config;
pub mod errors;
pub mod fault;
pub mod models;
pub mod telemetry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use alert::{Alert, AlertKind, Severity};
pub use bus::AlertBus;
pub use config::AerisConfig;
pub use errors::{AerisError, AerisResult};
pub use fault::{FaultKey, FaultKind, FaultRecord, FaultScenario};
pub use models::{AnomalyResult, DetectionStats, FaultStats};
pub use telemetry::{FeatureVector, StreamKey, Subsystem, TelemetryRecord};
pub use traits::{DetectorKind, IDetectorModel, ITelemetrySource};
