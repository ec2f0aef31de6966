//! # aeris-anomaly
//!
//! Streaming anomaly detection for UAV telemetry: raw records are reduced to
//! feature vectors, windowed per (entity, subsystem) stream, and scored by a
//! pluggable outlier model. Anomalies fan out on the alert bus.

pub mod detectors;
pub mod engine;
pub mod features;
pub mod normalize;
pub mod window;

pub use engine::AnomalyScoringEngine;
pub use features::FeatureExtractor;
pub use normalize::Normalizer;
pub use window::StreamWindow;
