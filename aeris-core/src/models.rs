//! Result and statistics snapshot models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{FeatureVector, StreamKey};
use crate::traits::DetectorKind;

/// Outcome of scoring one telemetry observation. Immutable; produced once
/// per observation and not retained by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub key: StreamKey,
    pub timestamp: DateTime<Utc>,
    /// Cross-variant-comparable anomaly score in [0, 1].
    pub score: f64,
    pub is_anomaly: bool,
    /// How much to trust this verdict, in [0, 1].
    pub confidence: f64,
    pub features: FeatureVector,
    pub detector: DetectorKind,
}

impl AnomalyResult {
    /// A "nothing to report" result carrying no score.
    ///
    /// The confidence convention distinguishes the three neutral cases:
    /// 1.0 = detection disabled, 0.5 = window still warming up,
    /// 0.0 = no resolvable features or an internal model failure.
    pub fn neutral(key: StreamKey, detector: DetectorKind, confidence: f64) -> Self {
        Self {
            key,
            timestamp: Utc::now(),
            score: 0.0,
            is_anomaly: false,
            confidence,
            features: FeatureVector::new(),
            detector,
        }
    }

    pub fn with_features(mut self, features: FeatureVector) -> Self {
        self.features = features;
        self
    }
}

/// Read-only snapshot of scoring-engine counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total_predictions: u64,
    pub anomalies_detected: u64,
    pub model_retrains: u64,
    pub tracked_streams: usize,
}

/// Read-only snapshot of fault-registry counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaultStats {
    pub total_injected: u64,
    pub total_cleared: u64,
    pub active: usize,
    pub by_kind: BTreeMap<String, u64>,
    pub by_subsystem: BTreeMap<String, u64>,
    /// Running average of observed fault lifetimes, seconds.
    pub average_duration_secs: f64,
}
