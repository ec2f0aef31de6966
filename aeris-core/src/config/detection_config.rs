use serde::{Deserialize, Serialize};

use super::defaults;
use crate::traits::DetectorKind;

/// Anomaly-detection subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Administrative kill switch; disabled scoring returns neutral results.
    pub enabled: bool,
    /// Which detector variant every new window starts with.
    pub detector: DetectorKind,
    /// Normalized score above which an observation is anomalous.
    pub threshold: f64,
    /// Sliding-window capacity per stream key.
    pub window_capacity: usize,
    /// Samples required before a window is warm.
    pub min_samples: usize,
    /// Seconds between per-window retrains.
    pub retrain_interval_secs: u64,
    /// Feature names resolved from every record.
    pub features: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            detector: DetectorKind::IsolationForest,
            threshold: defaults::DEFAULT_SCORE_THRESHOLD,
            window_capacity: defaults::DEFAULT_WINDOW_CAPACITY,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            retrain_interval_secs: defaults::DEFAULT_RETRAIN_INTERVAL_SECS,
            features: defaults::default_features(),
        }
    }
}
