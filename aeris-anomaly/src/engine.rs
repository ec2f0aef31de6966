//! AnomalyScoringEngine — orchestrates extraction, window update,
//! conditional retrain, scoring, threshold decision, and alert emission.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use aeris_core::alert::{Alert, AlertKind, Severity};
use aeris_core::bus::AlertBus;
use aeris_core::config::defaults::HIGH_SEVERITY_SCORE;
use aeris_core::config::DetectionConfig;
use aeris_core::models::{AnomalyResult, DetectionStats};
use aeris_core::telemetry::{StreamKey, TelemetryRecord};
use aeris_core::traits::DetectorKind;

use crate::detectors;
use crate::features::FeatureExtractor;
use crate::window::StreamWindow;

/// Confidence conventions for neutral results (see [`AnomalyResult::neutral`]).
const CONFIDENCE_DISABLED: f64 = 1.0;
const CONFIDENCE_WARMING: f64 = 0.5;
const CONFIDENCE_NONE: f64 = 0.0;

/// Per-key streaming scorer. One window per (entity, subsystem) stream,
/// created lazily on first sight; different keys score fully in parallel,
/// same-key observations serialize on the window entry.
pub struct AnomalyScoringEngine {
    extractor: FeatureExtractor,
    windows: DashMap<StreamKey, StreamWindow>,
    bus: AlertBus,

    enabled: AtomicBool,
    detector: RwLock<DetectorKind>,
    threshold: f64,
    window_capacity: usize,
    min_samples: usize,
    retrain_interval: Duration,

    total_predictions: AtomicU64,
    anomalies_detected: AtomicU64,
    model_retrains: AtomicU64,
}

impl AnomalyScoringEngine {
    pub fn new(config: DetectionConfig, bus: AlertBus) -> Self {
        info!(detector = %config.detector, threshold = config.threshold, "scoring engine initialized");
        Self {
            extractor: FeatureExtractor::new(config.features.clone()),
            windows: DashMap::new(),
            bus,
            enabled: AtomicBool::new(config.enabled),
            detector: RwLock::new(config.detector),
            threshold: config.threshold,
            window_capacity: config.window_capacity,
            min_samples: config.min_samples,
            retrain_interval: Duration::seconds(config.retrain_interval_secs as i64),
            total_predictions: AtomicU64::new(0),
            anomalies_detected: AtomicU64::new(0),
            model_retrains: AtomicU64::new(0),
        }
    }

    fn current_detector(&self) -> DetectorKind {
        *self.detector.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Score one telemetry observation.
    ///
    /// Never fails: internal model errors degrade to a neutral zero-score
    /// result so detection problems cannot stop telemetry flow.
    pub fn process(&self, record: &TelemetryRecord) -> AnomalyResult {
        let key = record.stream_key();
        let detector = self.current_detector();

        if !self.enabled.load(Ordering::Relaxed) {
            return AnomalyResult::neutral(key, detector, CONFIDENCE_DISABLED);
        }

        let features = self.extractor.extract(record);
        if features.is_empty() {
            warn!(key = %key, "no features extracted from record");
            return AnomalyResult::neutral(key, detector, CONFIDENCE_NONE);
        }

        // Lazy window creation on first sight of a key, then the scoring
        // sequence under the entry's exclusive access.
        let mut entry = self.windows.entry(key.clone()).or_insert_with(|| {
            debug!(key = %key, "creating stream window");
            StreamWindow::new(
                self.window_capacity,
                self.min_samples,
                detectors::build(detector),
            )
        });

        // A window built under a previous variant can slip past the clear in
        // set_detector when its insert races it; rebuild on sight.
        if entry.detector_kind() != detector {
            *entry = StreamWindow::new(
                self.window_capacity,
                self.min_samples,
                detectors::build(detector),
            );
        }

        entry.push(features.clone());

        if !entry.is_warm() {
            return AnomalyResult::neutral(key, detector, CONFIDENCE_WARMING)
                .with_features(features);
        }

        match entry.maybe_retrain(Utc::now(), self.retrain_interval) {
            Ok(true) => {
                self.model_retrains.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "retrained window model");
            }
            Ok(false) => {}
            Err(e) => warn!(key = %key, error = %e, "retrain failed; keeping previous model"),
        }

        let evaluation = match entry.evaluate(&features) {
            Ok(eval) => eval,
            Err(e) => {
                warn!(key = %key, error = %e, "scoring failed; degrading to neutral");
                return AnomalyResult::neutral(key, detector, CONFIDENCE_NONE)
                    .with_features(features);
            }
        };

        // Permissive OR: either the model's verdict or the threshold alone
        // is enough.
        let is_anomaly = evaluation.model_verdict || evaluation.score > self.threshold;

        // Confidence decays toward the decision boundary and grows with
        // window fill.
        let confidence =
            (entry.fill_ratio() + (1.0 - 2.0 * (evaluation.score - 0.5).abs())) / 2.0;

        drop(entry);

        self.total_predictions.fetch_add(1, Ordering::Relaxed);
        if is_anomaly {
            self.anomalies_detected.fetch_add(1, Ordering::Relaxed);
        }

        let result = AnomalyResult {
            key: key.clone(),
            timestamp: record.timestamp,
            score: evaluation.score,
            is_anomaly,
            confidence,
            features,
            detector,
        };

        if is_anomaly {
            self.publish_anomaly(&result);
        }

        result
    }

    fn publish_anomaly(&self, result: &AnomalyResult) {
        let severity = if result.score > HIGH_SEVERITY_SCORE {
            Severity::High
        } else {
            Severity::Medium
        };
        warn!(
            key = %result.key,
            score = result.score,
            confidence = result.confidence,
            "anomaly detected"
        );
        self.bus.publish(Alert::new(
            AlertKind::Anomaly,
            result.key.entity_id.clone(),
            result.key.subsystem,
            severity,
            format!(
                "Anomaly detected in {} (score: {:.3})",
                result.key.subsystem, result.score
            ),
            serde_json::json!({
                "anomaly_score": result.score,
                "confidence": result.confidence,
                "algorithm": result.detector.to_string(),
                "features": result.features,
            }),
        ));
    }

    /// Administrative kill switch. Disabled scoring returns neutral results
    /// with confidence 1.0.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!(enabled, "anomaly detection toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Switch the detector variant. Every existing window is discarded and
    /// cold-starts under the new variant.
    pub fn set_detector(&self, kind: DetectorKind) {
        {
            let mut guard = self.detector.write().unwrap_or_else(|e| e.into_inner());
            if *guard == kind {
                return;
            }
            *guard = kind;
        }
        self.windows.clear();
        info!(detector = %kind, "detector variant switched; all windows cold-started");
    }

    /// Drop every window and its model state.
    pub fn reset(&self) {
        self.windows.clear();
    }

    /// Number of stream keys currently tracked.
    pub fn tracked_streams(&self) -> usize {
        self.windows.len()
    }

    /// Read-only counters snapshot.
    pub fn statistics(&self) -> DetectionStats {
        DetectionStats {
            total_predictions: self.total_predictions.load(Ordering::Relaxed),
            anomalies_detected: self.anomalies_detected.load(Ordering::Relaxed),
            model_retrains: self.model_retrains.load(Ordering::Relaxed),
            tracked_streams: self.windows.len(),
        }
    }
}
