use serde_json::json;

use aeris_anomaly::AnomalyScoringEngine;
use aeris_core::alert::AlertKind;
use aeris_core::bus::AlertBus;
use aeris_core::config::DetectionConfig;
use aeris_core::telemetry::{Subsystem, TelemetryRecord};
use aeris_core::traits::DetectorKind;

fn test_config() -> DetectionConfig {
    DetectionConfig {
        window_capacity: 20,
        min_samples: 5,
        // Retrain on every warm observation so tests see fresh fits.
        retrain_interval_secs: 0,
        ..DetectionConfig::default()
    }
}

fn power_record(voltage: f64, current: f64, soc: f64) -> TelemetryRecord {
    TelemetryRecord::new(
        "UAV_1",
        Subsystem::Power,
        json!({
            "battery": {
                "voltage": voltage,
                "current": current,
                "state_of_charge": soc,
            }
        }),
    )
}

/// Deterministic near-constant baseline with slight spread.
fn baseline_record(i: usize) -> TelemetryRecord {
    let jitter = (i % 5) as f64 * 0.01;
    power_record(12.0 + jitter, 1.5 - jitter, 90.0 + jitter)
}

// ── Neutral-result conventions ───────────────────────────────────────────

#[test]
fn disabled_engine_returns_neutral_with_full_confidence() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());
    engine.set_enabled(false);

    let result = engine.process(&baseline_record(0));
    assert!(!result.is_anomaly);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn empty_features_return_zero_confidence() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());
    let record = TelemetryRecord::new("UAV_1", Subsystem::DataStorage, json!({"blob": true}));

    let result = engine.process(&record);
    assert!(!result.is_anomaly);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.confidence, 0.0);
    assert!(result.features.is_empty());
}

#[test]
fn cold_window_returns_half_confidence() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());

    // min_samples = 5: the first four observations are all cold.
    for i in 0..4 {
        let result = engine.process(&baseline_record(i));
        assert!(!result.is_anomaly);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.confidence, 0.5);
        assert!(!result.features.is_empty());
    }
}

// ── Warm scoring ─────────────────────────────────────────────────────────

#[test]
fn warm_scores_stay_in_unit_range() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());

    for i in 0..15 {
        let result = engine.process(&baseline_record(i));
        assert!((0.0..=1.0).contains(&result.score), "score {}", result.score);
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "confidence {}",
            result.confidence
        );
    }
}

#[test]
fn extreme_observation_is_flagged_and_alerted() {
    let bus = AlertBus::new();
    let mut rx = bus.subscribe();
    let engine = AnomalyScoringEngine::new(test_config(), bus);

    for i in 0..10 {
        engine.process(&baseline_record(i));
    }
    let result = engine.process(&power_record(500.0, -80.0, 0.0));

    assert!(result.is_anomaly);
    let alert = rx.try_recv().expect("anomaly alert published");
    assert_eq!(alert.kind, AlertKind::Anomaly);
    assert_eq!(alert.entity_id, "UAV_1");
    assert_eq!(alert.subsystem, Subsystem::Power);
}

#[test]
fn statistics_count_predictions_and_anomalies() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());

    for i in 0..10 {
        engine.process(&baseline_record(i));
    }
    engine.process(&power_record(500.0, -80.0, 0.0));

    let stats = engine.statistics();
    // 4 cold observations do not count as predictions.
    assert_eq!(stats.total_predictions, 7);
    assert!(stats.anomalies_detected >= 1);
    assert!(stats.model_retrains >= 1);
    assert_eq!(stats.tracked_streams, 1);
}

// ── Stream independence and lifecycle ────────────────────────────────────

#[test]
fn distinct_keys_get_distinct_windows() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());

    engine.process(&baseline_record(0));
    let mut other = baseline_record(0);
    other.entity_id = "UAV_2".into();
    engine.process(&other);

    assert_eq!(engine.tracked_streams(), 2);
}

#[test]
fn switching_detector_cold_starts_every_window() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());

    for i in 0..10 {
        engine.process(&baseline_record(i));
    }
    assert_eq!(engine.tracked_streams(), 1);

    engine.set_detector(DetectorKind::OneClassSvm);
    assert_eq!(engine.tracked_streams(), 0);

    // First observation after the switch is cold again.
    let result = engine.process(&baseline_record(0));
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.detector, DetectorKind::OneClassSvm);
}

#[test]
fn reset_drops_all_windows() {
    let engine = AnomalyScoringEngine::new(test_config(), AlertBus::new());
    engine.process(&baseline_record(0));
    engine.reset();
    assert_eq!(engine.tracked_streams(), 0);
}
