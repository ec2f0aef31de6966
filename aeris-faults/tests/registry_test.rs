use chrono::{Duration, Utc};
use serde_json::json;

use aeris_core::alert::AlertKind;
use aeris_core::bus::AlertBus;
use aeris_core::config::FaultInjectionConfig;
use aeris_core::errors::FaultError;
use aeris_core::fault::{FaultKey, FaultKind};
use aeris_core::telemetry::Subsystem;
use aeris_faults::FaultRegistry;

fn registry(max_concurrent: usize) -> FaultRegistry {
    let config = FaultInjectionConfig {
        max_concurrent,
        ..FaultInjectionConfig::default()
    };
    FaultRegistry::new(&config, AlertBus::new())
}

fn gps_drift(entity: &str) -> FaultKey {
    FaultKey::new(entity, Subsystem::Navigation, FaultKind::GpsDrift)
}

// ── Inject ───────────────────────────────────────────────────────────────

#[test]
fn inject_activates_and_stamps_expiry() {
    let registry = registry(3);
    let before = Utc::now();

    let record = registry
        .inject(gps_drift("UAV_1"), json!({"drift_factor": 0.1}), None)
        .unwrap();

    assert!(registry.is_active(&record.key));
    // Default duration is 30 s.
    let lifetime = record.expires_at - record.injected_at;
    assert_eq!(lifetime, Duration::seconds(30));
    assert!(record.injected_at >= before);
}

#[test]
fn duplicate_inject_is_rejected_without_touching_the_record() {
    let registry = registry(3);
    let original = registry.inject(gps_drift("UAV_1"), json!({}), None).unwrap();

    for _ in 0..2 {
        let err = registry.inject(gps_drift("UAV_1"), json!({}), None).unwrap_err();
        assert!(matches!(err, FaultError::AlreadyActive { .. }));
    }

    let active = registry.active_faults();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].expires_at, original.expires_at);
}

#[test]
fn concurrency_cap_rejects_overflow() {
    let registry = registry(3);
    for i in 0..3 {
        registry
            .inject(gps_drift(&format!("UAV_{i}")), json!({}), None)
            .unwrap();
    }

    let err = registry
        .inject(gps_drift("UAV_9"), json!({}), None)
        .unwrap_err();
    assert!(matches!(err, FaultError::CapacityReached { cap: 3 }));
    assert_eq!(registry.active_count(), 3);
}

#[test]
fn disabled_registry_rejects_injection() {
    let registry = registry(3);
    registry.set_enabled(false);
    assert!(matches!(
        registry.inject(gps_drift("UAV_1"), json!({}), None),
        Err(FaultError::Disabled)
    ));
}

// ── Clear ────────────────────────────────────────────────────────────────

#[test]
fn clear_removes_and_counts_once() {
    let registry = registry(3);
    let key = gps_drift("UAV_1");
    registry.inject(key.clone(), json!({}), None).unwrap();

    registry.clear(&key).unwrap();
    assert!(!registry.is_active(&key));

    // Second clear is a rejection and must not double-count.
    assert!(matches!(
        registry.clear(&key),
        Err(FaultError::NotActive { .. })
    ));
    let stats = registry.statistics();
    assert_eq!(stats.total_cleared, 1);
}

#[test]
fn cleared_key_can_be_reinjected() {
    let registry = registry(3);
    let key = gps_drift("UAV_1");
    registry.inject(key.clone(), json!({}), None).unwrap();
    registry.clear(&key).unwrap();

    // Terminal states are equivalent to Inactive for re-injection.
    assert!(registry.inject(key.clone(), json!({}), None).is_ok());
}

// ── Sweep ────────────────────────────────────────────────────────────────

#[test]
fn sweep_respects_expiry_times() {
    let registry = registry(3);
    let now = Utc::now();
    registry
        .inject(gps_drift("UAV_1"), json!({}), Some(Duration::seconds(2)))
        .unwrap();

    assert_eq!(registry.sweep(now + Duration::seconds(1)), 0);
    assert!(registry.is_active(&gps_drift("UAV_1")));

    assert_eq!(registry.sweep(now + Duration::seconds(3)), 1);
    assert!(!registry.is_active(&gps_drift("UAV_1")));
    assert_eq!(registry.statistics().total_cleared, 1);
}

#[test]
fn full_sweep_empties_the_active_set() {
    let registry = registry(5);
    for i in 0..4 {
        registry
            .inject(
                gps_drift(&format!("UAV_{i}")),
                json!({}),
                Some(Duration::seconds(5)),
            )
            .unwrap();
    }

    let swept = registry.sweep(Utc::now() + Duration::seconds(10));
    assert_eq!(swept, 4);
    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.statistics().total_cleared, 4);
}

// ── Statistics & alerts ──────────────────────────────────────────────────

#[test]
fn statistics_track_kind_and_subsystem() {
    let registry = registry(5);
    registry.inject(gps_drift("UAV_1"), json!({}), None).unwrap();
    registry
        .inject(
            FaultKey::new("UAV_1", Subsystem::Power, FaultKind::BatteryFailure),
            json!({}),
            None,
        )
        .unwrap();

    let stats = registry.statistics();
    assert_eq!(stats.total_injected, 2);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.by_kind.get("gps_drift"), Some(&1));
    assert_eq!(stats.by_subsystem.get("power"), Some(&1));
}

#[test]
fn average_duration_updates_on_clear() {
    let registry = registry(3);
    let key = gps_drift("UAV_1");
    registry.inject(key.clone(), json!({}), None).unwrap();
    registry.clear(&key).unwrap();

    let stats = registry.statistics();
    assert!(stats.average_duration_secs >= 0.0);
    assert!(stats.average_duration_secs < 1.0);
}

#[test]
fn lifecycle_events_are_published() {
    let bus = AlertBus::new();
    let mut rx = bus.subscribe();
    let registry = FaultRegistry::new(&FaultInjectionConfig::default(), bus);

    let key = gps_drift("UAV_1");
    registry.inject(key.clone(), json!({}), None).unwrap();
    registry.clear(&key).unwrap();

    assert_eq!(rx.try_recv().unwrap().kind, AlertKind::FaultInjected);
    assert_eq!(rx.try_recv().unwrap().kind, AlertKind::FaultCleared);
}

#[test]
fn active_for_entity_filters() {
    let registry = registry(5);
    registry.inject(gps_drift("UAV_1"), json!({}), None).unwrap();
    registry.inject(gps_drift("UAV_2"), json!({}), None).unwrap();

    let faults = registry.active_for_entity("UAV_1");
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].key.entity_id, "UAV_1");
}
