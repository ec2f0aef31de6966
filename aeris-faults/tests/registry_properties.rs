use proptest::prelude::*;
use serde_json::json;

use aeris_core::bus::AlertBus;
use aeris_core::config::FaultInjectionConfig;
use aeris_core::fault::{FaultKey, FaultKind};
use aeris_core::telemetry::Subsystem;
use aeris_faults::FaultRegistry;

// ── Cap and conservation invariants ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// However many injection attempts arrive, the active set never
    /// exceeds the configured cap.
    #[test]
    fn active_set_never_exceeds_cap(
        cap in 1usize..6,
        entity_ids in prop::collection::vec(0u16..50, 1..40),
    ) {
        let config = FaultInjectionConfig {
            max_concurrent: cap,
            ..FaultInjectionConfig::default()
        };
        let registry = FaultRegistry::new(&config, AlertBus::new());

        for id in &entity_ids {
            let key = FaultKey::new(
                format!("UAV_{id}"),
                Subsystem::Navigation,
                FaultKind::GpsDrift,
            );
            let _ = registry.inject(key, json!({}), None);
            prop_assert!(registry.active_count() <= cap);
        }
    }

    /// Injections minus clears always equals the live active count.
    #[test]
    fn counters_balance_with_active_set(
        entity_ids in prop::collection::vec(0u16..10, 1..30),
    ) {
        let config = FaultInjectionConfig {
            max_concurrent: usize::MAX,
            ..FaultInjectionConfig::default()
        };
        let registry = FaultRegistry::new(&config, AlertBus::new());

        for (i, id) in entity_ids.iter().enumerate() {
            let key = FaultKey::new(
                format!("UAV_{id}"),
                Subsystem::Power,
                FaultKind::VoltageDrop,
            );
            if i % 3 == 2 {
                let _ = registry.clear(&key);
            } else {
                let _ = registry.inject(key, json!({}), None);
            }

            let stats = registry.statistics();
            prop_assert_eq!(
                stats.total_injected - stats.total_cleared,
                stats.active as u64
            );
        }
    }
}
