//! FaultRegistry — the authoritative map of currently active faults.
//!
//! All mutations run inside a single critical section; expiry and explicit
//! clearing are the same terminal transition with different triggers, so
//! both route through one clearance path for statistics and alerts.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use aeris_core::alert::{Alert, AlertKind, Severity};
use aeris_core::bus::AlertBus;
use aeris_core::config::FaultInjectionConfig;
use aeris_core::errors::FaultError;
use aeris_core::fault::{FaultKey, FaultRecord};
use aeris_core::models::FaultStats;

use crate::scenarios;

#[derive(Default)]
struct RegistryState {
    active: HashMap<FaultKey, FaultRecord>,
    total_injected: u64,
    total_cleared: u64,
    by_kind: BTreeMap<String, u64>,
    by_subsystem: BTreeMap<String, u64>,
    average_duration_secs: f64,
}

impl RegistryState {
    /// Shared terminal transition: remove, count, fold the observed
    /// lifetime into the running average. Returns the removed record and
    /// its lifetime in seconds.
    fn clear_record(&mut self, key: &FaultKey, now: DateTime<Utc>) -> Option<(FaultRecord, f64)> {
        let record = self.active.remove(key)?;
        self.total_cleared += 1;
        let duration = (now - record.injected_at).num_milliseconds() as f64 / 1000.0;
        let n = self.total_cleared as f64;
        self.average_duration_secs = (self.average_duration_secs * (n - 1.0) + duration) / n;
        Some((record, duration))
    }
}

/// Owns the active-fault map with an explicit lifecycle. Not a process-wide
/// singleton; each instance carries its own state and alert bus.
pub struct FaultRegistry {
    state: Mutex<RegistryState>,
    enabled: AtomicBool,
    max_concurrent: usize,
    default_duration: Duration,
    bus: AlertBus,
}

impl FaultRegistry {
    pub fn new(config: &FaultInjectionConfig, bus: AlertBus) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            enabled: AtomicBool::new(config.enabled),
            max_concurrent: config.max_concurrent,
            default_duration: Duration::seconds(config.default_duration_secs as i64),
            bus,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Activate a fault. Rejected when the triple is already active, the
    /// global cap is reached, or injection is disabled; a rejection never
    /// mutates the existing record.
    pub fn inject(
        &self,
        key: FaultKey,
        parameters: serde_json::Value,
        duration: Option<Duration>,
    ) -> Result<FaultRecord, FaultError> {
        if !self.enabled.load(Ordering::Relaxed) {
            return Err(FaultError::Disabled);
        }

        let record = {
            let mut state = self.lock();
            if state.active.contains_key(&key) {
                return Err(FaultError::AlreadyActive {
                    key: key.to_string(),
                });
            }
            if state.active.len() >= self.max_concurrent {
                return Err(FaultError::CapacityReached {
                    cap: self.max_concurrent,
                });
            }

            let now = Utc::now();
            let record = FaultRecord {
                key: key.clone(),
                parameters,
                severity: scenarios::severity_for(key.kind),
                injected_at: now,
                expires_at: now + duration.unwrap_or(self.default_duration),
            };
            state.active.insert(key.clone(), record.clone());
            state.total_injected += 1;
            *state.by_kind.entry(key.kind.to_string()).or_insert(0) += 1;
            *state
                .by_subsystem
                .entry(key.subsystem.to_string())
                .or_insert(0) += 1;
            record
        };

        info!(key = %key, severity = ?record.severity, "fault injected");
        self.bus.publish(Alert::new(
            AlertKind::FaultInjected,
            key.entity_id.clone(),
            key.subsystem,
            record.severity,
            format!("Fault injected: {}", key.kind),
            serde_json::to_value(&record).unwrap_or_default(),
        ));
        Ok(record)
    }

    /// Explicitly clear an active fault. Rejected when not active.
    pub fn clear(&self, key: &FaultKey) -> Result<FaultRecord, FaultError> {
        let now = Utc::now();
        let (record, duration) =
            self.lock()
                .clear_record(key, now)
                .ok_or_else(|| FaultError::NotActive {
                    key: key.to_string(),
                })?;

        self.publish_cleared(&record, duration);
        info!(key = %key, duration_secs = duration, "fault cleared");
        Ok(record)
    }

    /// Remove every record whose expiry has passed, routing each through
    /// the same clearance path as an explicit clear. Returns the number of
    /// records swept.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let cleared: Vec<(FaultRecord, f64)> = {
            let mut state = self.lock();
            let expired: Vec<FaultKey> = state
                .active
                .values()
                .filter(|r| r.is_expired(now))
                .map(|r| r.key.clone())
                .collect();
            expired
                .iter()
                .filter_map(|key| state.clear_record(key, now))
                .collect()
        };

        for (record, duration) in &cleared {
            info!(key = %record.key, "fault expired");
            self.publish_cleared(record, *duration);
        }
        cleared.len()
    }

    /// Clear every active fault regardless of expiry (shutdown path).
    pub fn clear_all(&self) -> usize {
        let now = Utc::now();
        let cleared: Vec<(FaultRecord, f64)> = {
            let mut state = self.lock();
            let keys: Vec<FaultKey> = state.active.keys().cloned().collect();
            keys.iter()
                .filter_map(|key| state.clear_record(key, now))
                .collect()
        };

        for (record, duration) in &cleared {
            self.publish_cleared(record, *duration);
        }
        if !cleared.is_empty() {
            info!(count = cleared.len(), "cleared all active faults");
        }
        cleared.len()
    }

    fn publish_cleared(&self, record: &FaultRecord, duration: f64) {
        self.bus.publish(Alert::new(
            AlertKind::FaultCleared,
            record.key.entity_id.clone(),
            record.key.subsystem,
            Severity::Low,
            format!("Fault cleared: {}", record.key.kind),
            serde_json::json!({ "cleared": true, "duration": duration }),
        ));
    }

    pub fn is_active(&self, key: &FaultKey) -> bool {
        self.lock().active.contains_key(key)
    }

    /// Consistent snapshot of the active set.
    pub fn active_faults(&self) -> Vec<FaultRecord> {
        self.lock().active.values().cloned().collect()
    }

    /// Active faults for one entity.
    pub fn active_for_entity(&self, entity_id: &str) -> Vec<FaultRecord> {
        self.lock()
            .active
            .values()
            .filter(|r| r.key.entity_id == entity_id)
            .cloned()
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Disabled injection rejects every inject request; active faults are
    /// left to expire or be cleared.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            warn!("fault injection disabled");
        }
    }

    /// Read-only counters snapshot.
    pub fn statistics(&self) -> FaultStats {
        let state = self.lock();
        FaultStats {
            total_injected: state.total_injected,
            total_cleared: state.total_cleared,
            active: state.active.len(),
            by_kind: state.by_kind.clone(),
            by_subsystem: state.by_subsystem.clone(),
            average_duration_secs: state.average_duration_secs,
        }
    }
}
