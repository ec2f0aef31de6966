//! Fault identity, lifecycle records, and injection scenarios.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::Severity;
use crate::telemetry::Subsystem;

/// Kinds of simulated faults the registry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    // Navigation
    GpsDrift,
    GpsFailure,
    CompassError,
    // Propulsion
    MotorFailure,
    ThrustReduction,
    PropellerDamage,
    // Communication
    SignalLoss,
    Interference,
    BandwidthReduction,
    // Power
    BatteryFailure,
    VoltageDrop,
    ThermalRunaway,
    // Payload
    CameraFailure,
    SensorFailure,
    DataCorruption,
    // Flight control
    AutopilotFailure,
    ControlAuthorityLoss,
    ServoFailure,
    // Safety
    ParachuteFailure,
    GeofenceFailure,
    // Storage
    StorageFailure,
    PerformanceDegradation,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde snake_case name without quotes
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(s.trim_matches('"'))
    }
}

/// Unique identity of an active fault: (entity, subsystem, kind).
///
/// Re-injecting an active triple is a rejection, never an overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultKey {
    pub entity_id: String,
    pub subsystem: Subsystem,
    pub kind: FaultKind,
}

impl FaultKey {
    pub fn new(entity_id: impl Into<String>, subsystem: Subsystem, kind: FaultKind) -> Self {
        Self {
            entity_id: entity_id.into(),
            subsystem,
            kind,
        }
    }
}

impl fmt::Display for FaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.entity_id, self.subsystem, self.kind)
    }
}

/// A time-bounded simulated failure condition affecting one (entity, subsystem).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultRecord {
    pub key: FaultKey,
    pub parameters: serde_json::Value,
    pub severity: Severity,
    pub injected_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl FaultRecord {
    /// Whether the record has reached its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Config-time template from which the scheduler probabilistically
/// instantiates fault records. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultScenario {
    pub name: String,
    pub subsystem: Subsystem,
    pub kind: FaultKind,
    /// Bernoulli success probability per scheduler tick.
    pub per_tick_probability: f64,
    pub duration_secs: u64,
    pub severity: Severity,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}
