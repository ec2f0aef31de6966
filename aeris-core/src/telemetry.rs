//! Telemetry identity and record types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UAV subsystems that emit telemetry and can carry faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Navigation,
    Propulsion,
    Power,
    Communication,
    Payload,
    Environmental,
    FlightControl,
    SensorFusion,
    MissionPlanning,
    SafetySystems,
    DataStorage,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subsystem::Navigation => "navigation",
            Subsystem::Propulsion => "propulsion",
            Subsystem::Power => "power",
            Subsystem::Communication => "communication",
            Subsystem::Payload => "payload",
            Subsystem::Environmental => "environmental",
            Subsystem::FlightControl => "flight_control",
            Subsystem::SensorFusion => "sensor_fusion",
            Subsystem::MissionPlanning => "mission_planning",
            Subsystem::SafetySystems => "safety_systems",
            Subsystem::DataStorage => "data_storage",
        };
        f.write_str(name)
    }
}

/// Identity under which telemetry is windowed and scored independently.
///
/// Created on first observation for the pair; never merged or split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamKey {
    pub entity_id: String,
    pub subsystem: Subsystem,
}

impl StreamKey {
    pub fn new(entity_id: impl Into<String>, subsystem: Subsystem) -> Self {
        Self {
            entity_id: entity_id.into(),
            subsystem,
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_id, self.subsystem)
    }
}

/// One raw telemetry observation: nested key/value payload plus identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub entity_id: String,
    pub subsystem: Subsystem,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl TelemetryRecord {
    pub fn new(
        entity_id: impl Into<String>,
        subsystem: Subsystem,
        data: serde_json::Value,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            subsystem,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn stream_key(&self) -> StreamKey {
        StreamKey::new(self.entity_id.clone(), self.subsystem)
    }
}

/// Ordered feature name → value mapping. Unresolvable features are omitted,
/// never zero-filled, so dimensionality can vary between observations.
pub type FeatureVector = BTreeMap<String, f64>;
