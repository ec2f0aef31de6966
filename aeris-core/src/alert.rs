//! Alert types published on the [`crate::bus::AlertBus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::telemetry::Subsystem;

/// Severity levels for alerts and faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// What an alert is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Anomaly,
    FaultInjected,
    FaultCleared,
}

/// Fan-out notification of an anomaly or fault lifecycle event.
///
/// Retention is a subscriber's concern; the core publishes and forgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: AlertKind,
    pub entity_id: String,
    pub subsystem: Subsystem,
    pub severity: Severity,
    pub message: String,
    pub data: serde_json::Value,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        entity_id: impl Into<String>,
        subsystem: Subsystem,
        severity: Severity,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            entity_id: entity_id.into(),
            subsystem,
            severity,
            message: message.into(),
            data,
        }
    }
}
