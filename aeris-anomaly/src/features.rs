//! Feature extraction from nested telemetry payloads.
//!
//! Each configured feature resolves through a list of candidate paths; the
//! first path that reaches a numeric value wins. Features that resolve
//! nowhere are omitted rather than zero-filled — the normalizer imputes them
//! later, so an absent sensor does not read as a zeroed sensor.

use serde_json::Value;

use aeris_core::telemetry::{FeatureVector, Subsystem, TelemetryRecord};

/// Candidate paths for the common feature set. Order matters: the first
/// fully-resolving path is taken.
fn candidate_paths(feature: &str) -> &'static [&'static [&'static str]] {
    match feature {
        "cpu_usage" => &[&["system", "cpu_usage"]],
        "memory_usage" => &[&["system", "memory_usage"]],
        "temperature" => &[
            &["temperature"],
            &["battery", "temperature"],
            &["motors", "motor_1", "temperature"],
        ],
        "voltage" => &[
            &["voltage"],
            &["battery", "voltage"],
            &["motors", "motor_1", "voltage"],
        ],
        "current" => &[
            &["current"],
            &["battery", "current"],
            &["motors", "motor_1", "current"],
        ],
        "altitude" => &[&["position", "altitude"], &["altitude"]],
        "speed" => &[&["velocity", "speed"], &["speed"]],
        "battery_level" => &[
            &["battery", "state_of_charge"],
            &["battery", "remaining_capacity"],
        ],
        _ => &[],
    }
}

/// Maps a raw telemetry record to a flat numeric feature vector.
///
/// Stateless and side-effect free; an empty result is the expected outcome
/// for records the configured feature set cannot see into.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    features: Vec<String>,
}

impl FeatureExtractor {
    pub fn new(features: Vec<String>) -> Self {
        Self { features }
    }

    /// Resolve the configured features plus subsystem-specific enrichment.
    pub fn extract(&self, record: &TelemetryRecord) -> FeatureVector {
        let mut out = FeatureVector::new();

        for name in &self.features {
            if let Some(value) = resolve_feature(&record.data, name) {
                out.insert(name.clone(), value);
            }
        }

        extract_subsystem_features(&record.data, record.subsystem, &mut out);
        out
    }
}

fn resolve_feature(data: &Value, feature: &str) -> Option<f64> {
    candidate_paths(feature)
        .iter()
        .find_map(|path| resolve_path(data, path))
}

fn resolve_path(data: &Value, path: &[&str]) -> Option<f64> {
    let mut current = data;
    for key in path {
        current = current.get(key)?;
    }
    current.as_f64()
}

fn extract_subsystem_features(data: &Value, subsystem: Subsystem, out: &mut FeatureVector) {
    match subsystem {
        Subsystem::Navigation => {
            if let Some(pos) = data.get("position") {
                insert_if_numeric(out, "latitude", pos.get("latitude"));
                insert_if_numeric(out, "longitude", pos.get("longitude"));
                insert_if_numeric(out, "altitude", pos.get("altitude"));
            }
            if let Some(att) = data.get("attitude") {
                insert_if_numeric(out, "heading", att.get("heading"));
                insert_if_numeric(out, "roll", att.get("roll"));
                insert_if_numeric(out, "pitch", att.get("pitch"));
            }
        }
        Subsystem::Propulsion => {
            if let Some(motors) = data.get("motors").and_then(Value::as_object) {
                let thrusts: Vec<f64> = motors
                    .values()
                    .filter_map(|m| m.get("thrust").and_then(Value::as_f64))
                    .collect();
                if !thrusts.is_empty() {
                    out.insert("total_thrust".into(), thrusts.iter().sum());
                }
                let temps: Vec<f64> = motors
                    .values()
                    .filter_map(|m| m.get("temperature").and_then(Value::as_f64))
                    .collect();
                if !temps.is_empty() {
                    out.insert(
                        "avg_motor_temp".into(),
                        temps.iter().sum::<f64>() / temps.len() as f64,
                    );
                }
            }
        }
        Subsystem::Power => {
            if let Some(battery) = data.get("battery") {
                insert_if_numeric(out, "battery_voltage", battery.get("voltage"));
                insert_if_numeric(out, "battery_current", battery.get("current"));
                insert_if_numeric(out, "battery_soc", battery.get("state_of_charge"));
            }
        }
        Subsystem::Communication => {
            if let Some(radio) = data.get("radio") {
                insert_if_numeric(out, "rssi", radio.get("rssi"));
                insert_if_numeric(out, "snr", radio.get("snr"));
                insert_if_numeric(out, "packet_loss", radio.get("packet_loss"));
            }
        }
        _ => {}
    }
}

fn insert_if_numeric(out: &mut FeatureVector, name: &str, value: Option<&Value>) {
    if let Some(v) = value.and_then(Value::as_f64) {
        out.insert(name.to_string(), v);
    }
}
