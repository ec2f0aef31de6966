//! Scenario catalog: severity per fault kind and the stock scenarios the
//! scheduler ships with.

use aeris_core::alert::Severity;
use aeris_core::fault::{FaultKind, FaultScenario};
use aeris_core::telemetry::Subsystem;

/// Severity a fault kind carries when injected.
pub fn severity_for(kind: FaultKind) -> Severity {
    use FaultKind::*;
    match kind {
        BatteryFailure | MotorFailure | AutopilotFailure | ParachuteFailure => Severity::Critical,
        SignalLoss | GpsFailure | ThrustReduction | ControlAuthorityLoss | ThermalRunaway => {
            Severity::High
        }
        GpsDrift | SensorFailure | CameraFailure | Interference | CompassError | VoltageDrop
        | PropellerDamage | ServoFailure | GeofenceFailure | StorageFailure
        | BandwidthReduction => Severity::Medium,
        DataCorruption | PerformanceDegradation => Severity::Low,
    }
}

/// The stock scenario templates. Probabilities are per scheduler tick.
pub fn stock_scenarios() -> Vec<FaultScenario> {
    [
        (
            "Power_Failure",
            Subsystem::Power,
            FaultKind::BatteryFailure,
            0.001,
            45,
        ),
        (
            "Communication_Loss",
            Subsystem::Communication,
            FaultKind::SignalLoss,
            0.002,
            30,
        ),
        (
            "Navigation_Drift",
            Subsystem::Navigation,
            FaultKind::GpsDrift,
            0.003,
            60,
        ),
        (
            "Sensor_Malfunction",
            Subsystem::Payload,
            FaultKind::SensorFailure,
            0.002,
            30,
        ),
        (
            "Propulsion_Reduction",
            Subsystem::Propulsion,
            FaultKind::ThrustReduction,
            0.001,
            40,
        ),
    ]
    .into_iter()
    .map(
        |(name, subsystem, kind, per_tick_probability, duration_secs)| FaultScenario {
            name: name.to_string(),
            subsystem,
            kind,
            per_tick_probability,
            duration_secs,
            severity: severity_for(kind),
            parameters: serde_json::json!({}),
            enabled: true,
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_kinds_map_to_critical() {
        assert_eq!(severity_for(FaultKind::BatteryFailure), Severity::Critical);
        assert_eq!(severity_for(FaultKind::ParachuteFailure), Severity::Critical);
    }

    #[test]
    fn stock_scenarios_are_enabled_and_probable() {
        let scenarios = stock_scenarios();
        assert_eq!(scenarios.len(), 5);
        for s in &scenarios {
            assert!(s.enabled);
            assert!((0.0..=1.0).contains(&s.per_tick_probability));
            assert!(s.duration_secs > 0);
        }
    }
}
