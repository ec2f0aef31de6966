use crate::fault::FaultRecord;
use crate::telemetry::TelemetryRecord;

/// Capability interface for per-subsystem telemetry producers.
///
/// Producers are thin collaborators outside the core; this seam lets the
/// orchestrator drive any subsystem generator and lets active faults distort
/// its output before it reaches the scoring engine.
pub trait ITelemetrySource: Send {
    /// Produce the next raw telemetry observation.
    fn generate(&mut self) -> TelemetryRecord;

    /// Distort a pending observation according to an active fault.
    fn apply_fault(&self, record: &mut TelemetryRecord, fault: &FaultRecord);
}
