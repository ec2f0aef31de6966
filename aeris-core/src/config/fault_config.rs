use serde::{Deserialize, Serialize};

use super::defaults;
use crate::fault::FaultScenario;

/// Fault-injection subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultInjectionConfig {
    /// Disabled injection rejects every inject request.
    pub enabled: bool,
    /// Global cap on simultaneously active faults.
    pub max_concurrent: usize,
    /// Fault lifetime when the caller does not specify one.
    pub default_duration_secs: u64,
    /// Scheduler tick interval.
    pub tick_interval_ms: u64,
    /// Scenario templates evaluated once per tick.
    pub scenarios: Vec<FaultScenario>,
}

impl Default for FaultInjectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_concurrent: defaults::DEFAULT_MAX_CONCURRENT_FAULTS,
            default_duration_secs: defaults::DEFAULT_FAULT_DURATION_SECS,
            tick_interval_ms: defaults::DEFAULT_TICK_INTERVAL_MS,
            scenarios: Vec::new(),
        }
    }
}
