//! Default values shared by the config structs.

/// Sliding-window capacity per stream key.
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

/// Minimum samples before a window's model is considered warm.
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Seconds between model retrains per window.
pub const DEFAULT_RETRAIN_INTERVAL_SECS: u64 = 300;

/// Normalized score above which an observation is anomalous.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.8;

/// Normalized score above which an anomaly alert is HIGH rather than MEDIUM.
pub const HIGH_SEVERITY_SCORE: f64 = 0.9;

/// Global cap on simultaneously active faults.
pub const DEFAULT_MAX_CONCURRENT_FAULTS: usize = 3;

/// Fault lifetime when the caller does not specify one.
pub const DEFAULT_FAULT_DURATION_SECS: u64 = 30;

/// Scheduler tick interval.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Feature names extracted from every record regardless of subsystem.
pub fn default_features() -> Vec<String> {
    [
        "cpu_usage",
        "memory_usage",
        "temperature",
        "voltage",
        "current",
        "altitude",
        "speed",
        "battery_level",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
