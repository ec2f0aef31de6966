/// Fault-registry rejections. Surfaced as `Err` the caller may treat as a
/// boolean outcome; nothing here is retried except by the scheduler's
/// natural next tick.
#[derive(Debug, thiserror::Error)]
pub enum FaultError {
    #[error("fault already active: {key}")]
    AlreadyActive { key: String },

    #[error("concurrent fault cap reached ({cap} active)")]
    CapacityReached { cap: usize },

    #[error("fault not active: {key}")]
    NotActive { key: String },

    #[error("fault injection is disabled")]
    Disabled,
}
