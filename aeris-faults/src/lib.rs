//! # aeris-faults
//!
//! Fault lifecycle for the Aeris simulator: an authoritative registry of
//! currently active faults and a periodic scheduler that sweeps expired
//! records and probabilistically injects new ones from configured scenarios.

pub mod registry;
pub mod scenarios;
pub mod scheduler;

pub use registry::FaultRegistry;
pub use scheduler::FaultScheduler;
