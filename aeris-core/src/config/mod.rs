//! Configuration surface consumed by the core. Loading from an operator
//! file is a collaborator concern; the core only defines the shapes and
//! their defaults.

pub mod defaults;

mod detection_config;
mod fault_config;

pub use detection_config::DetectionConfig;
pub use fault_config::FaultInjectionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{AerisError, AerisResult};

/// Top-level configuration for both halves of the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AerisConfig {
    pub detection: DetectionConfig,
    pub faults: FaultInjectionConfig,
}

impl AerisConfig {
    /// Parse a TOML document into a config, falling back to defaults for
    /// anything omitted.
    pub fn from_toml_str(s: &str) -> AerisResult<Self> {
        toml::from_str(s).map_err(|e| AerisError::Config {
            reason: e.to_string(),
        })
    }
}
