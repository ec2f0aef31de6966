//! FaultScheduler — the periodic control loop over the registry.
//!
//! Each tick sweeps expired faults, then draws one Bernoulli trial per
//! enabled scenario; a success injects against a randomly chosen entity.
//! Rejections (cap, duplicate) are skipped, not retried within the tick.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use aeris_core::config::FaultInjectionConfig;
use aeris_core::errors::FaultError;
use aeris_core::fault::{FaultKey, FaultScenario};

use crate::registry::FaultRegistry;

pub struct FaultScheduler {
    registry: Arc<FaultRegistry>,
    scenarios: Vec<FaultScenario>,
    entities: Vec<String>,
    tick_interval: std::time::Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FaultScheduler {
    /// Build a scheduler over `registry`, injecting against `entities`.
    pub fn new(
        config: &FaultInjectionConfig,
        registry: Arc<FaultRegistry>,
        entities: Vec<String>,
    ) -> Self {
        Self {
            registry,
            scenarios: config.scenarios.clone(),
            entities,
            tick_interval: std::time::Duration::from_millis(config.tick_interval_ms),
            task: Mutex::new(None),
        }
    }

    /// One scheduler pass: sweep, then evaluate every enabled scenario.
    ///
    /// A scenario's rejection or error never blocks the scenarios after it.
    pub fn run_tick(&self, now: DateTime<Utc>) {
        let swept = self.registry.sweep(now);
        if swept > 0 {
            debug!(swept, "swept expired faults");
        }

        let mut rng = rand::thread_rng();
        for scenario in &self.scenarios {
            if !scenario.enabled {
                continue;
            }
            if rng.gen::<f64>() >= scenario.per_tick_probability {
                continue;
            }
            let Some(entity) = self.pick_entity(&mut rng) else {
                debug!(scenario = %scenario.name, "no entities to inject against");
                continue;
            };

            let key = FaultKey::new(entity, scenario.subsystem, scenario.kind);
            match self.registry.inject(
                key,
                scenario.parameters.clone(),
                Some(ChronoDuration::seconds(scenario.duration_secs as i64)),
            ) {
                Ok(record) => {
                    info!(scenario = %scenario.name, key = %record.key, "scenario fired")
                }
                // Cap or duplicate: skip silently until the next tick.
                Err(FaultError::AlreadyActive { .. }) | Err(FaultError::CapacityReached { .. }) => {
                }
                Err(e) => error!(scenario = %scenario.name, error = %e, "scenario injection failed"),
            }
        }
    }

    fn pick_entity(&self, rng: &mut impl Rng) -> Option<String> {
        if self.entities.is_empty() {
            return None;
        }
        Some(self.entities[rng.gen_range(0..self.entities.len())].clone())
    }

    /// Spawn the periodic tick task. Idempotent; a second call is a no-op
    /// while the loop is running.
    pub fn start(self: &Arc<Self>) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if task.is_some() {
            return;
        }
        let scheduler = Arc::clone(self);
        *task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(scheduler.tick_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                scheduler.run_tick(Utc::now());
            }
        }));
        info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            scenarios = self.scenarios.len(),
            "fault scheduler started"
        );
    }

    /// Stop the tick loop and clear every active fault so no state leaks
    /// across restarts.
    pub async fn stop(&self) {
        let handle = {
            let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
            task.take()
        };
        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
        }
        let cleared = self.registry.clear_all();
        info!(cleared, "fault scheduler stopped");
    }
}
