//! Per-stream sliding window owning the stream's model and normalizer.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use aeris_core::errors::DetectionError;
use aeris_core::telemetry::FeatureVector;
use aeris_core::traits::{DetectorKind, IDetectorModel};

use crate::detectors;
use crate::normalize::Normalizer;

/// What the model said about one observation, after score normalization.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Cross-variant-comparable anomaly score in [0, 1].
    pub score: f64,
    /// The model's own inlier/outlier verdict.
    pub model_verdict: bool,
}

/// Fixed-capacity, insertion-ordered buffer of recent feature vectors for
/// one stream key, plus the key's current model and fitted normalizer.
///
/// Not internally synchronized: all access for a given key goes through a
/// single logical owner (the engine's per-key map entry).
pub struct StreamWindow {
    buf: VecDeque<FeatureVector>,
    capacity: usize,
    min_samples: usize,
    model: Box<dyn IDetectorModel>,
    normalizer: Normalizer,
    last_retrain: DateTime<Utc>,
    trained: bool,
}

impl StreamWindow {
    pub fn new(capacity: usize, min_samples: usize, model: Box<dyn IDetectorModel>) -> Self {
        // Capacity 0 would let push exceed the length bound and make
        // fill_ratio divide by zero.
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            min_samples,
            model,
            normalizer: Normalizer::new(),
            last_retrain: Utc::now(),
            trained: false,
        }
    }

    /// Append an observation, evicting the oldest at capacity.
    pub fn push(&mut self, vector: FeatureVector) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(vector);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once the window holds enough samples for scoring to mean
    /// anything.
    pub fn is_warm(&self) -> bool {
        self.buf.len() >= self.min_samples
    }

    /// Window length relative to capacity, in [0, 1].
    pub fn fill_ratio(&self) -> f64 {
        self.buf.len() as f64 / self.capacity as f64
    }

    pub fn detector_kind(&self) -> DetectorKind {
        self.model.kind()
    }

    /// Iterate the buffered vectors oldest-first.
    pub fn contents(&self) -> impl Iterator<Item = &FeatureVector> {
        self.buf.iter()
    }

    /// Refit the normalizer and model over the current buffer when due.
    ///
    /// Fires when the retrain interval has elapsed, and once immediately on
    /// the first call after the window warms up so an untrained model can
    /// score at all. Training uses the current buffer only, so the baseline
    /// tracks the most recent observations.
    ///
    /// Returns whether a retrain happened.
    pub fn maybe_retrain(
        &mut self,
        now: DateTime<Utc>,
        interval: Duration,
    ) -> Result<bool, DetectionError> {
        if !self.is_warm() {
            return Ok(false);
        }
        if self.trained && now - self.last_retrain < interval {
            return Ok(false);
        }
        self.retrain(now)?;
        Ok(true)
    }

    fn retrain(&mut self, now: DateTime<Utc>) -> Result<(), DetectionError> {
        let window: Vec<FeatureVector> = self.buf.iter().cloned().collect();
        self.normalizer.fit(&window)?;
        let normalized = self.normalizer.transform_window(&window)?;
        self.model.fit(&normalized)?;
        self.trained = true;
        self.last_retrain = now;
        Ok(())
    }

    /// Normalize and score one observation through the current model.
    pub fn evaluate(&self, vector: &FeatureVector) -> Result<Evaluation, DetectionError> {
        let normalized = self.normalizer.transform(vector)?;
        let native = self.model.score(&normalized)?;
        let model_verdict = self.model.classify(&normalized)?;
        Ok(Evaluation {
            score: detectors::normalize_score(self.model.kind(), native),
            model_verdict,
        })
    }
}
