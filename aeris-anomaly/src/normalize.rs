//! Per-feature standardization fitted over a window's current contents.
//!
//! Fitting fixes the feature order for the model: the union of feature names
//! present anywhere in the window, in sorted order. Transforming a vector
//! that misses some of those features imputes the fitted mean (zero after
//! standardization), so ragged observations keep a stable dimensionality.

use std::collections::BTreeSet;

use aeris_core::errors::DetectionError;
use aeris_core::telemetry::FeatureVector;

const STD_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    order: Vec<String>,
    means: Vec<f64>,
    stds: Vec<f64>,
    fitted: bool,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Feature order fixed at fit time.
    pub fn feature_order(&self) -> &[String] {
        &self.order
    }

    /// Fit mean and standard deviation per feature over the window.
    ///
    /// A feature's statistics come from the samples that carry it; constant
    /// features get unit scale so they pass through centered at zero.
    pub fn fit(&mut self, window: &[FeatureVector]) -> Result<(), DetectionError> {
        if window.is_empty() {
            return Err(DetectionError::DegenerateNormalizer {
                reason: "cannot fit on an empty window".into(),
            });
        }

        let names: BTreeSet<&String> = window.iter().flat_map(|v| v.keys()).collect();
        if names.is_empty() {
            return Err(DetectionError::DegenerateNormalizer {
                reason: "window holds no features".into(),
            });
        }

        let mut order = Vec::with_capacity(names.len());
        let mut means = Vec::with_capacity(names.len());
        let mut stds = Vec::with_capacity(names.len());

        for name in names {
            let values: Vec<f64> = window.iter().filter_map(|v| v.get(name)).copied().collect();
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();

            order.push(name.clone());
            means.push(mean);
            stds.push(if std <= STD_EPSILON { 1.0 } else { std });
        }

        self.order = order;
        self.means = means;
        self.stds = stds;
        self.fitted = true;
        Ok(())
    }

    /// Standardize one vector into the fitted feature order.
    pub fn transform(&self, vector: &FeatureVector) -> Result<Vec<f64>, DetectionError> {
        if !self.fitted {
            return Err(DetectionError::NotFitted);
        }
        Ok(self
            .order
            .iter()
            .enumerate()
            .map(|(i, name)| match vector.get(name) {
                Some(x) => (x - self.means[i]) / self.stds[i],
                // Missing feature: impute the fitted mean.
                None => 0.0,
            })
            .collect())
    }

    /// Standardize a whole window.
    pub fn transform_window(
        &self,
        window: &[FeatureVector],
    ) -> Result<Vec<Vec<f64>>, DetectionError> {
        window.iter().map(|v| self.transform(v)).collect()
    }
}
