//! One-class-SVM-like variant, approximated as a centroid margin: the
//! fitted boundary is the (1 − nu) quantile of training distances to the
//! centroid, and the native score is the signed margin to that boundary.

use aeris_core::errors::DetectionError;
use aeris_core::traits::{DetectorKind, IDetectorModel};

const DEFAULT_NU: f64 = 0.1;

pub struct OneClassSvm {
    nu: f64,
    centroid: Vec<f64>,
    radius: f64,
    fitted: bool,
}

impl Default for OneClassSvm {
    fn default() -> Self {
        Self::new(DEFAULT_NU)
    }
}

impl OneClassSvm {
    pub fn new(nu: f64) -> Self {
        Self {
            nu,
            centroid: Vec::new(),
            radius: 0.0,
            fitted: false,
        }
    }

    fn distance(&self, sample: &[f64]) -> f64 {
        self.centroid
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let x = sample.get(i).copied().unwrap_or(0.0);
                (x - c).powi(2)
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Signed margin, scaled so in-distribution points sit in roughly
    /// [0, 0.5] and points past the boundary go negative.
    fn native(&self, sample: &[f64]) -> f64 {
        let r = self.radius.max(f64::EPSILON);
        ((r - self.distance(sample)) / (2.0 * r)).clamp(-1.0, 1.0)
    }
}

impl IDetectorModel for OneClassSvm {
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<(), DetectionError> {
        if samples.is_empty() {
            return Err(DetectionError::FitFailed {
                reason: "no samples".into(),
            });
        }
        let dims = samples[0].len();
        if dims == 0 {
            return Err(DetectionError::FitFailed {
                reason: "zero-dimensional samples".into(),
            });
        }

        let n = samples.len() as f64;
        let mut centroid = vec![0.0; dims];
        for s in samples {
            for (i, x) in s.iter().enumerate() {
                centroid[i] += x / n;
            }
        }
        self.centroid = centroid;

        let mut distances: Vec<f64> = samples.iter().map(|s| self.distance(s)).collect();
        distances.sort_by(|a, b| a.total_cmp(b));
        let idx = ((distances.len() as f64 * (1.0 - self.nu)) as usize)
            .min(distances.len().saturating_sub(1));
        self.radius = distances[idx].max(f64::EPSILON);
        self.fitted = true;
        Ok(())
    }

    fn score(&self, sample: &[f64]) -> Result<f64, DetectionError> {
        if !self.fitted {
            return Err(DetectionError::NotFitted);
        }
        Ok(self.native(sample))
    }

    fn classify(&self, sample: &[f64]) -> Result<bool, DetectionError> {
        if !self.fitted {
            return Err(DetectionError::NotFitted);
        }
        Ok(self.distance(sample) > self.radius)
    }

    fn kind(&self) -> DetectorKind {
        DetectorKind::OneClassSvm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                vec![a.cos(), a.sin()]
            })
            .collect()
    }

    #[test]
    fn point_outside_boundary_is_outlier() {
        let mut model = OneClassSvm::default();
        model.fit(&ring(40)).unwrap();
        assert!(model.classify(&[8.0, 8.0]).unwrap());
        assert!(!model.classify(&[0.1, 0.1]).unwrap());
    }

    #[test]
    fn native_is_higher_for_inliers() {
        let mut model = OneClassSvm::default();
        model.fit(&ring(40)).unwrap();
        let inlier = model.score(&[0.0, 0.0]).unwrap();
        let outlier = model.score(&[8.0, 8.0]).unwrap();
        assert!(inlier > outlier);
    }
}
