//! Local-outlier-factor variant: compares a sample's local reachability
//! density against that of its k nearest training neighbors. Inliers score
//! a factor near 1; isolated points score higher.

use aeris_core::errors::DetectionError;
use aeris_core::traits::{DetectorKind, IDetectorModel};

const DEFAULT_NEIGHBORS: usize = 20;
const DEFAULT_CONTAMINATION: f64 = 0.1;

pub struct LocalOutlierFactor {
    k: usize,
    contamination: f64,
    train: Vec<Vec<f64>>,
    /// k-distance per training point.
    k_dists: Vec<f64>,
    /// Local reachability density per training point.
    lrds: Vec<f64>,
    /// Classify cutoff: (1 − contamination) quantile of training factors.
    cutoff: f64,
    fitted: bool,
}

impl Default for LocalOutlierFactor {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS, DEFAULT_CONTAMINATION)
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl LocalOutlierFactor {
    pub fn new(k: usize, contamination: f64) -> Self {
        Self {
            k,
            contamination,
            train: Vec::new(),
            k_dists: Vec::new(),
            lrds: Vec::new(),
            cutoff: 1.5,
            fitted: false,
        }
    }

    fn effective_k(&self, n: usize) -> usize {
        self.k.min(n.saturating_sub(1)).max(1)
    }

    /// Indices and distances of the k nearest training points to `sample`,
    /// excluding index `exclude` (for leave-one-out over the training set).
    fn neighbors(&self, sample: &[f64], exclude: Option<usize>) -> Vec<(usize, f64)> {
        let k = self.effective_k(self.train.len());
        let mut dists: Vec<(usize, f64)> = self
            .train
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude)
            .map(|(i, p)| (i, euclidean(sample, p)))
            .collect();
        dists.sort_by(|a, b| a.1.total_cmp(&b.1));
        dists.truncate(k);
        dists
    }

    fn lrd_of(&self, neighbors: &[(usize, f64)]) -> f64 {
        let reach_sum: f64 = neighbors
            .iter()
            .map(|(i, d)| d.max(self.k_dists[*i]))
            .sum();
        if reach_sum <= f64::EPSILON {
            // Duplicated points: density is effectively unbounded.
            return f64::MAX;
        }
        neighbors.len() as f64 / reach_sum
    }

    fn factor(&self, sample: &[f64], exclude: Option<usize>) -> f64 {
        let neighbors = self.neighbors(sample, exclude);
        let lrd = self.lrd_of(&neighbors);
        if lrd == f64::MAX {
            return 1.0;
        }
        let ratio_sum: f64 = neighbors.iter().map(|(i, _)| self.lrds[*i] / lrd).sum();
        ratio_sum / neighbors.len() as f64
    }

    /// Native score: 1 − LOF, so inliers sit near 0 and lower means more
    /// anomalous.
    fn native(&self, sample: &[f64]) -> f64 {
        1.0 - self.factor(sample, None)
    }
}

impl IDetectorModel for LocalOutlierFactor {
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<(), DetectionError> {
        if samples.len() < 2 {
            return Err(DetectionError::FitFailed {
                reason: "need at least two samples".into(),
            });
        }
        self.train = samples.to_vec();

        let n = self.train.len();
        let k = self.effective_k(n);

        // Pass 1: k-distance per training point (leave-one-out).
        let mut k_dists = Vec::with_capacity(n);
        let mut all_neighbors = Vec::with_capacity(n);
        for i in 0..n {
            let mut dists: Vec<(usize, f64)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, euclidean(&self.train[i], &self.train[j])))
                .collect();
            dists.sort_by(|a, b| a.1.total_cmp(&b.1));
            dists.truncate(k);
            k_dists.push(dists.last().map(|(_, d)| *d).unwrap_or(0.0));
            all_neighbors.push(dists);
        }
        self.k_dists = k_dists;

        // Pass 2: local reachability density per training point.
        self.lrds = all_neighbors
            .iter()
            .map(|nbrs| self.lrd_of(nbrs))
            .collect();

        // Pass 3: factors over the training set set the classify cutoff.
        let mut factors: Vec<f64> = (0..n)
            .map(|i| self.factor(&self.train[i], Some(i)))
            .collect();
        factors.sort_by(|a, b| a.total_cmp(b));
        let idx = ((n as f64 * (1.0 - self.contamination)) as usize).min(n - 1);
        self.cutoff = factors[idx].max(1.0);

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
        Ok(self.factor(sample, None) > self.cutoff)
    }

    fn kind(&self) -> DetectorKind {
        DetectorKind::LocalOutlierFactor
    }
}
