//! Isolation-forest variant: an ensemble of randomly built trees where
//! anomalies isolate in fewer splits than in-distribution points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use aeris_core::errors::DetectionError;
use aeris_core::traits::{DetectorKind, IDetectorModel};

const DEFAULT_TREES: usize = 100;
const DEFAULT_CONTAMINATION: f64 = 0.1;
const MAX_TREE_SAMPLES: usize = 256;
const RNG_SEED: u64 = 42;
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

enum Node {
    Leaf { size: usize },
    Split {
        feature: usize,
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

pub struct IsolationForest {
    n_trees: usize,
    contamination: f64,
    trees: Vec<Node>,
    /// Subsample size the trees were grown on; drives the path normalizer.
    sample_size: usize,
    /// Contamination quantile of training natives; classify cutoff.
    offset: f64,
    fitted: bool,
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(DEFAULT_TREES, DEFAULT_CONTAMINATION)
    }
}

impl IsolationForest {
    pub fn new(n_trees: usize, contamination: f64) -> Self {
        Self {
            n_trees,
            contamination,
            trees: Vec::new(),
            sample_size: 0,
            offset: 0.0,
            fitted: false,
        }
    }

    /// Average unsuccessful-search path length in a BST of `n` nodes.
    fn c(n: usize) -> f64 {
        if n <= 1 {
            return 0.0;
        }
        let n = n as f64;
        2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
    }

    fn build_tree(samples: &[&[f64]], depth: usize, limit: usize, rng: &mut StdRng) -> Node {
        if depth >= limit || samples.len() <= 1 {
            return Node::Leaf {
                size: samples.len(),
            };
        }
        let dims = samples[0].len();
        if dims == 0 {
            return Node::Leaf {
                size: samples.len(),
            };
        }

        let feature = rng.gen_range(0..dims);
        let (min, max) = samples.iter().fold((f64::MAX, f64::MIN), |(lo, hi), s| {
            (lo.min(s[feature]), hi.max(s[feature]))
        });
        if max - min < f64::EPSILON {
            return Node::Leaf {
                size: samples.len(),
            };
        }

        let value = rng.gen_range(min..max);
        let (left, right): (Vec<&[f64]>, Vec<&[f64]>) =
            samples.iter().copied().partition(|s| s[feature] < value);

        Node::Split {
            feature,
            value,
            left: Box::new(Self::build_tree(&left, depth + 1, limit, rng)),
            right: Box::new(Self::build_tree(&right, depth + 1, limit, rng)),
        }
    }

    fn path_length(node: &Node, sample: &[f64], depth: f64) -> f64 {
        match node {
            Node::Leaf { size } => depth + Self::c(*size),
            Node::Split {
                feature,
                value,
                left,
                right,
            } => {
                let side = if sample.get(*feature).copied().unwrap_or(0.0) < *value {
                    left
                } else {
                    right
                };
                Self::path_length(side, sample, depth + 1.0)
            }
        }
    }

    /// Native decision score: positive for in-distribution points, negative
    /// for isolates. Equals 0.5 minus the canonical isolation score.
    fn native(&self, sample: &[f64]) -> f64 {
        let avg_path = self
            .trees
            .iter()
            .map(|t| Self::path_length(t, sample, 0.0))
            .sum::<f64>()
            / self.trees.len() as f64;
        let denom = Self::c(self.sample_size.max(2)).max(f64::EPSILON);
        let isolation = 2f64.powf(-avg_path / denom);
        0.5 - isolation
    }
}

impl IDetectorModel for IsolationForest {
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<(), DetectionError> {
        if samples.is_empty() {
            return Err(DetectionError::FitFailed {
                reason: "no samples".into(),
            });
        }

        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let sample_size = samples.len().min(MAX_TREE_SAMPLES);
        let limit = (sample_size as f64).log2().ceil().max(1.0) as usize;

        self.trees = (0..self.n_trees)
            .map(|_| {
                // Bootstrap subsample per tree.
                let subsample: Vec<&[f64]> = (0..sample_size)
                    .map(|_| samples[rng.gen_range(0..samples.len())].as_slice())
                    .collect();
                Self::build_tree(&subsample, 0, limit, &mut rng)
            })
            .collect();
        self.sample_size = sample_size;
        self.fitted = true;

        // Cutoff so roughly `contamination` of the training set classifies
        // as outlier.
        let mut natives: Vec<f64> = samples.iter().map(|s| self.native(s)).collect();
        natives.sort_by(|a, b| a.total_cmp(b));
        let idx = ((natives.len() as f64 * self.contamination) as usize)
            .min(natives.len().saturating_sub(1));
        self.offset = natives[idx];
        Ok(())
    }

    fn score(&self, sample: &[f64]) -> Result<f64, DetectionError> {
        if !self.fitted {
            return Err(DetectionError::NotFitted);
        }
        Ok(self.native(sample))
    }

    fn classify(&self, sample: &[f64]) -> Result<bool, DetectionError> {
        Ok(self.score(sample)? < self.offset)
    }

    fn kind(&self) -> DetectorKind {
        DetectorKind::IsolationForest
    }
}
