//! Seeded binomial label simulation for self-checks and benchmarks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::error::MetricsError;

/// Configuration for drawing independent gold and predicted label sequences
/// from a Binomial(`trials`, `probability`) distribution.
///
/// Construct via [`SimulationConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter     | Default |
/// |---------------|---------|
/// | `trials`      | 5       |
/// | `probability` | 0.5     |
/// | `seed`        | 42      |
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    n_samples: usize,
    trials: usize,
    probability: f64,
    seed: u64,
}

/// A simulated gold/predicted pair.
#[derive(Debug, Clone)]
pub struct SimulatedLabels {
    /// Gold class indices in `0..=trials`.
    pub gold: Vec<usize>,
    /// Predicted class indices in `0..=trials`, independent of `gold`.
    pub pred: Vec<usize>,
}

impl SimulationConfig {
    /// Create a new config drawing `n_samples` label pairs.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSampleCount`] if `n_samples` is zero.
    pub fn new(n_samples: usize) -> Result<Self, MetricsError> {
        if n_samples == 0 {
            return Err(MetricsError::InvalidSampleCount { n_samples });
        }
        Ok(Self {
            n_samples,
            trials: 5,
            probability: 0.5,
            seed: 42,
        })
    }

    /// Set the number of Bernoulli trials per draw.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the per-trial success probability.
    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw the gold and predicted sequences.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MetricsError::InvalidTrialCount`] | `trials` is zero |
    /// | [`MetricsError::InvalidProbability`] | `probability` not in [0.0, 1.0] |
    #[instrument(skip(self), fields(n_samples = self.n_samples, trials = self.trials))]
    pub fn generate(&self) -> Result<SimulatedLabels, MetricsError> {
        if self.trials == 0 {
            return Err(MetricsError::InvalidTrialCount {
                trials: self.trials,
            });
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(MetricsError::InvalidProbability {
                probability: self.probability,
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let gold = self.draw(&mut rng);
        let pred = self.draw(&mut rng);
        debug!(seed = self.seed, "labels simulated");

        Ok(SimulatedLabels { gold, pred })
    }

    fn draw(&self, rng: &mut ChaCha8Rng) -> Vec<usize> {
        (0..self.n_samples)
            .map(|_| {
                (0..self.trials)
                    .filter(|_| rng.gen_bool(self.probability))
                    .count()
            })
            .collect()
    }
}
