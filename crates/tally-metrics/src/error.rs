use std::fmt;

/// Averaging strategy of an aggregate metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Averaging {
    /// Pool confusion counts across classes, then compute the rate.
    Micro,
    /// Compute the rate per class, then take the unweighted mean.
    Macro,
}

impl fmt::Display for Averaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micro => f.write_str("micro"),
            Self::Macro => f.write_str("macro"),
        }
    }
}

/// Errors from metric computation and label simulation.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Returned when the gold and predicted sequences differ in length.
    #[error("gold has {gold} labels but pred has {pred}")]
    LengthMismatch {
        /// Length of the gold sequence.
        gold: usize,
        /// Length of the predicted sequence.
        pred: usize,
    },

    /// Returned when both label sequences are empty.
    #[error("label sequences are empty")]
    EmptyInput,

    /// Returned when precision and recall are both zero, so their harmonic
    /// mean is undefined.
    #[error("{averaging} F1 is undefined: precision and recall are both zero")]
    UndefinedFscore {
        /// Which aggregate was requested.
        averaging: Averaging,
    },

    /// Returned when no prediction falls inside the evaluated class range.
    #[error("micro precision is undefined: no predictions for any evaluated class")]
    UndefinedPrecision,

    /// Returned when no gold label falls inside the evaluated class range.
    #[error("micro recall is undefined: no gold labels for any evaluated class")]
    UndefinedRecall,

    /// Returned when a simulation is requested with zero samples.
    #[error("n_samples must be at least 1, got {n_samples}")]
    InvalidSampleCount {
        /// The invalid n_samples value provided.
        n_samples: usize,
    },

    /// Returned when a simulation is requested with zero binomial trials.
    #[error("trials must be at least 1, got {trials}")]
    InvalidTrialCount {
        /// The invalid trials value provided.
        trials: usize,
    },

    /// Returned when the success probability is not in [0.0, 1.0].
    #[error("probability must be in [0.0, 1.0], got {probability}")]
    InvalidProbability {
        /// The invalid probability value provided.
        probability: f64,
    },
}
