//! Accuracy, per-class rates, and micro/macro aggregates.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument, warn};

use crate::confusion::{ConfusionCounts, accumulate};
use crate::error::{Averaging, MetricsError};
use crate::report::{Averages, ClassMetrics, EvaluationReport};

/// Classification metrics for one gold/predicted pair.
///
/// All counts are computed once in [`Evaluator::new`]; every query is a pure
/// read of that snapshot, so an `Evaluator` can be shared across threads.
///
/// The class set is the distinct values of `gold`, assumed to be the
/// contiguous range `0..n_classes`. Per-class precision, recall and F1 are
/// forced to `0.0` for any class that never occurs in `pred`.
#[derive(Debug, Clone)]
pub struct Evaluator {
    counts: ConfusionCounts,
    predicted: Vec<bool>,
    n_samples: usize,
    n_correct: usize,
}

impl Evaluator {
    /// Build an evaluator from aligned gold and predicted class indices.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MetricsError::LengthMismatch`] | `gold` and `pred` differ in length |
    /// | [`MetricsError::EmptyInput`] | Zero labels provided |
    #[instrument(skip_all, fields(n_samples = gold.len()))]
    pub fn new(gold: &[usize], pred: &[usize]) -> Result<Self, MetricsError> {
        if gold.len() != pred.len() {
            return Err(MetricsError::LengthMismatch {
                gold: gold.len(),
                pred: pred.len(),
            });
        }
        if gold.is_empty() {
            return Err(MetricsError::EmptyInput);
        }

        let n_classes = gold.iter().collect::<HashSet<_>>().len();
        if let Some(&max_label) = gold.iter().max()
            && max_label >= n_classes
        {
            warn!(
                n_classes,
                max_label, "gold labels are not contiguous from 0; labels >= n_classes are not evaluated"
            );
        }

        let acc = accumulate(gold, pred, n_classes);
        debug!(n_classes, n_correct = acc.n_correct, "confusion counts accumulated");

        Ok(Self {
            counts: acc.counts,
            predicted: acc.predicted,
            n_samples: gold.len(),
            n_correct: acc.n_correct,
        })
    }

    /// Return the number of evaluated classes (distinct gold labels).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.counts.n_classes()
    }

    /// Return the number of label pairs.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Return the per-class confusion counts.
    #[must_use]
    pub fn counts(&self) -> &ConfusionCounts {
        &self.counts
    }

    /// Whether `class` occurs anywhere in the predicted sequence.
    #[must_use]
    pub fn is_predicted(&self, class: usize) -> bool {
        self.predicted.get(class).copied().unwrap_or(false)
    }

    /// Fraction of positions where the prediction equals the gold label.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.n_correct as f64 / self.n_samples as f64
    }

    /// Precision `tp / (tp + fp)` per class, `0.0` for classes never predicted.
    #[must_use]
    pub fn precision_per_class(&self) -> Vec<f64> {
        (0..self.n_classes())
            .map(|i| {
                if self.predicted[i] {
                    ratio(self.counts.tp[i], self.counts.tp[i] + self.counts.fp[i])
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Recall `tp / (tp + fn)` per class, `0.0` for classes never predicted.
    ///
    /// The guard is on the class occurring in `pred`, not on the denominator.
    #[must_use]
    pub fn recall_per_class(&self) -> Vec<f64> {
        (0..self.n_classes())
            .map(|i| {
                if self.predicted[i] {
                    ratio(self.counts.tp[i], self.counts.tp[i] + self.counts.fn_[i])
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Harmonic mean of each class's precision and recall, `0.0` for classes
    /// never predicted.
    ///
    /// A class that is predicted but never correctly has precision and recall
    /// of zero; its F1 is `0 / 0` and comes back as `f64::NAN`.
    #[must_use]
    pub fn fscore_per_class(&self) -> Vec<f64> {
        let precision = self.precision_per_class();
        let recall = self.recall_per_class();
        precision
            .iter()
            .zip(&recall)
            .zip(&self.predicted)
            .map(|((&p, &r), &predicted)| {
                if predicted {
                    2.0 * p * r / (p + r)
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Unweighted mean of per-class precision over all classes.
    #[must_use]
    pub fn macro_precision(&self) -> f64 {
        mean(&self.precision_per_class())
    }

    /// Unweighted mean of per-class recall over all classes.
    #[must_use]
    pub fn macro_recall(&self) -> f64 {
        mean(&self.recall_per_class())
    }

    /// Harmonic mean of [`macro_precision`](Self::macro_precision) and
    /// [`macro_recall`](Self::macro_recall).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UndefinedFscore`] if both are zero.
    pub fn macro_fscore(&self) -> Result<f64, MetricsError> {
        harmonic_mean(self.macro_precision(), self.macro_recall()).ok_or(
            MetricsError::UndefinedFscore {
                averaging: Averaging::Macro,
            },
        )
    }

    /// Pooled precision `sum(tp) / (sum(tp) + sum(fp))`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UndefinedPrecision`] if every prediction lies
    /// outside the evaluated classes.
    pub fn micro_precision(&self) -> Result<f64, MetricsError> {
        let tp = self.counts.total_tp();
        let denominator = tp + self.counts.total_fp();
        if denominator == 0 {
            return Err(MetricsError::UndefinedPrecision);
        }
        Ok(tp as f64 / denominator as f64)
    }

    /// Pooled recall `sum(tp) / (sum(tp) + sum(fn))`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UndefinedRecall`] if no gold label lies inside
    /// the evaluated classes, which only happens when gold labels do not
    /// start at 0.
    pub fn micro_recall(&self) -> Result<f64, MetricsError> {
        let tp = self.counts.total_tp();
        let denominator = tp + self.counts.total_fn();
        if denominator == 0 {
            return Err(MetricsError::UndefinedRecall);
        }
        Ok(tp as f64 / denominator as f64)
    }

    /// Harmonic mean of [`micro_precision`](Self::micro_precision) and
    /// [`micro_recall`](Self::micro_recall).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MetricsError::UndefinedPrecision`] | Micro precision is undefined |
    /// | [`MetricsError::UndefinedRecall`] | Micro recall is undefined |
    /// | [`MetricsError::UndefinedFscore`] | Both are zero |
    pub fn micro_fscore(&self) -> Result<f64, MetricsError> {
        harmonic_mean(self.micro_precision()?, self.micro_recall()?).ok_or(
            MetricsError::UndefinedFscore {
                averaging: Averaging::Micro,
            },
        )
    }

    /// Per-class precision, recall, F1, support and raw counts.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let precision = self.precision_per_class();
        let recall = self.recall_per_class();
        let f1 = self.fscore_per_class();
        (0..self.n_classes())
            .map(|class| ClassMetrics {
                class,
                precision: precision[class],
                recall: recall[class],
                f1: f1[class],
                support: self.counts.tp[class] + self.counts.fn_[class],
                tp: self.counts.tp[class],
                fp: self.counts.fp[class],
                fn_: self.counts.fn_[class],
            })
            .collect()
    }

    /// Collect every metric into a serializable report.
    ///
    /// Undefined aggregates are reported as `None` instead of failing.
    #[must_use]
    pub fn report(&self) -> EvaluationReport {
        EvaluationReport {
            n_samples: self.n_samples,
            n_classes: self.n_classes(),
            accuracy: self.accuracy(),
            classes: self.class_metrics(),
            macro_avg: Averages {
                precision: Some(self.macro_precision()),
                recall: Some(self.macro_recall()),
                f1: self.macro_fscore().ok(),
            },
            micro_avg: Averages {
                precision: self.micro_precision().ok(),
                recall: self.micro_recall().ok(),
                f1: self.micro_fscore().ok(),
            },
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>9} {:>9} {:>9} {:>8}",
            "class", "precision", "recall", "f1", "support"
        )?;
        for m in self.class_metrics() {
            writeln!(
                f,
                "{:>8} {:>9.4} {:>9.4} {:>9.4} {:>8}",
                m.class, m.precision, m.recall, m.f1, m.support
            )?;
        }
        write!(
            f,
            "accuracy {:.4} over {} samples",
            self.accuracy(),
            self.n_samples
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `2pr / (p + r)`, or `None` when `p + r` is zero.
fn harmonic_mean(p: f64, r: f64) -> Option<f64> {
    let sum = p + r;
    if sum == 0.0 {
        None
    } else {
        Some(2.0 * p * r / sum)
    }
}
