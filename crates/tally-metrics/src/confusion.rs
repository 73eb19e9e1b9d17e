//! Per-class confusion counts accumulated from aligned label sequences.

/// Per-class confusion counts, indexed by class `0..n_classes`.
///
/// Every count is derived from its own condition over the sample positions,
/// so `tp[i] + fp[i] + fn_[i] + tn[i]` is not the sample count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionCounts {
    /// Positions where `pred == gold == i`.
    pub tp: Vec<usize>,
    /// Positions where `pred == i` and `pred != gold`.
    pub fp: Vec<usize>,
    /// Positions where `gold == i` and `pred != gold`.
    pub fn_: Vec<usize>,
    /// Positions where `gold == i` and `pred == gold`.
    ///
    /// This is the legacy definition and equals `tp`; it is not a true
    /// negative count and no metric reads it.
    pub tn: Vec<usize>,
}

/// Counts plus the bookkeeping collected in the same pass.
#[derive(Debug)]
pub(crate) struct Accumulated {
    pub(crate) counts: ConfusionCounts,
    /// `predicted[i]` is true when class `i` occurs anywhere in `pred`.
    pub(crate) predicted: Vec<bool>,
    pub(crate) n_correct: usize,
}

impl ConfusionCounts {
    fn zeroed(n_classes: usize) -> Self {
        Self {
            tp: vec![0; n_classes],
            fp: vec![0; n_classes],
            fn_: vec![0; n_classes],
            tn: vec![0; n_classes],
        }
    }

    /// Return the number of evaluated classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.tp.len()
    }

    /// Sum of true positives over all classes.
    #[must_use]
    pub fn total_tp(&self) -> usize {
        self.tp.iter().sum()
    }

    /// Sum of false positives over all classes.
    #[must_use]
    pub fn total_fp(&self) -> usize {
        self.fp.iter().sum()
    }

    /// Sum of false negatives over all classes.
    #[must_use]
    pub fn total_fn(&self) -> usize {
        self.fn_.iter().sum()
    }
}

/// Accumulate confusion counts for classes `0..n_classes` in one pass.
///
/// Labels outside `0..n_classes` (in either sequence) still count toward
/// `n_correct` when they match but never touch a per-class count.
/// Callers guarantee `gold.len() == pred.len()`.
pub(crate) fn accumulate(gold: &[usize], pred: &[usize], n_classes: usize) -> Accumulated {
    let mut counts = ConfusionCounts::zeroed(n_classes);
    let mut predicted = vec![false; n_classes];
    let mut n_correct = 0;

    for (&g, &p) in gold.iter().zip(pred) {
        if let Some(seen) = predicted.get_mut(p) {
            *seen = true;
        }
        if g == p {
            n_correct += 1;
            if g < n_classes {
                counts.tp[g] += 1;
                counts.tn[g] += 1;
            }
        } else {
            if p < n_classes {
                counts.fp[p] += 1;
            }
            if g < n_classes {
                counts.fn_[g] += 1;
            }
        }
    }

    Accumulated {
        counts,
        predicted,
        n_correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_for_three_class_example() {
        let acc = accumulate(&[0, 0, 1, 1, 2], &[0, 1, 1, 2, 2], 3);
        assert_eq!(acc.counts.tp, vec![1, 1, 1]);
        assert_eq!(acc.counts.fp, vec![0, 1, 1]);
        assert_eq!(acc.counts.fn_, vec![1, 1, 0]);
        assert_eq!(acc.n_correct, 3);
        assert_eq!(acc.predicted, vec![true, true, true]);
    }

    #[test]
    fn tn_mirrors_tp() {
        let acc = accumulate(&[0, 1, 1, 2, 0], &[0, 1, 0, 2, 2], 3);
        assert_eq!(acc.counts.tn, acc.counts.tp);
    }

    #[test]
    fn out_of_range_prediction_only_counts_as_miss() {
        // Class 1 never occurs in gold, so only class 0 is evaluated.
        let acc = accumulate(&[0, 0, 0], &[1, 1, 1], 1);
        assert_eq!(acc.counts.tp, vec![0]);
        assert_eq!(acc.counts.fp, vec![0]);
        assert_eq!(acc.counts.fn_, vec![3]);
        assert_eq!(acc.predicted, vec![false]);
        assert_eq!(acc.n_correct, 0);
    }

    #[test]
    fn totals_sum_over_classes() {
        let acc = accumulate(&[0, 0, 1, 1, 2], &[0, 1, 1, 2, 2], 3);
        assert_eq!(acc.counts.total_tp(), 3);
        assert_eq!(acc.counts.total_fp(), 2);
        assert_eq!(acc.counts.total_fn(), 2);
        assert_eq!(acc.counts.n_classes(), 3);
    }
}
