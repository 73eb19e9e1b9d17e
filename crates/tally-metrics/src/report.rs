//! Serializable snapshot of every metric an [`Evaluator`](crate::Evaluator) exposes.

use serde::Serialize;

/// Per-class precision, recall, F1, support, and raw counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// The class index.
    pub class: usize,
    /// Precision: TP / (TP + FP). 0.0 if the class is never predicted.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if the class is never predicted.
    pub recall: f64,
    /// F1: harmonic mean of precision and recall. 0.0 if the class is never
    /// predicted; NaN (serialized as `null`) if it is predicted but never
    /// correctly.
    pub f1: f64,
    /// Number of gold samples in this class.
    pub support: usize,
    /// True positives.
    pub tp: usize,
    /// False positives.
    pub fp: usize,
    /// False negatives.
    #[serde(rename = "fn")]
    pub fn_: usize,
}

/// Precision, recall and F1 under one averaging strategy.
///
/// `None` marks a value that is undefined for this input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    /// Averaged precision.
    pub precision: Option<f64>,
    /// Averaged recall.
    pub recall: Option<f64>,
    /// Harmonic mean of `precision` and `recall`.
    pub f1: Option<f64>,
}

/// All metrics for one gold/predicted pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Number of label pairs.
    pub n_samples: usize,
    /// Number of distinct gold classes.
    pub n_classes: usize,
    /// Fraction of exact matches.
    pub accuracy: f64,
    /// Per-class breakdown, indexed by class.
    pub classes: Vec<ClassMetrics>,
    /// Macro-averaged precision, recall, F1.
    pub macro_avg: Averages,
    /// Micro-averaged precision, recall, F1.
    pub micro_avg: Averages,
}

#[cfg(test)]
mod tests {
    use crate::Evaluator;

    #[test]
    fn serializes_fn_field_name() {
        let report = Evaluator::new(&[0, 1], &[0, 0]).unwrap().report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["classes"][1]["fn"], 1);
        assert_eq!(json["classes"][0]["fp"], 1);
        assert!(json["classes"][0].get("fn_").is_none());
    }

    #[test]
    fn undefined_class_f1_serializes_as_null() {
        // Class 1 is predicted once but never correctly.
        let report = Evaluator::new(&[0, 0, 1], &[1, 0, 0]).unwrap().report();
        assert!(report.classes[1].f1.is_nan());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["classes"][1]["f1"].is_null());
        assert_eq!(json["classes"][0]["f1"], 0.5);
    }

    #[test]
    fn undefined_aggregate_serializes_as_null() {
        let report = Evaluator::new(&[0, 0], &[3, 3]).unwrap().report();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["macro_avg"]["f1"].is_null());
        assert!(json["micro_avg"]["precision"].is_null());
        assert_eq!(json["n_classes"], 1);
    }
}
