//! Property checks for tally-metrics on deterministic synthetic labels.
//!
//! These tests pin down identities between the metrics that must hold for
//! any single-label multi-class input, using seeded random label sequences.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tally_metrics::{Evaluator, SimulationConfig};

// ---------------------------------------------------------------------------
// Helper: labels where every gold class is predicted at least once
// ---------------------------------------------------------------------------

/// Generate `n_samples` gold labels cycling over `n_classes`, and predictions
/// that keep the gold label with probability `keep`, else pick a random class.
///
/// The first `n_classes` predictions are forced correct so every class occurs
/// in both sequences.
fn make_labels(n_samples: usize, n_classes: usize, keep: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let gold: Vec<usize> = (0..n_samples).map(|i| i % n_classes).collect();
    let pred: Vec<usize> = gold
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            if i < n_classes || rng.gen_bool(keep) {
                g
            } else {
                rng.gen_range(0..n_classes)
            }
        })
        .collect();
    (gold, pred)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

#[test]
fn identical_sequences_score_one_everywhere() {
    let (gold, _) = make_labels(250, 6, 1.0, 42);
    let ev = Evaluator::new(&gold, &gold).unwrap();

    assert!(approx(ev.accuracy(), 1.0));
    for values in [
        ev.precision_per_class(),
        ev.recall_per_class(),
        ev.fscore_per_class(),
    ] {
        assert!(values.iter().all(|&v| approx(v, 1.0)), "{values:?}");
    }
    assert!(approx(ev.macro_fscore().unwrap(), 1.0));
    assert!(approx(ev.micro_fscore().unwrap(), 1.0));
}

#[test]
fn micro_metrics_equal_accuracy_when_every_class_predicted() {
    for seed in 0..10 {
        let (gold, pred) = make_labels(500, 5, 0.6, seed);
        let ev = Evaluator::new(&gold, &pred).unwrap();
        let accuracy = ev.accuracy();

        assert!(approx(ev.micro_precision().unwrap(), accuracy), "seed {seed}");
        assert!(approx(ev.micro_recall().unwrap(), accuracy), "seed {seed}");
        assert!(approx(ev.micro_fscore().unwrap(), accuracy), "seed {seed}");
    }
}

#[test]
fn accuracy_matches_true_positive_total() {
    let (gold, pred) = make_labels(400, 4, 0.3, 42);
    let ev = Evaluator::new(&gold, &pred).unwrap();
    let tp_total = ev.counts().total_tp() as f64;
    assert!(approx(ev.accuracy(), tp_total / gold.len() as f64));
    assert!((0.0..=1.0).contains(&ev.accuracy()));
}

#[test]
fn per_class_rates_stay_in_unit_interval() {
    let labels = SimulationConfig::new(5_000).unwrap().with_seed(42).generate().unwrap();
    let ev = Evaluator::new(&labels.gold, &labels.pred).unwrap();

    for (p, r) in ev.precision_per_class().iter().zip(ev.recall_per_class()) {
        assert!((0.0..=1.0).contains(p), "precision {p}");
        assert!((0.0..=1.0).contains(&r), "recall {r}");
    }
    // F1 is NaN only for a class that is predicted but never correctly.
    for (class, f) in ev.fscore_per_class().into_iter().enumerate() {
        if f.is_nan() {
            assert!(ev.is_predicted(class));
            assert_eq!(ev.counts().tp[class], 0);
        } else {
            assert!((0.0..=1.0).contains(&f), "f1 {f}");
        }
    }
}

#[test]
fn never_predicted_class_scores_zero() {
    let (gold, mut pred) = make_labels(300, 4, 0.8, 42);
    // Re-route every prediction of class 3 to class 0.
    for p in pred.iter_mut().filter(|p| **p == 3) {
        *p = 0;
    }
    let ev = Evaluator::new(&gold, &pred).unwrap();

    assert!(!ev.is_predicted(3));
    assert_eq!(ev.precision_per_class()[3], 0.0);
    assert_eq!(ev.recall_per_class()[3], 0.0);
    assert_eq!(ev.fscore_per_class()[3], 0.0);
}

#[test]
fn macro_averages_are_class_means() {
    let (gold, pred) = make_labels(300, 3, 0.5, 7);
    let ev = Evaluator::new(&gold, &pred).unwrap();

    let precision = ev.precision_per_class();
    let recall = ev.recall_per_class();
    assert!(approx(ev.macro_precision(), precision.iter().sum::<f64>() / 3.0));
    assert!(approx(ev.macro_recall(), recall.iter().sum::<f64>() / 3.0));

    let (p, r) = (ev.macro_precision(), ev.macro_recall());
    assert!(approx(ev.macro_fscore().unwrap(), 2.0 * p * r / (p + r)));
}

#[test]
fn report_agrees_with_queries() {
    let labels = SimulationConfig::new(2_000).unwrap().with_seed(3).generate().unwrap();
    let ev = Evaluator::new(&labels.gold, &labels.pred).unwrap();
    let report = ev.report();

    assert_eq!(report.n_samples, 2_000);
    assert_eq!(report.n_classes, ev.n_classes());
    assert!(approx(report.accuracy, ev.accuracy()));
    assert_eq!(report.classes.len(), ev.n_classes());
    assert_eq!(report.macro_avg.precision, Some(ev.macro_precision()));
    assert_eq!(report.micro_avg.recall, ev.micro_recall().ok());
}

#[test]
fn evaluators_are_independent_across_threads() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let (gold, pred) = make_labels(200, 3, 0.5, seed);
                let ev = Evaluator::new(&gold, &pred).unwrap();
                (ev.accuracy(), Evaluator::new(&gold, &pred).unwrap().accuracy())
            })
        })
        .collect();
    for handle in handles {
        let (a, b) = handle.join().unwrap();
        assert!(approx(a, b));
    }
}
