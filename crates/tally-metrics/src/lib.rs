//! Classification-quality metrics over aligned gold/predicted label sequences.
//!
//! Provides an [`Evaluator`] that accumulates per-class confusion counts in a
//! single pass and derives accuracy, per-class precision/recall/F1, and their
//! micro and macro averages. A seeded binomial label simulator is included
//! for self-checks and benchmarks.

mod confusion;
mod error;
mod evaluator;
mod report;
mod simulate;

pub use confusion::ConfusionCounts;
pub use error::{Averaging, MetricsError};
pub use evaluator::Evaluator;
pub use report::{Averages, ClassMetrics, EvaluationReport};
pub use simulate::{SimulatedLabels, SimulationConfig};
