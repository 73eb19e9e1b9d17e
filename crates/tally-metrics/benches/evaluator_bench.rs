//! Criterion benchmarks for tally-metrics: construction and metric queries.

use criterion::{Criterion, criterion_group, criterion_main};

use tally_metrics::{Evaluator, SimulationConfig};

fn bench_evaluator_new(c: &mut Criterion) {
    let labels = SimulationConfig::new(500_000).unwrap().generate().unwrap();

    c.bench_function("evaluator_new_500k_6class", |b| {
        b.iter(|| Evaluator::new(&labels.gold, &labels.pred).unwrap());
    });
}

fn bench_report(c: &mut Criterion) {
    let labels = SimulationConfig::new(500_000).unwrap().generate().unwrap();
    let ev = Evaluator::new(&labels.gold, &labels.pred).unwrap();

    c.bench_function("evaluator_report_6class", |b| {
        b.iter(|| ev.report());
    });
}

criterion_group!(benches, bench_evaluator_new, bench_report);
criterion_main!(benches);
