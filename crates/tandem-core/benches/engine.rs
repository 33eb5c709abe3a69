use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tandem_core::engine::{EngineOptions, OverlapStrategy, analyze};
use tandem_core::model::{Assignment, EndDate};
use tandem_core::observer::NullObserver;

/// (label, projects, assignments per project)
const TIERS: [(&str, u64, u32); 3] = [("small", 20, 10), ("medium", 50, 100), ("wide", 4, 1_500)];

/// Deterministic batch: short tenures spread over four years, so most pairs
/// in a group never meet.
fn synthetic_batch(projects: u64, per_project: u32) -> Vec<Assignment> {
    let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    let mut state = 0x5eed_u64;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };

    let mut batch = Vec::with_capacity(usize::try_from(projects * u64::from(per_project)).unwrap_or(0));
    for project in 1..=projects {
        for slot in 0..per_project {
            let start = epoch + Days::new(next() % 1_460);
            let end = if next() % 10 == 0 {
                EndDate::Open
            } else {
                EndDate::On(start + Days::new(next() % 90))
            };
            let employee = 1 + (slot + u32::try_from(next() % 500).unwrap_or(0)) % 2_000;
            batch.push(Assignment::new(employee, project, start, end));
        }
    }
    batch
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.analyze");
    let options = EngineOptions::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default());

    for (label, projects, per_project) in TIERS {
        let batch = synthetic_batch(projects, per_project);
        group.throughput(Throughput::Elements(batch.len() as u64));

        for strategy in [OverlapStrategy::Pairwise, OverlapStrategy::Sweep] {
            let options = options.with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), label),
                &batch,
                |b, batch| b.iter(|| black_box(analyze(batch, &options, &NullObserver))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
