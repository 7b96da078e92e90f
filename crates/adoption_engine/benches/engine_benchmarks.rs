//! Benchmarks for adoption_engine.

use adoption_core::types::ParameterSet;
use adoption_engine::mc::{EngineConfig, ScenarioSimulator, ShockMatrix};
use adoption_engine::StatisticsAggregator;
use adoption_models::scenarios::{ScenarioKind, ScenarioSelector};
use adoption_models::shocks::ShockRegistry;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PATH_COUNTS: [usize; 4] = [100, 1_000, 5_000, 10_000];

fn simulator(n_paths: usize) -> ScenarioSimulator {
    let params = ParameterSet::builder()
        .num_paths(n_paths)
        .build()
        .expect("valid parameters");
    ScenarioSimulator::new(params, EngineConfig::default()).expect("valid configuration")
}

fn benchmark_shock_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("shock_generation");
    let registry = ShockRegistry::default();

    for n_paths in PATH_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &n_paths, |b, &n| {
            b.iter(|| ShockMatrix::generate(black_box(&registry), n, 6, 42, 1, n >= 100))
        });
    }

    group.finish();
}

fn benchmark_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_paths");

    for n_paths in PATH_COUNTS {
        let simulator = simulator(n_paths);
        let multipliers = simulator
            .resolve(&ScenarioSelector::Baseline)
            .expect("baseline resolves");
        let shocks = simulator.generate_shocks(ScenarioKind::Baseline);

        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &shocks, |b, s| {
            b.iter(|| simulator.evolve(black_box(&multipliers), black_box(s)))
        });
    }

    group.finish();
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_statistics");

    for n_paths in PATH_COUNTS {
        let paths = simulator(n_paths)
            .simulate(&ScenarioSelector::Baseline)
            .expect("baseline simulates");

        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &paths, |b, p| {
            b.iter(|| StatisticsAggregator::aggregate(black_box(p)))
        });
    }

    group.finish();
}

fn benchmark_standard_analysis(c: &mut Criterion) {
    let simulator = simulator(1_000);

    c.bench_function("standard_analysis_1000", |b| {
        b.iter(|| simulator.run_standard_analysis())
    });
}

criterion_group!(
    benches,
    benchmark_shock_generation,
    benchmark_evolve,
    benchmark_aggregate,
    benchmark_standard_analysis
);
criterion_main!(benches);
