//! Criterion benchmarks for both mappers.
//!
//! Uses synthetic survey batches drawn from the canonical labels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lasam_modemap::conditions::{ConditionId, ConditionSet};
use lasam_modemap::mapper::{MapperConfig, ModeConditionMapper};
use lasam_modemap::priority::{ModeAllocation, ModePriorityLookup};
use lasam_modemap::record::{OriginClass, SurveyRecord};
use lasam_modemap::rewrite::{AllocationLookup, LabelAllocation, RewriteConfig, RewriteMapper};
use lasam_modemap::vocabulary::labels::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LABELS: [&str; 16] = [
    NO_MODE,
    TAXI,
    MINICAB,
    UBER,
    TUBE,
    ELIZABETH_LINE,
    HEATHROW_EXPRESS,
    NATIONAL_RAILWAYS,
    NATIONAL_EXPRESS_COACH,
    AIRPORT_COACH,
    RAILAIR_BUS,
    SHORT_TERM_CAR_PARK,
    DRIVEN_AWAY,
    RENTAL_SHORT_TERM,
    CAR_UNSPECIFIED,
    WALK,
];

const ORIGINS: [OriginClass; 3] = [OriginClass::Ldn, OriginClass::NonLdn, OriginClass::Airport];

fn synthetic_batch(n: usize, seed: u64) -> Vec<SurveyRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let mut leg = || LABELS[rng.random_range(0..LABELS.len())];
            let (a, b, c) = (leg(), leg(), leg());
            SurveyRecord::new(i as u64)
                .with_legs(a, b, c)
                .with_origin(ORIGINS[rng.random_range(0..ORIGINS.len())])
                .with_airport("LHR")
                .with_segment(rng.random_range(1..=4))
                .with_terminal(rng.random_range(2..=5))
                .with_country(if rng.random_range(0..2) == 0 { "UK" } else { "Foreign" })
                .with_final_mode(TAXI, 12)
        })
        .collect()
}

fn priority_lookup() -> ModePriorityLookup {
    let set = ConditionSet::reference();
    ModePriorityLookup::from_entries(set.enabled_ids().into_iter().map(|id: ConditionId| {
        (
            id,
            ModeAllocation::new("Main", format!("Mode {id}"), u32::from(id.get()), u32::from(id.get()) % 17),
        )
    }))
    .unwrap_or_default()
}

fn allocation_lookup() -> AllocationLookup {
    AllocationLookup::from_entries(
        LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| (*l, LabelAllocation::new("Main", *l, i as u32))),
    )
    .unwrap_or_default()
}

fn bench_condition_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_mapper");
    group.sample_size(10);

    for &n in &[1_000usize, 10_000] {
        let records = synthetic_batch(n, 42);
        for parallel in [false, true] {
            let mapper = ModeConditionMapper::new(priority_lookup())
                .with_config(MapperConfig::default().with_parallel(parallel));
            let name = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(name, n), &records, |b, recs| {
                b.iter(|| mapper.map_batch(black_box(recs)))
            });
        }
    }
    group.finish();
}

fn bench_rewrite_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_mapper");
    group.sample_size(10);

    for &n in &[1_000usize, 10_000] {
        let records = synthetic_batch(n, 7);
        let mapper = RewriteMapper::new(allocation_lookup())
            .with_config(RewriteConfig::default().with_parallel(false));
        group.bench_with_input(BenchmarkId::from_parameter(n), &records, |b, recs| {
            b.iter(|| mapper.map_batch(black_box(recs)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_condition_mapper, bench_rewrite_mapper);
criterion_main!(benches);
