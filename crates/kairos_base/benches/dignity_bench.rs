use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kairos_base::{
    DignityConfig, HouseCusps, Planet, Sect, Sign, TRADITIONAL_PLANETS, TermSystem, evaluate_dignity,
    term_ruler,
};

fn dignity_bench(c: &mut Criterion) {
    let cfg = DignityConfig::default();

    let mut group = c.benchmark_group("dignity");
    group.bench_function("evaluate_single", |b| {
        b.iter(|| {
            evaluate_dignity(
                black_box(Planet::Saturn),
                black_box(Sign::Libra),
                black_box(21.3),
                Sect::Diurnal,
                &cfg,
            )
        })
    });
    group.bench_function("evaluate_all_at_degree", |b| {
        b.iter(|| {
            for p in TRADITIONAL_PLANETS {
                let _ = evaluate_dignity(p, black_box(Sign::Cancer), black_box(14.2), Sect::Nocturnal, &cfg);
            }
        })
    });
    group.finish();
}

fn lookup_bench(c: &mut Criterion) {
    let cusps = HouseCusps::from_longitudes([
        340.0, 10.0, 38.0, 65.0, 95.0, 128.0, 160.0, 190.0, 218.0, 245.0, 275.0, 308.0,
    ]);

    let mut group = c.benchmark_group("lookup");
    group.bench_function("term_ruler_ptolemaic", |b| {
        b.iter(|| term_ruler(black_box(217.4), TermSystem::Ptolemaic))
    });
    if let Ok(cusps) = cusps {
        group.bench_function("house_of", |b| b.iter(|| cusps.house_of(black_box(333.3))));
    }
    group.finish();
}

criterion_group!(benches, dignity_bench, lookup_bench);
criterion_main!(benches);
