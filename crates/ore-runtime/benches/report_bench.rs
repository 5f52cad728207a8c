use criterion::{criterion_group, criterion_main, Criterion};

fn bench_report(c: &mut Criterion) {
    let equipment = ore_data::seed_equipment(&ore_data::default_catalog().unwrap()).unwrap();
    let profile = ore_data::default_settings().unwrap().into_profile().unwrap();
    let mut session = ore_runtime::Session::new(
        profile,
        equipment,
        ore_data::default_cost_table().unwrap(),
    )
    .unwrap();
    let filter = ore_runtime::ViewFilter::default();
    c.bench_function("planner_report", |b| {
        b.iter(|| {
            let _ = session.report(&filter);
        })
    });
    c.bench_function("level_edit_and_report", |b| {
        let mut level = 1u8;
        b.iter(|| {
            level = level % 17 + 1;
            let _ = session.set_current_level("spiky_ball", level);
            let _ = session.report(&filter);
        })
    });
}

criterion_group!(benches, bench_report);
criterion_main!(benches);
