use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use phonemart_pricing::{estimate, Diagnostics};

fn diagnostics_cases() -> Vec<(&'static str, Diagnostics)> {
    vec![
        ("pristine", Diagnostics::pristine()),
        (
            "screen_broken",
            Diagnostics {
                screen_broken: true,
                ..Diagnostics::default()
            },
        ),
        (
            "all_penalties",
            Diagnostics {
                screen_broken: false,
                battery_weak: true,
                face_id_broken: true,
                camera_broken: true,
                average_condition: true,
            },
        ),
    ]
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    for (name, diagnostics) in diagnostics_cases() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &diagnostics, |b, d| {
            b.iter(|| estimate(black_box(350_000.0), black_box(d)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
