use heatmap_core::{build_legend, map_grid, GridValue, ValueRange};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn make_values(n: usize) -> Vec<GridValue> {
    (0..n)
        .map(|i| {
            let v = (i as f64 * 0.37).sin() * 50.0 + 50.0;
            if i % 7 == 0 { GridValue::tagged(format!("c{i}"), v) } else { GridValue::Number(v) }
        })
        .collect()
}

fn bench_map_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_grid");
    for &side in &[16usize, 128usize, 512usize] {
        let values = make_values(side * side);
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter(|| {
                let map = map_grid(black_box(&values), side, side, 1920, 1080, None).expect("valid shape");
                black_box(map);
            });
        });
    }
    group.finish();
}

fn bench_legend(c: &mut Criterion) {
    c.bench_function("build_legend_64", |b| {
        b.iter(|| black_box(build_legend(ValueRange::new(-10.0, 90.0), black_box(64), 1200.0, 40.0)));
    });
}

criterion_group!(benches, bench_map_grid, bench_legend);
criterion_main!(benches);
