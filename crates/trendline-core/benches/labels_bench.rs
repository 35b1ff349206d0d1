use criterion::{criterion_group, criterion_main, Criterion, black_box};
use trendline_core::axis::{horizontal_labels, horizontal_stride, vertical_labels, HorizontalLabeler};
use trendline_core::format::DateScale;
use trendline_core::geometry::Point;
use trendline_core::render::lines::optimize_polyline;
use trendline_core::types::DAY;
use trendline_core::ValueRange;

fn timestamps(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1_554_508_800.0 + i as f64 * DAY).collect()
}

fn bench_horizontal(c: &mut Criterion) {
    let mut group = c.benchmark_group("horizontal_labels");
    for &n in &[1_000usize, 100_000usize] {
        let ts = timestamps(n);
        let range = ValueRange::new(ts[0], ts[n - 1]);
        group.bench_function(format!("labels_{n}"), |b| {
            b.iter(|| {
                let stride = horizontal_stride(range.distance(), DAY, 688.0, 60.0);
                black_box(horizontal_labels(&ts, stride, |t| DateScale::Day.format_label(t)))
            });
        });
        group.bench_function(format!("labeler_steady_{n}"), |b| {
            let mut labeler = HorizontalLabeler::new();
            b.iter(|| black_box(labeler.update(&ts, range, 688.0, 60.0, DAY, false, |t| DateScale::Day.format_label(t))));
        });
    }
    group.finish();
}

fn bench_vertical(c: &mut Criterion) {
    c.bench_function("vertical_labels", |b| {
        let mut upper = 1.0;
        b.iter(|| {
            upper = if upper > 1e9 { 1.0 } else { upper * 1.7 };
            black_box(vertical_labels(ValueRange::new(0.0, upper), 345.0, 50.0))
        });
    });
}

fn bench_polyline(c: &mut Criterion) {
    let points: Vec<Point> = (0..100_000).map(|i| Point::new(i as f32 * 0.01, ((i as f32) * 0.05).sin() * 100.0)).collect();
    c.bench_function("optimize_polyline_100000", |b| b.iter(|| black_box(optimize_polyline(&points, 1.0))));
}

criterion_group!(benches, bench_horizontal, bench_vertical, bench_polyline);
criterion_main!(benches);
