use band_label::config::Config;
use band_label::fit::{AreaLabel, LabelBox, bisect_max};
use band_label::render::{place_labels, plot_rect, render_svg};
use band_label::series::{BandShape, SeriesPoint, build_bands, parse_chart};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Sine-modulated band across a 960x500 canvas, densified to `samples`
/// points. Wide enough in the middle for most labels, pinched at both ends.
fn wave_band(samples: usize) -> Vec<SeriesPoint> {
    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let t = i as f32 / (samples.saturating_sub(1).max(1)) as f32;
        let x = t * 920.0;
        let thickness = 40.0 + 180.0 * (t * std::f32::consts::PI).sin();
        points.push(SeriesPoint {
            x,
            y0: 480.0,
            y1: 480.0 - thickness,
        });
    }
    points
}

fn chart_source(samples: usize, series: usize) -> String {
    let mut out = String::from("{\"series\": [");
    for s in 0..series {
        if s > 0 {
            out.push(',');
        }
        out.push_str(&format!("{{\"name\": \"Series {}\", \"values\": [", s));
        for i in 0..samples {
            if i > 0 {
                out.push(',');
            }
            let t = i as f32 / samples.max(1) as f32;
            out.push_str(&format!(
                "{:.3}",
                10.0 + 5.0 * (t * 6.0 + s as f32).sin().abs()
            ));
        }
        out.push_str("]}");
    }
    out.push_str("]}");
    out
}

fn bench_bisection(c: &mut Criterion) {
    c.bench_function("bisection", |b| {
        b.iter(|| {
            let found = bisect_max(black_box(2.0), black_box(500.0), 0.01, 100, |h| h <= 137.4);
            black_box(found)
        });
    });
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    let label = LabelBox {
        x: 0.0,
        y: -12.8,
        width: 88.0,
        height: 19.2,
    };
    let fitter = AreaLabel::from_area(BandShape);
    for samples in [8usize, 64, 512, 4096] {
        let points = wave_band(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &points, |b, data| {
            b.iter(|| black_box(fitter.fit(black_box(data), &label)));
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    for (samples, series) in [(16usize, 3usize), (128, 5), (1024, 8)] {
        let source = chart_source(samples, series);
        let name = format!("{}x{}", samples, series);
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, data| {
            b.iter(|| {
                let chart = parse_chart(black_box(data)).expect("parse failed");
                let config = Config::default();
                let bands = build_bands(&chart, plot_rect(&config.render));
                let labels = place_labels(&bands, &config);
                let svg = render_svg(&bands, &labels, &config.theme, &config.render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_bisection, bench_fit, bench_end_to_end
);
criterion_main!(benches);
