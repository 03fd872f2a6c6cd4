use criterion::{Criterion, criterion_group, criterion_main};
use overlay_chart::core::{
    DataMap, LineProjection, PRICE_CHANNEL, Rect, SeriesPoint, SmoothingMode, SymbolEntry,
    ValueRange, Viewport, map_time, map_value, pixel_to_time, project_series_strokes,
};
use overlay_chart::render::NullRenderer;
use overlay_chart::{Chart, ChartConfig, RenderState};
use std::hint::black_box;

fn wave(count: usize, phase: f64) -> Vec<SeriesPoint> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 60.0;
            // every 500th interval is a long outage so the gap path is exercised
            let t = t + (i / 500) as f64 * 7_200.0;
            SeriesPoint::line(t, 100.0 + (i as f64 * 0.01 + phase).sin() * 5.0)
        })
        .collect()
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    c.bench_function("mapper_round_trip", |b| {
        b.iter(|| {
            let x = map_time(black_box(4_321.123), 0.0, 10_000.0, 72.0, 1_828.0);
            let _ = pixel_to_time(x, 0.0, 10_000.0, 72.0, 1_828.0);
            let _ = map_value(black_box(101.5), 95.0, 105.0, 56.0, 988.0);
        })
    });
}

fn bench_stroke_projection_10k(c: &mut Criterion) {
    let points = wave(10_000, 0.0);
    let time_max = points.last().map_or(1.0, |point| point.time);
    let projection = LineProjection {
        time_min: 0.0,
        time_max,
        value_range: ValueRange::new(95.0, 105.0),
        panel: Rect::new(72.0, 56.0, 1_828.0, 988.0),
        avg_time_diff: time_max / points.len() as f64,
        fill_gaps: false,
        smoothing: SmoothingMode::Middle,
    };

    c.bench_function("stroke_projection_10k", |b| {
        b.iter(|| {
            let _ = project_series_strokes(black_box(&points), black_box(&projection));
        })
    });
}

fn bench_chart_render_3x2k(c: &mut Criterion) {
    let symbols = ["AAA", "BBB", "CCC"];
    let data: DataMap = symbols
        .iter()
        .enumerate()
        .map(|(index, symbol)| {
            (
                (*symbol).to_owned(),
                SymbolEntry::default().with_channel(PRICE_CHANNEL, wave(2_000, index as f64)),
            )
        })
        .collect();
    let state = RenderState {
        normalize: true,
        show_points: true,
        ..RenderState::with_symbols(symbols)
    };
    let mut chart = Chart::new(
        NullRenderer::default(),
        Viewport::new(1600, 900),
        data,
        Vec::new(),
        state,
        ChartConfig::default(),
    )
    .expect("chart init");

    c.bench_function("chart_render_3x2k", |b| {
        b.iter(|| {
            chart.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_mapper_round_trip,
    bench_stroke_projection_10k,
    bench_chart_render_3x2k
);
criterion_main!(benches);
