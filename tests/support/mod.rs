#![allow(dead_code)]

use overlay_chart::core::{DataMap, EventMarker, PRICE_CHANNEL, SeriesPoint, SymbolEntry, Viewport};
use overlay_chart::render::{CanvasLayerKind, LayerPrimitives, NullRenderer};
use overlay_chart::{Chart, ChartConfig, RenderState};

/// Plot area of an 800x600 chart with default margins.
pub const PLOT_X: f64 = 72.0;
pub const PLOT_Y: f64 = 56.0;
pub const PLOT_WIDTH: f64 = 708.0;
pub const PLOT_HEIGHT: f64 = 508.0;

pub fn line(times: &[f64], close: impl Fn(f64) -> f64) -> Vec<SeriesPoint> {
    times
        .iter()
        .map(|&time| SeriesPoint::line(time, close(time)))
        .collect()
}

pub fn price_entry(points: Vec<SeriesPoint>) -> SymbolEntry {
    SymbolEntry::default().with_channel(PRICE_CHANNEL, points)
}

pub fn data_of(entries: Vec<(&str, SymbolEntry)>) -> DataMap {
    entries
        .into_iter()
        .map(|(symbol, entry)| (symbol.to_owned(), entry))
        .collect()
}

/// Ten evenly spaced samples per symbol on `t = 0..=9`.
pub fn two_symbol_data() -> DataMap {
    let times: Vec<f64> = (0..10).map(f64::from).collect();
    data_of(vec![
        ("AAA", price_entry(line(&times, |t| 10.0 + t))),
        ("BBB", price_entry(line(&times, |t| 100.0 - t))),
    ])
}

pub fn chart_with(
    data: DataMap,
    events: Vec<EventMarker>,
    state: RenderState,
    config: ChartConfig,
) -> Chart<NullRenderer> {
    Chart::new(
        NullRenderer::default(),
        Viewport::new(800, 600),
        data,
        events,
        state,
        config,
    )
    .expect("chart init")
}

pub fn default_chart() -> Chart<NullRenderer> {
    chart_with(
        two_symbol_data(),
        Vec::new(),
        RenderState::with_symbols(["AAA", "BBB"]),
        ChartConfig::default(),
    )
}

pub fn last_layer(chart: &Chart<NullRenderer>, kind: CanvasLayerKind) -> LayerPrimitives {
    chart
        .renderer()
        .last_frame()
        .expect("rendered frame")
        .layer(kind)
        .clone()
}
