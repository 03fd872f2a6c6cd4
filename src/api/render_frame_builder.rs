use indexmap::IndexMap;

use crate::core::{
    PanelRegion, Rect, ScaleMode, SeriesPoint, ValueRange, aggregate_daily, average_time_diff,
    channel_ranges, count_distinct_timestamps, layout_panels, plot_area, points_in_time_window,
    time_extent,
};
use crate::render::{CanvasLayerKind, Color, RectPrimitive, RenderFrame, Renderer};

use super::{Chart, HitCache};

/// Average glyph advance relative to the font size, used to size label boxes.
const GLYPH_WIDTH_RATIO: f64 = 0.62;

/// Rough pixel width of `text` at `font_size_px`.
pub(super) fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * GLYPH_WIDTH_RATIO
}

/// One symbol's visible samples inside a panel.
pub(super) struct PanelSeries {
    pub symbol: String,
    pub color: Color,
    pub points: Vec<SeriesPoint>,
}

pub(super) struct PanelPlan {
    pub region: PanelRegion,
    pub series: Vec<PanelSeries>,
    pub ranges: IndexMap<String, ValueRange>,
    /// Scale the value-axis labels are placed with: `0..=100` when
    /// normalized, the shared range otherwise.
    pub label_range: Option<ValueRange>,
}

/// Everything the draw steps of one frame read, derived once per render.
pub(super) struct FramePlan {
    pub plot: Rect,
    pub window: Option<(f64, f64)>,
    pub avg_time_diff: f64,
    pub panels: Vec<PanelPlan>,
}

impl FramePlan {
    pub(super) fn panel_at(&self, x: f64, y: f64) -> Option<&PanelPlan> {
        self.panels
            .iter()
            .find(|panel| panel.region.rect.contains(x, y))
    }
}

impl<R: Renderer> Chart<R> {
    /// Builds the complete frame for the current state plus the hit boxes
    /// the next input event is resolved against.
    pub(super) fn build_render_frame(&self) -> (RenderFrame, HitCache) {
        let mut frame = RenderFrame::new(self.viewport);
        let mut hits = HitCache::default();

        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(self.viewport.width),
                f64::from(self.viewport.height),
                self.config.colors.background.global(),
            ),
        );

        let plan = self.plan_frame();
        hits.plot_area = (!plan.panels.is_empty()).then_some(plan.plot);
        hits.display_window = plan.window;

        self.append_axis_primitives(&mut frame, &plan, &mut hits.panels);
        self.append_series_primitives(&mut frame, &plan, &mut hits.data_points);
        self.append_overlay_primitives(&mut frame, &plan, &hits.data_points);
        self.append_legend_primitives(&mut frame, &mut hits.legend_items);
        self.append_zoom_button_primitives(&mut frame, &mut hits.zoom_buttons);
        self.append_crosshair_primitives(&mut frame, &plan);

        (frame, hits)
    }

    /// Filters, aggregates and scales the data of every panel.
    ///
    /// Only enabled symbols shape the time domain; only drawn symbols
    /// contribute series. Symbols without visible samples are skipped.
    fn plan_frame(&self) -> FramePlan {
        let margins = self.config.margins;
        let plot = plot_area(self.viewport, margins);
        let regions = layout_panels(self.viewport, margins, &self.state.visible_chart_keys);
        let window = self.display_window();

        let panels: Vec<PanelPlan> = regions
            .into_iter()
            .map(|region| match window {
                Some((start, end)) => self.plan_panel(region, start, end),
                None => PanelPlan {
                    region,
                    series: Vec::new(),
                    ranges: IndexMap::new(),
                    label_range: None,
                },
            })
            .collect();

        // gap threshold spans the drawn samples only
        let drawn = || {
            panels
                .iter()
                .flat_map(|panel| panel.series.iter())
                .map(|series| series.points.as_slice())
        };
        let avg_time_diff = time_extent(drawn()).map_or(0.0, |(min_t, max_t)| {
            average_time_diff(min_t, max_t, count_distinct_timestamps(drawn()))
        });

        FramePlan {
            plot,
            window,
            avg_time_diff,
            panels,
        }
    }

    fn plan_panel(&self, region: PanelRegion, start: f64, end: f64) -> PanelPlan {
        let series: Vec<PanelSeries> = self
            .data
            .iter()
            .filter(|(symbol, _)| self.state.is_drawn(symbol))
            .filter_map(|(symbol, entry)| {
                let visible = points_in_time_window(entry.channel(&region.key), start, end);
                let points = if self.state.aggregate_daily {
                    // a bucket starts at UTC midnight, possibly before the window
                    aggregate_daily(&region.key, &visible)
                        .into_iter()
                        .map(|point| SeriesPoint {
                            time: point.time.max(start),
                            ..point
                        })
                        .collect()
                } else {
                    visible
                };
                if points.is_empty() {
                    return None;
                }
                let color = entry
                    .color
                    .unwrap_or_else(|| self.config.colors.series.resolve(symbol, &region.key));
                Some(PanelSeries {
                    symbol: symbol.clone(),
                    color,
                    points,
                })
            })
            .collect();

        let ranges = channel_ranges(
            series
                .iter()
                .map(|series| (series.symbol.as_str(), series.points.as_slice())),
            ScaleMode::from_normalize(self.state.normalize),
        );
        let label_range = if ranges.is_empty() {
            None
        } else if self.state.normalize {
            Some(ValueRange::new(0.0, 100.0))
        } else {
            ranges.values().next().copied()
        };

        PanelPlan {
            region,
            series,
            ranges,
            label_range,
        }
    }
}
