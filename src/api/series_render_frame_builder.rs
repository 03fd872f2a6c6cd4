use std::borrow::Cow;

use crate::core::{
    LineProjection, SeriesPoint, candle_body_width, project_candles, project_series_strokes,
};
use crate::render::{
    CanvasLayerKind, LinePrimitive, LineStrokeStyle, PathPrimitive, RectPrimitive, RenderFrame,
    Renderer,
};

use super::{Chart, PlottedPoint};
use super::render_frame_builder::{FramePlan, PanelPlan, PanelSeries};

impl<R: Renderer> Chart<R> {
    /// Lines or candles, point markers and average lines of every drawn
    /// series. Every plotted sample is recorded for hit testing.
    pub(super) fn append_series_primitives(
        &self,
        frame: &mut RenderFrame,
        plan: &FramePlan,
        plotted: &mut Vec<PlottedPoint>,
    ) {
        let Some((start, end)) = plan.window else {
            return;
        };
        for panel in &plan.panels {
            for series in &panel.series {
                let Some(range) = panel.ranges.get(&series.symbol).copied() else {
                    continue;
                };
                let projection = LineProjection {
                    time_min: start,
                    time_max: end,
                    value_range: range,
                    panel: panel.region.rect,
                    avg_time_diff: plan.avg_time_diff,
                    fill_gaps: self.state.fill_gaps,
                    smoothing: self.state.smoothing,
                };
                self.append_series_shape(frame, panel, series, &projection);
                self.append_series_points(frame, panel, series, &projection, plotted);
                if self.state.show_average {
                    self.append_average_line(frame, panel, series, &projection);
                }
            }
        }
    }

    fn append_series_shape(
        &self,
        frame: &mut RenderFrame,
        panel: &PanelPlan,
        series: &PanelSeries,
        projection: &LineProjection,
    ) {
        let clip = panel.region.rect;
        let key = panel.region.key.as_str();

        let line_points: Cow<'_, [SeriesPoint]> = if self.state.show_candles {
            let colors = &self.config.colors;
            let body_width = candle_body_width(clip.width, series.points.len());
            for candle in project_candles(&series.points, projection, body_width) {
                let color = if candle.is_bullish {
                    colors.bullish_candle.resolve(&series.symbol, key)
                } else {
                    colors.bearish_candle.resolve(&series.symbol, key)
                };
                frame.push_line(
                    CanvasLayerKind::Series,
                    LinePrimitive::new(
                        candle.center_x,
                        candle.wick_top,
                        candle.center_x,
                        candle.wick_bottom,
                        1.0,
                        color,
                    )
                    .with_clip(clip),
                );
                frame.push_rect(
                    CanvasLayerKind::Series,
                    RectPrimitive::new(
                        candle.body_left,
                        candle.body_top,
                        candle.body_right - candle.body_left,
                        (candle.body_bottom - candle.body_top).max(1.0),
                        color,
                    )
                    .with_clip(clip),
                );
            }
            // samples without full OHLC stay line samples
            series
                .points
                .iter()
                .filter(|point| point.candle_fields().is_none())
                .copied()
                .collect::<Vec<_>>()
                .into()
        } else {
            Cow::Borrowed(series.points.as_slice())
        };

        for stroke in project_series_strokes(&line_points, projection) {
            frame.push_path(
                CanvasLayerKind::Series,
                PathPrimitive::new(stroke.commands, self.config.line_width_px, series.color)
                    .with_stroke_style(stroke.style)
                    .with_clip(clip),
            );
        }
    }

    fn append_series_points(
        &self,
        frame: &mut RenderFrame,
        panel: &PanelPlan,
        series: &PanelSeries,
        projection: &LineProjection,
        plotted: &mut Vec<PlottedPoint>,
    ) {
        let clip = panel.region.rect;
        let radius = self.config.point_radius_px;
        for point in &series.points {
            let x = projection.time_to_x(point.time);
            let y = projection.value_to_y(point.close);
            if self.state.show_points {
                frame.push_rect(
                    CanvasLayerKind::Series,
                    RectPrimitive::new(
                        x - radius,
                        y - radius,
                        2.0 * radius,
                        2.0 * radius,
                        series.color,
                    )
                    .with_corner_radius(radius)
                    .with_clip(clip),
                );
            }
            plotted.push(PlottedPoint {
                x,
                y,
                value: point.close,
                time: point.time,
                symbol: series.symbol.clone(),
                channel: panel.region.key.clone(),
            });
        }
    }

    /// Dashed horizontal rule at the mean visible close.
    fn append_average_line(
        &self,
        frame: &mut RenderFrame,
        panel: &PanelPlan,
        series: &PanelSeries,
        projection: &LineProjection,
    ) {
        let count = series.points.len();
        if count == 0 {
            return;
        }
        let mean = series.points.iter().map(|point| point.close).sum::<f64>() / count as f64;
        let y = projection.value_to_y(mean);
        let rect = panel.region.rect;
        frame.push_line(
            CanvasLayerKind::Overlay,
            LinePrimitive::new(
                rect.x,
                y,
                rect.right(),
                y,
                1.0,
                self.config
                    .colors
                    .average_line
                    .resolve(&series.symbol, &panel.region.key),
            )
            .with_stroke_style(LineStrokeStyle::Dashed)
            .with_clip(rect),
        );
    }
}
