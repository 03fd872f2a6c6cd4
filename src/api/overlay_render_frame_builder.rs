use std::f64::consts::FRAC_PI_2;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::core::{EventMarker, map_time};
use crate::render::{
    CanvasLayerKind, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

use super::render_frame_builder::{FramePlan, estimate_text_width};
use super::{Chart, PlottedPoint, TooltipContext};

const TOOLTIP_OFFSET_PX: f64 = 10.0;
const TOOLTIP_PADDING_PX: f64 = 6.0;
const EVENT_LABEL_INSET_PX: f64 = 4.0;

impl<R: Renderer> Chart<R> {
    /// Event rules, the drag-selection band, the hovered marker and its
    /// tooltip.
    pub(super) fn append_overlay_primitives(
        &self,
        frame: &mut RenderFrame,
        plan: &FramePlan,
        plotted: &[PlottedPoint],
    ) {
        if plan.panels.is_empty() {
            return;
        }
        if let Some(window) = plan.window {
            self.append_event_primitives(frame, plan, window);
        }
        self.append_selection_primitives(frame, plan);
        self.append_tooltip_primitives(frame, plotted);
    }

    /// Events of drawn symbols plus common events inside the window. The
    /// same `(timestamp, label)` is drawn once even when several symbols
    /// carry it.
    fn append_event_primitives(
        &self,
        frame: &mut RenderFrame,
        plan: &FramePlan,
        (start, end): (f64, f64),
    ) {
        let plot = plan.plot;
        let font_size = self.config.font_size_px;
        let symbol_events = self
            .data
            .iter()
            .filter(|(symbol, _)| self.state.is_drawn(symbol))
            .flat_map(|(_, entry)| entry.events.iter());
        let mut seen: IndexSet<(OrderedFloat<f64>, &str)> = IndexSet::new();

        for event in symbol_events.chain(self.common_events.iter()) {
            if !event.timestamp.is_finite() || event.timestamp < start || event.timestamp > end {
                continue;
            }
            if !seen.insert((OrderedFloat(event.timestamp), event.label.as_str())) {
                continue;
            }
            let x = map_time(event.timestamp, start, end, plot.x, plot.width);
            let color = self.event_color(event);
            frame.push_line(
                CanvasLayerKind::Overlay,
                LinePrimitive::new(x, plot.y, x, plot.bottom(), 1.0, color)
                    .with_stroke_style(LineStrokeStyle::Dashed)
                    .with_clip(plot),
            );
            let label = (self.config.formatters.event)(event);
            if let Some(text) = label.into_primitive(
                x - EVENT_LABEL_INSET_PX,
                plot.bottom() - EVENT_LABEL_INSET_PX,
                font_size,
                color,
                TextHAlign::Left,
            ) {
                frame.push_text(CanvasLayerKind::Overlay, text.with_rotation(-FRAC_PI_2));
            }
        }
    }

    fn event_color(&self, event: &EventMarker) -> Color {
        event
            .color
            .unwrap_or_else(|| self.config.colors.event.global())
    }

    fn append_selection_primitives(&self, frame: &mut RenderFrame, plan: &FramePlan) {
        let Some((from, to)) = self.gesture.drag_span() else {
            return;
        };
        let plot = plan.plot;
        let left = from.min(to).clamp(plot.x, plot.right());
        let right = from.max(to).clamp(plot.x, plot.right());
        if right <= left {
            return;
        }
        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(
                left,
                plot.y,
                right - left,
                plot.height,
                self.config.colors.selection.global(),
            ),
        );
    }

    /// Tooltip for the hovered sample, re-anchored to where this frame drew
    /// it. Nothing is drawn when the sample is no longer plotted.
    fn append_tooltip_primitives(&self, frame: &mut RenderFrame, plotted: &[PlottedPoint]) {
        let Some(hovered) = self.hovered_point.as_ref() else {
            return;
        };
        let Some(point) = plotted.iter().find(|point| {
            point.symbol == hovered.symbol
                && point.channel == hovered.channel
                && point.time == hovered.time
        }) else {
            return;
        };

        let colors = &self.config.colors;
        let font_size = self.config.font_size_px;
        let radius = self.config.point_radius_px * 1.6;
        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(
                point.x - radius,
                point.y - radius,
                2.0 * radius,
                2.0 * radius,
                self.data
                    .get(&point.symbol)
                    .and_then(|entry| entry.color)
                    .unwrap_or_else(|| colors.series.resolve(&point.symbol, &point.channel)),
            )
            .with_corner_radius(radius)
            .with_border(1.0, colors.background.global()),
        );

        let label = (self.config.formatters.tooltip)(TooltipContext {
            symbol: &point.symbol,
            channel: &point.channel,
            time: point.time,
            value: point.value,
        });
        let width = estimate_text_width(&label.text, font_size) + 2.0 * TOOLTIP_PADDING_PX;
        let height = font_size + 2.0 * TOOLTIP_PADDING_PX;
        let viewport_width = f64::from(self.viewport.width);
        let mut x = point.x + TOOLTIP_OFFSET_PX;
        if x + width > viewport_width {
            x = (point.x - TOOLTIP_OFFSET_PX - width).max(0.0);
        }
        let y = (point.y - TOOLTIP_OFFSET_PX - height).max(0.0);

        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(x, y, width, height, colors.tooltip_background.global())
                .with_corner_radius(3.0),
        );
        if let Some(text) = label.into_primitive(
            x + TOOLTIP_PADDING_PX,
            y + TOOLTIP_PADDING_PX + font_size * 0.8,
            font_size,
            colors.tooltip_text.global(),
            TextHAlign::Left,
        ) {
            frame.push_text(CanvasLayerKind::Overlay, text);
        }
    }
}
