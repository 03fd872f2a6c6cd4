use crate::core::{linear_ticks, map_time, map_value};
use crate::render::{CanvasLayerKind, LinePrimitive, RenderFrame, Renderer, TextHAlign};

use super::render_frame_builder::FramePlan;
use super::{Chart, LabelText, PanelScale, TimeLabelContext, ValueLabelContext};

const TIME_TICK_SPACING_PX: f64 = 110.0;
const MIN_TIME_TICKS: usize = 2;
const MAX_TIME_TICKS: usize = 8;
const VALUE_TICK_COUNT: usize = 5;
const AXIS_LABEL_OFFSET_PX: f64 = 6.0;

impl<R: Renderer> Chart<R> {
    /// Grid lines, axis lines and tick labels of every panel.
    ///
    /// Value ticks are placed with `map_value` and the panel's label range,
    /// so a tick at a series extremum lands exactly on the plotted sample.
    pub(super) fn append_axis_primitives(
        &self,
        frame: &mut RenderFrame,
        plan: &FramePlan,
        scales: &mut Vec<PanelScale>,
    ) {
        let colors = &self.config.colors;
        let font_size = self.config.font_size_px;
        let axis_color = colors.axis_line.global();
        let grid_color = colors.grid.global();

        for panel in &plan.panels {
            let rect = panel.region.rect;
            let key = panel.region.key.as_str();
            scales.push(PanelScale {
                key: key.to_owned(),
                rect,
                label_range: panel.label_range,
                normalized: self.state.normalize,
            });

            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(rect.x, rect.y, rect.x, rect.bottom(), 1.0, axis_color),
            );
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(
                    rect.x,
                    rect.bottom(),
                    rect.right(),
                    rect.bottom(),
                    1.0,
                    axis_color,
                ),
            );
            if let Some(title) = LabelText::plain(key).into_primitive(
                rect.x + 4.0,
                rect.y + font_size + 2.0,
                font_size,
                colors.axis_label.resolve("", key),
                TextHAlign::Left,
            ) {
                frame.push_text(CanvasLayerKind::Axis, title.with_bold(true));
            }

            let Some(range) = panel.label_range else {
                continue;
            };
            let context = ValueLabelContext {
                channel: key,
                normalized: self.state.normalize,
            };
            for value in linear_ticks(range.min, range.max, VALUE_TICK_COUNT) {
                let y = map_value(value, range.min, range.max, rect.y, rect.height);
                if self.state.show_grid {
                    frame.push_line(
                        CanvasLayerKind::Grid,
                        LinePrimitive::new(rect.x, y, rect.right(), y, 1.0, grid_color)
                            .with_clip(rect),
                    );
                }
                let label = (self.config.formatters.value_axis)(value, context);
                if let Some(text) = label.into_primitive(
                    rect.x - AXIS_LABEL_OFFSET_PX,
                    y + font_size / 3.0,
                    font_size,
                    colors.axis_label.resolve("", key),
                    TextHAlign::Right,
                ) {
                    frame.push_text(CanvasLayerKind::Axis, text);
                }
            }
        }

        let Some((start, end)) = plan.window else {
            return;
        };
        if plan.panels.is_empty() {
            return;
        }
        let plot = plan.plot;
        let tick_count = if end > start {
            ((plot.width / TIME_TICK_SPACING_PX).floor() as usize)
                .clamp(MIN_TIME_TICKS, MAX_TIME_TICKS)
        } else {
            1
        };
        let context = TimeLabelContext {
            visible_span: end - start,
        };
        for time in linear_ticks(start, end, tick_count) {
            let x = map_time(time, start, end, plot.x, plot.width);
            if self.state.show_grid {
                frame.push_line(
                    CanvasLayerKind::Grid,
                    LinePrimitive::new(x, plot.y, x, plot.bottom(), 1.0, grid_color),
                );
            }
            let label = (self.config.formatters.time_axis)(time, context);
            if let Some(text) = label.into_primitive(
                x,
                plot.bottom() + font_size + AXIS_LABEL_OFFSET_PX,
                font_size,
                colors.axis_label.global(),
                TextHAlign::Center,
            ) {
                frame.push_text(CanvasLayerKind::Axis, text);
            }
        }
    }
}
