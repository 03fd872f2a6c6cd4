use crate::core::{pixel_to_time, pixel_to_value};
use crate::render::{
    CanvasLayerKind, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

use super::render_frame_builder::{FramePlan, estimate_text_width};
use super::{Chart, LabelText, TimeLabelContext, ValueLabelContext};

const LABEL_PADDING_PX: f64 = 4.0;

impl<R: Renderer> Chart<R> {
    /// Crosshair guide lines and their axis labels, drawn last.
    pub(super) fn append_crosshair_primitives(&self, frame: &mut RenderFrame, plan: &FramePlan) {
        if !self.crosshair.visible {
            return;
        }
        let Some((start, end)) = plan.window else {
            return;
        };
        let Some(panel) = plan.panel_at(self.crosshair.x, self.crosshair.y) else {
            return;
        };
        let plot = plan.plot;
        let (x, y) = (self.crosshair.x, self.crosshair.y);
        let rect = panel.region.rect;
        let line_color = self.config.colors.crosshair.global();

        frame.push_line(
            CanvasLayerKind::Crosshair,
            LinePrimitive::new(x, plot.y, x, plot.bottom(), 1.0, line_color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );
        frame.push_line(
            CanvasLayerKind::Crosshair,
            LinePrimitive::new(rect.x, y, rect.right(), y, 1.0, line_color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );

        let time = pixel_to_time(x, start, end, plot.x, plot.width);
        let time_label = (self.config.formatters.crosshair_time)(
            time,
            TimeLabelContext {
                visible_span: end - start,
            },
        );
        self.push_crosshair_label(frame, time_label, x, plot.bottom() + 2.0, TextHAlign::Center);

        if let Some(range) = panel.label_range {
            let value = pixel_to_value(y, range.min, range.max, rect.y, rect.height);
            let value_label = (self.config.formatters.crosshair_value)(
                value,
                ValueLabelContext {
                    channel: &panel.region.key,
                    normalized: self.state.normalize,
                },
            );
            let font_size = self.config.font_size_px;
            self.push_crosshair_label(
                frame,
                value_label,
                rect.x - 2.0,
                y - font_size / 2.0 - LABEL_PADDING_PX,
                TextHAlign::Right,
            );
        }
    }

    /// Boxed label whose box is anchored at `(anchor_x, top)` with the given
    /// horizontal alignment.
    fn push_crosshair_label(
        &self,
        frame: &mut RenderFrame,
        label: LabelText,
        anchor_x: f64,
        top: f64,
        h_align: TextHAlign,
    ) {
        let colors = &self.config.colors;
        let font_size = self.config.font_size_px;
        let width = estimate_text_width(&label.text, font_size) + 2.0 * LABEL_PADDING_PX;
        let height = font_size + 2.0 * LABEL_PADDING_PX;
        let left = match h_align {
            TextHAlign::Left => anchor_x,
            TextHAlign::Center => anchor_x - width / 2.0,
            TextHAlign::Right => anchor_x - width,
        };
        let Some(text) = label.into_primitive(
            left + width / 2.0,
            top + LABEL_PADDING_PX + font_size * 0.8,
            font_size,
            colors.crosshair_label_text.global(),
            TextHAlign::Center,
        ) else {
            return;
        };
        frame.push_rect(
            CanvasLayerKind::Crosshair,
            RectPrimitive::new(
                left,
                top,
                width,
                height,
                colors.crosshair_label_background.global(),
            )
            .with_corner_radius(2.0),
        );
        frame.push_text(CanvasLayerKind::Crosshair, text);
    }
}
