use smallvec::SmallVec;

use crate::core::Rect;
use crate::render::{CanvasLayerKind, RectPrimitive, RenderFrame, Renderer, TextHAlign};

use super::render_frame_builder::estimate_text_width;
use super::{Chart, LabelText, LegendItem, ZoomAction, ZoomButton};

const CONTROLS_TOP_PX: f64 = 8.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_GAP_PX: f64 = 6.0;
const LEGEND_ITEM_SPACING_PX: f64 = 16.0;
const LEGEND_ROW_HEIGHT_PX: f64 = 18.0;
const HIDDEN_LEGEND_ALPHA: f64 = 0.35;
const ZOOM_BUTTON_HEIGHT_PX: f64 = 22.0;
const ZOOM_BUTTON_GAP_PX: f64 = 4.0;
const ZOOM_BUTTONS: [(ZoomAction, f64); 3] = [
    (ZoomAction::ZoomIn, 24.0),
    (ZoomAction::ZoomOut, 24.0),
    (ZoomAction::Reset, 52.0),
];

fn zoom_controls_width() -> f64 {
    ZOOM_BUTTONS.iter().map(|(_, width)| width).sum::<f64>()
        + ZOOM_BUTTON_GAP_PX * (ZOOM_BUTTONS.len() - 1) as f64
}

impl<R: Renderer> Chart<R> {
    /// One legend entry per enabled symbol, in data order, wrapping into
    /// extra rows before the zoom controls. Hidden symbols are dimmed.
    pub(super) fn append_legend_primitives(
        &self,
        frame: &mut RenderFrame,
        items: &mut Vec<LegendItem>,
    ) {
        let colors = &self.config.colors;
        let font_size = self.config.font_size_px;
        let left = self.config.margins.left;
        let limit = f64::from(self.viewport.width)
            - self.config.margins.right
            - zoom_controls_width()
            - LEGEND_ITEM_SPACING_PX;
        let mut x = left;
        let mut y = CONTROLS_TOP_PX;

        for (symbol, entry) in self
            .data
            .iter()
            .filter(|(symbol, _)| self.state.enabled_tickers.contains(symbol.as_str()))
        {
            let visible = self.state.visible_tickers.contains(symbol.as_str());
            let label = (self.config.formatters.legend)(symbol);
            let width =
                LEGEND_SWATCH_PX + LEGEND_GAP_PX + estimate_text_width(&label.text, font_size);
            if x > left && x + width > limit {
                x = left;
                y += LEGEND_ROW_HEIGHT_PX;
            }

            let alpha = if visible { 1.0 } else { HIDDEN_LEGEND_ALPHA };
            let swatch = entry
                .color
                .unwrap_or_else(|| colors.series.resolve(symbol, ""));
            frame.push_rect(
                CanvasLayerKind::Legend,
                RectPrimitive::new(
                    x,
                    y + 2.0,
                    LEGEND_SWATCH_PX,
                    LEGEND_SWATCH_PX,
                    swatch.with_alpha(swatch.alpha * alpha),
                )
                .with_corner_radius(2.0),
            );
            let text_color = colors.legend_text.resolve(symbol, "");
            if let Some(text) = label.into_primitive(
                x + LEGEND_SWATCH_PX + LEGEND_GAP_PX,
                y + LEGEND_SWATCH_PX,
                font_size,
                text_color.with_alpha(text_color.alpha * alpha),
                TextHAlign::Left,
            ) {
                frame.push_text(CanvasLayerKind::Legend, text);
            }

            items.push(LegendItem {
                symbol: symbol.clone(),
                rect: Rect::new(x, y, width, LEGEND_SWATCH_PX + 4.0),
                visible,
            });
            x += width + LEGEND_ITEM_SPACING_PX;
        }
    }

    /// Zoom in, zoom out and reset buttons, right-aligned above the plot.
    pub(super) fn append_zoom_button_primitives(
        &self,
        frame: &mut RenderFrame,
        buttons: &mut SmallVec<[ZoomButton; 3]>,
    ) {
        let colors = &self.config.colors;
        let font_size = self.config.font_size_px;
        let background = colors.control_background.global();
        let border = colors.axis_line.global();
        let text_color = colors.control_text.global();
        let mut x =
            f64::from(self.viewport.width) - self.config.margins.right - zoom_controls_width();

        for (action, width) in ZOOM_BUTTONS {
            let rect = Rect::new(x, CONTROLS_TOP_PX - 2.0, width, ZOOM_BUTTON_HEIGHT_PX);
            frame.push_rect(
                CanvasLayerKind::Controls,
                RectPrimitive::from_rect(rect, background)
                    .with_border(1.0, border)
                    .with_corner_radius(3.0),
            );
            if let Some(text) = LabelText::plain(action.label()).into_primitive(
                rect.x + rect.width / 2.0,
                rect.y + rect.height / 2.0 + font_size / 3.0,
                font_size,
                text_color,
                TextHAlign::Center,
            ) {
                frame.push_text(CanvasLayerKind::Controls, text);
            }
            buttons.push(ZoomButton { action, rect });
            x += width + ZOOM_BUTTON_GAP_PX;
        }
    }
}
