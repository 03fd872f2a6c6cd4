use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LineStrokeStyle, PathCommand, RectPrimitive, RenderFrame, Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a toolkit draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for layer in &frame.layers {
            for rect in &layer.rects {
                with_clip(context, rect.clip, || draw_rect(context, *rect))?;
                stats.rects_drawn += 1;
            }

            for path in &layer.paths {
                with_clip(context, path.clip, || {
                    apply_stroke(context, path.color, path.stroke_width, path.stroke_style);
                    for command in &path.commands {
                        match *command {
                            PathCommand::MoveTo { x, y } => context.move_to(x, y),
                            PathCommand::LineTo { x, y } => context.line_to(x, y),
                            PathCommand::CubicTo {
                                cp1x,
                                cp1y,
                                cp2x,
                                cp2y,
                                x,
                                y,
                            } => context.curve_to(cp1x, cp1y, cp2x, cp2y, x, y),
                        }
                    }
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke path", err))
                })?;
                stats.paths_drawn += 1;
            }

            for line in &layer.lines {
                with_clip(context, line.clip, || {
                    apply_stroke(context, line.color, line.stroke_width, line.stroke_style);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))
                })?;
                stats.lines_drawn += 1;
            }

            for text in &layer.texts {
                let layout = pangocairo::functions::create_layout(context);
                let weight = if text.bold { "Bold " } else { "" };
                let font_description =
                    FontDescription::from_string(&format!("Sans {weight}{}", text.font_size_px));
                layout.set_font_description(Some(&font_description));
                layout.set_text(&text.text);

                let (text_width, _text_height) = layout.pixel_size();
                // primitives anchor text at the baseline, pango at the top
                let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
                let offset = match text.h_align {
                    TextHAlign::Left => 0.0,
                    TextHAlign::Center => -f64::from(text_width) / 2.0,
                    TextHAlign::Right => -f64::from(text_width),
                };

                context
                    .save()
                    .map_err(|err| map_backend_error("failed to save context", err))?;
                context.translate(text.x, text.y);
                context.rotate(text.rotation_rad);
                apply_color(context, text.color);
                context.move_to(offset, -baseline);
                pangocairo::functions::show_layout(context, &layout);
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore context", err))?;
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn with_clip(
    context: &Context,
    clip: Option<Rect>,
    draw: impl FnOnce() -> ChartResult<()>,
) -> ChartResult<()> {
    let Some(clip) = clip else {
        return draw();
    };
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.rectangle(clip.x, clip.y, clip.width, clip.height);
    context.clip();
    let result = draw();
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))?;
    result
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke(context: &Context, color: Color, width: f64, style: LineStrokeStyle) {
    apply_color(context, color);
    context.set_line_width(width);
    context.set_dash(style.dash_pattern(), 0.0);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_stroke(
            context,
            rect.border_color,
            rect.border_width,
            LineStrokeStyle::Solid,
        );
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
