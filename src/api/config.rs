use std::fmt;
use std::sync::Arc;

use crate::core::{ChartMargins, EventMarker};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::hit_test::HIT_RADIUS_PX;
use super::label_format::{
    EventLabelFormatterFn, LabelText, LegendFormatterFn, TimeLabelFormatterFn,
    TooltipFormatterFn, ValueLabelFormatterFn, default_time_label, default_tooltip_label,
    default_value_label,
};

pub type ColorFn = Arc<dyn Fn(&str, &str) -> Color + Send + Sync + 'static>;
/// Invoked with the clicked symbol and its visibility after the toggle.
pub type LegendClickFn = Arc<dyn Fn(&str, bool) + Send + Sync + 'static>;

/// A stroke/fill color: fixed, or resolved per `(symbol, channel)`.
#[derive(Clone)]
pub enum ColorSource {
    Solid(Color),
    ByKey(ColorFn),
}

impl ColorSource {
    #[must_use]
    pub fn resolve(&self, symbol: &str, channel: &str) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::ByKey(resolve) => resolve(symbol, channel),
        }
    }

    /// Color for decorations that belong to no symbol.
    #[must_use]
    pub fn global(&self) -> Color {
        self.resolve("", "")
    }
}

impl fmt::Debug for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(color) => f.debug_tuple("Solid").field(color).finish(),
            Self::ByKey(_) => f.write_str("ByKey(..)"),
        }
    }
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

const SERIES_PALETTE: [Color; 8] = [
    Color::rgb(0.129, 0.588, 0.953),
    Color::rgb(0.957, 0.263, 0.212),
    Color::rgb(0.298, 0.686, 0.314),
    Color::rgb(1.0, 0.596, 0.0),
    Color::rgb(0.612, 0.153, 0.690),
    Color::rgb(0.0, 0.737, 0.831),
    Color::rgb(0.475, 0.333, 0.282),
    Color::rgb(0.914, 0.118, 0.388),
];

/// Stable palette color derived from the symbol name (FNV-1a).
#[must_use]
pub fn default_series_color(symbol: &str) -> Color {
    let hash = symbol.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    });
    SERIES_PALETTE[(hash % SERIES_PALETTE.len() as u64) as usize]
}

/// Every color used by the chart.
#[derive(Debug, Clone)]
pub struct ChartColors {
    pub background: ColorSource,
    pub grid: ColorSource,
    pub axis_line: ColorSource,
    pub axis_label: ColorSource,
    /// Used when a symbol entry carries no color of its own.
    pub series: ColorSource,
    pub bullish_candle: ColorSource,
    pub bearish_candle: ColorSource,
    pub average_line: ColorSource,
    pub event: ColorSource,
    pub selection: ColorSource,
    pub crosshair: ColorSource,
    pub crosshair_label_background: ColorSource,
    pub crosshair_label_text: ColorSource,
    pub tooltip_background: ColorSource,
    pub tooltip_text: ColorSource,
    pub legend_text: ColorSource,
    pub control_background: ColorSource,
    pub control_text: ColorSource,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0).into(),
            grid: Color::rgba(0.0, 0.0, 0.0, 0.08).into(),
            axis_line: Color::rgba(0.0, 0.0, 0.0, 0.45).into(),
            axis_label: Color::rgb(0.25, 0.25, 0.25).into(),
            series: ColorSource::ByKey(Arc::new(|symbol: &str, _: &str| {
                default_series_color(symbol)
            })),
            bullish_candle: Color::rgb(0.149, 0.651, 0.604).into(),
            bearish_candle: Color::rgb(0.937, 0.325, 0.314).into(),
            average_line: ColorSource::ByKey(Arc::new(|symbol: &str, _: &str| {
                default_series_color(symbol).with_alpha(0.6)
            })),
            event: Color::rgba(0.4, 0.4, 0.4, 0.8).into(),
            selection: Color::rgba(0.129, 0.588, 0.953, 0.18).into(),
            crosshair: Color::rgba(0.0, 0.0, 0.0, 0.5).into(),
            crosshair_label_background: Color::rgba(0.15, 0.15, 0.15, 0.9).into(),
            crosshair_label_text: Color::rgb(1.0, 1.0, 1.0).into(),
            tooltip_background: Color::rgba(0.1, 0.1, 0.1, 0.85).into(),
            tooltip_text: Color::rgb(1.0, 1.0, 1.0).into(),
            legend_text: Color::rgb(0.15, 0.15, 0.15).into(),
            control_background: Color::rgb(0.93, 0.93, 0.93).into(),
            control_text: Color::rgb(0.15, 0.15, 0.15).into(),
        }
    }
}

/// All label formatters. Formatters are expected to be total.
#[derive(Clone)]
pub struct ChartFormatters {
    pub time_axis: TimeLabelFormatterFn,
    pub value_axis: ValueLabelFormatterFn,
    pub crosshair_time: TimeLabelFormatterFn,
    pub crosshair_value: ValueLabelFormatterFn,
    pub tooltip: TooltipFormatterFn,
    pub legend: LegendFormatterFn,
    pub event: EventLabelFormatterFn,
}

impl Default for ChartFormatters {
    fn default() -> Self {
        Self {
            time_axis: Arc::new(default_time_label),
            value_axis: Arc::new(default_value_label),
            crosshair_time: Arc::new(default_time_label),
            crosshair_value: Arc::new(default_value_label),
            tooltip: Arc::new(default_tooltip_label),
            legend: Arc::new(|symbol: &str| LabelText::plain(symbol)),
            event: Arc::new(|event: &EventMarker| LabelText::plain(event.label.clone())),
        }
    }
}

impl fmt::Debug for ChartFormatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartFormatters").finish_non_exhaustive()
    }
}

/// Optional chart configuration; `ChartConfig::default()` is fully usable.
#[derive(Clone)]
pub struct ChartConfig {
    pub margins: ChartMargins,
    pub colors: ChartColors,
    pub formatters: ChartFormatters,
    pub on_legend_click: Option<LegendClickFn>,
    /// Pointer distance within which a plotted point counts as hovered.
    pub hit_radius_px: f64,
    pub point_radius_px: f64,
    pub line_width_px: f64,
    pub font_size_px: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: ChartMargins::default(),
            colors: ChartColors::default(),
            formatters: ChartFormatters::default(),
            on_legend_click: None,
            hit_radius_px: HIT_RADIUS_PX,
            point_radius_px: 3.0,
            line_width_px: 1.5,
            font_size_px: 11.0,
        }
    }
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartConfig")
            .field("margins", &self.margins)
            .field("colors", &self.colors)
            .field("on_legend_click", &self.on_legend_click.is_some())
            .field("hit_radius_px", &self.hit_radius_px)
            .field("point_radius_px", &self.point_radius_px)
            .field("line_width_px", &self.line_width_px)
            .field("font_size_px", &self.font_size_px)
            .finish_non_exhaustive()
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_margins(mut self, margins: ChartMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_legend_click(mut self, callback: LegendClickFn) -> Self {
        self.on_legend_click = Some(callback);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.margins.validate()?;
        for (name, value) in [
            ("hit_radius_px", self.hit_radius_px),
            ("point_radius_px", self.point_radius_px),
            ("line_width_px", self.line_width_px),
            ("font_size_px", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ColorSource, default_series_color};
    use crate::render::Color;
    use std::sync::Arc;

    #[test]
    fn default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn series_palette_is_stable_per_symbol() {
        assert_eq!(default_series_color("AAPL"), default_series_color("AAPL"));
    }

    #[test]
    fn keyed_colors_receive_symbol_and_channel() {
        let source = ColorSource::ByKey(Arc::new(|symbol: &str, channel: &str| {
            if symbol == "X" && channel == "obv" {
                Color::rgb(1.0, 0.0, 0.0)
            } else {
                Color::rgb(0.0, 0.0, 0.0)
            }
        }));
        assert_eq!(source.resolve("X", "obv"), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(source.global(), Color::rgb(0.0, 0.0, 0.0));
    }
}
