use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::EventMarker;
use crate::render::{Color, TextHAlign, TextPrimitive};

/// Style directives a formatter may attach to its label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelStyle {
    pub color: Option<Color>,
    pub font_size_px: Option<f64>,
    pub bold: bool,
}

/// Formatter result: plain text, or text plus a style directive.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    pub text: String,
    pub style: Option<LabelStyle>,
}

impl LabelText {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    #[must_use]
    pub fn styled(text: impl Into<String>, style: LabelStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Builds the text primitive with the style directive applied over the
    /// defaults. Empty labels produce nothing.
    #[must_use]
    pub fn into_primitive(
        self,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Option<TextPrimitive> {
        if self.text.is_empty() {
            return None;
        }
        let style = self.style.unwrap_or_default();
        Some(
            TextPrimitive::new(
                self.text,
                x,
                y,
                style.font_size_px.unwrap_or(font_size_px),
                style.color.unwrap_or(color),
                h_align,
            )
            .with_bold(style.bold),
        )
    }
}

impl From<String> for LabelText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for LabelText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

/// Context passed to time-axis and crosshair time formatters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeLabelContext {
    /// Width of the displayed window in seconds.
    pub visible_span: f64,
}

/// Context passed to value-axis and crosshair value formatters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueLabelContext<'a> {
    pub channel: &'a str,
    /// `true` when the value is a 0..=100 percentage of per-symbol ranges.
    pub normalized: bool,
}

/// Context passed to the tooltip formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipContext<'a> {
    pub symbol: &'a str,
    pub channel: &'a str,
    pub time: f64,
    pub value: f64,
}

pub type TimeLabelFormatterFn =
    Arc<dyn Fn(f64, TimeLabelContext) -> LabelText + Send + Sync + 'static>;
pub type ValueLabelFormatterFn =
    Arc<dyn Fn(f64, ValueLabelContext<'_>) -> LabelText + Send + Sync + 'static>;
pub type TooltipFormatterFn = Arc<dyn Fn(TooltipContext<'_>) -> LabelText + Send + Sync + 'static>;
pub type LegendFormatterFn = Arc<dyn Fn(&str) -> LabelText + Send + Sync + 'static>;
pub type EventLabelFormatterFn = Arc<dyn Fn(&EventMarker) -> LabelText + Send + Sync + 'static>;

const TWO_DAYS_SECONDS: f64 = 2.0 * 86_400.0;

/// UTC date for wide windows, date and minutes for intraday windows.
#[must_use]
pub fn default_time_label(time: f64, context: TimeLabelContext) -> LabelText {
    let Some(datetime) = DateTime::<Utc>::from_timestamp(time.floor() as i64, 0) else {
        return LabelText::plain(format!("{time:.0}"));
    };
    let pattern = if context.visible_span > TWO_DAYS_SECONDS {
        "%Y-%m-%d"
    } else {
        "%m-%d %H:%M"
    };
    LabelText::plain(datetime.format(pattern).to_string())
}

/// Percentages when normalized, compact magnitudes (K/M/B) otherwise.
#[must_use]
pub fn default_value_label(value: f64, context: ValueLabelContext<'_>) -> LabelText {
    if context.normalized {
        return LabelText::plain(format!("{value:.0}%"));
    }
    LabelText::plain(compact_number(value))
}

#[must_use]
pub fn default_tooltip_label(context: TooltipContext<'_>) -> LabelText {
    let time = default_time_label(
        context.time,
        TimeLabelContext {
            visible_span: f64::INFINITY,
        },
    );
    LabelText::plain(format!(
        "{} {} {}: {}",
        context.symbol,
        context.channel,
        time.text,
        compact_number(context.value)
    ))
}

fn compact_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if magnitude >= 1e4 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LabelStyle, LabelText, TimeLabelContext, ValueLabelContext, default_time_label,
        default_value_label,
    };
    use crate::render::{Color, TextHAlign};

    #[test]
    fn style_directive_overrides_defaults() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let label = LabelText::styled(
            "x",
            LabelStyle {
                color: Some(red),
                font_size_px: None,
                bold: true,
            },
        );
        let text = label
            .into_primitive(1.0, 2.0, 11.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Left)
            .expect("non-empty label");
        assert_eq!(text.color, red);
        assert_eq!(text.font_size_px, 11.0);
        assert!(text.bold);
        assert!(
            LabelText::plain("")
                .into_primitive(0.0, 0.0, 11.0, red, TextHAlign::Left)
                .is_none()
        );
    }

    #[test]
    fn default_labels_adapt_to_context() {
        let wide = TimeLabelContext {
            visible_span: 30.0 * 86_400.0,
        };
        let narrow = TimeLabelContext {
            visible_span: 3_600.0,
        };
        assert_eq!(default_time_label(1_704_153_600.0, wide).text, "2024-01-02");
        assert_eq!(default_time_label(1_704_153_600.0, narrow).text, "01-02 00:00");

        let absolute = ValueLabelContext {
            channel: "volume",
            normalized: false,
        };
        assert_eq!(default_value_label(2_500_000.0, absolute).text, "2.50M");
        assert_eq!(default_value_label(12.346, absolute).text, "12.35");
        let relative = ValueLabelContext {
            channel: "price",
            normalized: true,
        };
        assert_eq!(default_value_label(50.0, relative).text, "50%");
    }
}
