use serde::{Deserialize, Serialize};

use crate::core::{LineProjection, SeriesPoint};

pub const MIN_CANDLE_BODY_PX: f64 = 1.0;
pub const MAX_CANDLE_BODY_PX: f64 = 15.0;

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub time: f64,
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Body width for `visible_count` candles sharing `panel_width` pixels.
#[must_use]
pub fn candle_body_width(panel_width: f64, visible_count: usize) -> f64 {
    if visible_count == 0 {
        return MAX_CANDLE_BODY_PX;
    }
    (panel_width / visible_count as f64 * 0.6).clamp(MIN_CANDLE_BODY_PX, MAX_CANDLE_BODY_PX)
}

/// Projects the samples that carry full OHLC fields into candle geometry.
///
/// Samples missing `open`, `high` or `low` are plain line samples and are
/// skipped here.
#[must_use]
pub fn project_candles(
    points: &[SeriesPoint],
    projection: &LineProjection,
    body_width_px: f64,
) -> Vec<CandleGeometry> {
    let half = body_width_px / 2.0;
    points
        .iter()
        .filter_map(|point| {
            let (open, high, low) = point.candle_fields()?;
            let center_x = projection.time_to_x(point.time);
            let open_y = projection.value_to_y(open);
            let close_y = projection.value_to_y(point.close);
            Some(CandleGeometry {
                time: point.time,
                center_x,
                body_left: center_x - half,
                body_right: center_x + half,
                body_top: open_y.min(close_y),
                body_bottom: open_y.max(close_y),
                wick_top: projection.value_to_y(high),
                wick_bottom: projection.value_to_y(low),
                is_bullish: point.close >= open,
            })
        })
        .collect()
}
