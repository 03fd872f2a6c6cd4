use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::primitives::utc_day_start;
use crate::core::{SeriesPoint, VOLUME_CHANNEL};

/// Collapses a time-ordered series into one sample per UTC day.
///
/// Price-like channels merge as OHLC (first open, highest high, lowest low,
/// last close). The `volume` channel sums its samples instead.
#[must_use]
pub fn aggregate_daily(channel: &str, points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut buckets: IndexMap<OrderedFloat<f64>, SeriesPoint> = IndexMap::new();
    let summing = channel == VOLUME_CHANNEL;

    for point in points.iter().filter(|point| point.is_renderable()) {
        let day = utc_day_start(point.time);
        match buckets.get_mut(&OrderedFloat(day)) {
            None => {
                let seed = if summing {
                    SeriesPoint::line(day, point.close)
                } else {
                    SeriesPoint {
                        time: day,
                        open: Some(point.open.unwrap_or(point.close)),
                        high: Some(point.high.unwrap_or(point.close)),
                        low: Some(point.low.unwrap_or(point.close)),
                        close: point.close,
                    }
                };
                buckets.insert(OrderedFloat(day), seed);
            }
            Some(bucket) if summing => bucket.close += point.close,
            Some(bucket) => {
                let high = point.high.unwrap_or(point.close);
                let low = point.low.unwrap_or(point.close);
                bucket.high = bucket.high.map(|current| current.max(high));
                bucket.low = bucket.low.map(|current| current.min(low));
                bucket.close = point.close;
            }
        }
    }

    buckets.into_values().collect()
}
