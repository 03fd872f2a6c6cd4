use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{decimal_to_f64, parse_timestamp};
use crate::error::ChartResult;
use crate::render::Color;

pub const PRICE_CHANNEL: &str = "price";
pub const VOLUME_CHANNEL: &str = "volume";
pub const OBV_CHANNEL: &str = "obv";

/// One sample of a channel. `open`/`high`/`low` are optional; without all
/// three the sample is drawn as a plain line point instead of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: f64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn line(time: f64, close: f64) -> Self {
        Self {
            time,
            open: None,
            high: None,
            low: None,
            close,
        }
    }

    #[must_use]
    pub const fn ohlc(time: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
        }
    }

    pub fn from_decimal(
        time: f64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::ohlc(
            time,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    /// Samples without a finite time/close never reach the renderer.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.time.is_finite() && self.close.is_finite()
    }

    /// Returns `(open, high, low)` when the sample carries a full candle.
    #[must_use]
    pub fn candle_fields(&self) -> Option<(f64, f64, f64)> {
        match (self.open, self.high, self.low) {
            (Some(open), Some(high), Some(low))
                if open.is_finite() && high.is_finite() && low.is_finite() =>
            {
                Some((open, high, low))
            }
            _ => None,
        }
    }
}

/// Point-in-time annotation drawn as a vertical rule with a rotated label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    pub timestamp: f64,
    pub label: String,
    #[serde(default)]
    pub color: Option<Color>,
}

impl EventMarker {
    #[must_use]
    pub fn new(timestamp: f64, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            label: label.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// All channels and events owned by one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    #[serde(default)]
    pub color: Option<Color>,
    pub data: IndexMap<String, Vec<SeriesPoint>>,
    #[serde(default)]
    pub events: Vec<EventMarker>,
}

/// Symbol name -> entry, in legend order.
pub type DataMap = IndexMap<String, SymbolEntry>;

impl SymbolEntry {
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        self.data.insert(channel.into(), points);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Vec<EventMarker>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn channel(&self, key: &str) -> &[SeriesPoint] {
        self.data.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Builds `price`, `volume` and `obv` channels from provider records.
    ///
    /// Records with an unparsable timestamp or a missing close are skipped.
    #[must_use]
    pub fn from_records(records: &[OhlcvRecord]) -> Self {
        let mut rows: Vec<(f64, &OhlcvRecord, f64)> = Vec::with_capacity(records.len());
        for record in records {
            let Some(close) = record.close.filter(|close| close.is_finite()) else {
                continue;
            };
            match parse_timestamp(&record.timestamp) {
                Ok(time) => rows.push((time, record, close)),
                Err(err) => warn!(error = %err, "skipping record with invalid timestamp"),
            }
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut price = Vec::with_capacity(rows.len());
        let mut volume = Vec::with_capacity(rows.len());
        let mut obv = Vec::with_capacity(rows.len());
        let mut running = 0.0;
        let mut previous_close: Option<f64> = None;
        for (time, record, close) in rows {
            price.push(SeriesPoint {
                time,
                open: record.open,
                high: record.high,
                low: record.low,
                close,
            });
            let traded = record.volume.unwrap_or(0.0);
            volume.push(SeriesPoint::line(time, traded));
            if let Some(previous) = previous_close {
                if close > previous {
                    running += traded;
                } else if close < previous {
                    running -= traded;
                }
            }
            obv.push(SeriesPoint::line(time, running));
            previous_close = Some(close);
        }
        debug!(samples = price.len(), "built symbol entry from records");

        Self::default()
            .with_channel(PRICE_CHANNEL, price)
            .with_channel(VOLUME_CHANNEL, volume)
            .with_channel(OBV_CHANNEL, obv)
    }
}

/// Raw OHLCV row as delivered by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub timestamp: String,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// Splits events into per-symbol lists and a common (broadcast) list.
///
/// An event belongs to every symbol whose name occurs in its label
/// (exact, case-sensitive substring). Events matching no symbol are common.
#[must_use]
pub fn partition_events<'a>(
    symbols: impl IntoIterator<Item = &'a str>,
    events: Vec<EventMarker>,
) -> (IndexMap<String, Vec<EventMarker>>, Vec<EventMarker>) {
    let mut per_symbol: IndexMap<String, Vec<EventMarker>> = symbols
        .into_iter()
        .map(|symbol| (symbol.to_owned(), Vec::new()))
        .collect();
    let mut common = Vec::new();

    for event in events {
        let mut matched = false;
        for (symbol, bucket) in per_symbol.iter_mut() {
            if !symbol.is_empty() && event.label.contains(symbol.as_str()) {
                bucket.push(event.clone());
                matched = true;
            }
        }
        if !matched {
            common.push(event);
        }
    }

    (per_symbol, common)
}
