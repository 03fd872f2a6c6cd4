use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Parses the ISO-like timestamps produced by market-data providers.
///
/// Accepted shapes: RFC 3339 (`2024-03-01T14:30:00Z`, with offset),
/// naive date-time (`2024-03-01 14:30:00` or `2024-03-01T14:30:00`, read as
/// UTC) and plain dates (`2024-03-01`, midnight UTC).
pub fn parse_timestamp(raw: &str) -> ChartResult<f64> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime_to_unix_seconds(time.with_timezone(&Utc)));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Ok(datetime_to_unix_seconds(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(datetime_to_unix_seconds(midnight.and_utc()));
        }
    }
    Err(ChartError::InvalidData(format!(
        "unrecognized timestamp `{raw}`"
    )))
}

/// Returns the UTC midnight (in unix seconds) of the day containing `time`.
#[must_use]
pub fn utc_day_start(time: f64) -> f64 {
    let Some(datetime) = DateTime::<Utc>::from_timestamp(time.floor() as i64, 0) else {
        return (time / SECONDS_PER_DAY).floor() * SECONDS_PER_DAY;
    };
    datetime
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| datetime_to_unix_seconds(midnight.and_utc()))
        .unwrap_or_else(|| (time / SECONDS_PER_DAY).floor() * SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, utc_day_start};

    #[test]
    fn parse_timestamp_accepts_provider_shapes() {
        assert_eq!(parse_timestamp("2024-01-02").expect("date"), 1_704_153_600.0);
        assert_eq!(
            parse_timestamp("2024-01-02 00:00:30").expect("naive"),
            1_704_153_630.0
        );
        assert_eq!(
            parse_timestamp("2024-01-02T01:00:00+01:00").expect("rfc3339"),
            1_704_153_600.0
        );
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn utc_day_start_floors_to_midnight() {
        assert_eq!(utc_day_start(1_704_153_600.0 + 3_600.0), 1_704_153_600.0);
        assert_eq!(utc_day_start(1_704_153_600.0), 1_704_153_600.0);
    }
}
