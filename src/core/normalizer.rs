use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::SeriesPoint;

/// Closed value interval used for vertical scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range of the close values, `None` for an empty sequence.
    #[must_use]
    pub fn of_closes(points: &[SeriesPoint]) -> Option<Self> {
        points
            .iter()
            .map(|point| point.close)
            .filter(|close| close.is_finite())
            .fold(None, |acc: Option<Self>, close| {
                Some(match acc {
                    Some(range) => Self::new(range.min.min(close), range.max.max(close)),
                    None => Self::new(close, close),
                })
            })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the range as a 0..=100 percentage.
    #[must_use]
    pub fn percent_of(self, value: f64) -> f64 {
        let span = if self.span() == 0.0 { 1.0 } else { self.span() };
        (value - self.min) / span * 100.0
    }
}

/// Vertical scaling policy for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Every symbol fills the panel independently (relative comparison).
    PerSymbol,
    /// One range across all visible symbols (absolute comparison).
    Shared,
}

impl ScaleMode {
    #[must_use]
    pub fn from_normalize(normalize: bool) -> Self {
        if normalize {
            Self::PerSymbol
        } else {
            Self::Shared
        }
    }
}

/// Computes the value range each symbol is scaled with inside one channel panel.
///
/// Symbols without points get no entry and do not widen the shared range.
#[must_use]
pub fn channel_ranges<'a, I>(series: I, mode: ScaleMode) -> IndexMap<String, ValueRange>
where
    I: IntoIterator<Item = (&'a str, &'a [SeriesPoint])>,
{
    let per_symbol: IndexMap<String, ValueRange> = series
        .into_iter()
        .filter_map(|(symbol, points)| {
            ValueRange::of_closes(points).map(|range| (symbol.to_owned(), range))
        })
        .collect();

    match mode {
        ScaleMode::PerSymbol => per_symbol,
        ScaleMode::Shared => {
            let Some(global) = per_symbol.values().copied().reduce(ValueRange::union) else {
                return IndexMap::new();
            };
            per_symbol
                .into_keys()
                .map(|symbol| (symbol, global))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleMode, ValueRange, channel_ranges};
    use crate::core::SeriesPoint;

    fn series() -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
        (
            vec![SeriesPoint::line(0.0, 10.0), SeriesPoint::line(1.0, 20.0)],
            vec![SeriesPoint::line(0.0, 100.0), SeriesPoint::line(1.0, 50.0)],
        )
    }

    #[test]
    fn per_symbol_ranges_are_independent() {
        let (x, y) = series();
        let ranges = channel_ranges(
            [("X", x.as_slice()), ("Y", y.as_slice())],
            ScaleMode::from_normalize(true),
        );
        assert_eq!(ranges["X"], ValueRange::new(10.0, 20.0));
        assert_eq!(ranges["Y"], ValueRange::new(50.0, 100.0));
    }

    #[test]
    fn shared_range_spans_all_symbols() {
        let (x, y) = series();
        let ranges = channel_ranges(
            [("X", x.as_slice()), ("Y", y.as_slice())],
            ScaleMode::from_normalize(false),
        );
        assert_eq!(ranges["X"], ValueRange::new(10.0, 100.0));
        assert_eq!(ranges["Y"], ValueRange::new(10.0, 100.0));
    }

    #[test]
    fn empty_symbols_are_skipped() {
        let (x, _) = series();
        let empty: Vec<SeriesPoint> = Vec::new();
        let ranges = channel_ranges(
            [("X", x.as_slice()), ("EMPTY", empty.as_slice())],
            ScaleMode::Shared,
        );
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges["X"], ValueRange::new(10.0, 20.0));
    }
}
