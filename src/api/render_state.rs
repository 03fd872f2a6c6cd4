use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{PRICE_CHANNEL, SmoothingMode};
use crate::error::{ChartError, ChartResult};
use crate::interaction::RangeWindow;

/// Display state owned by one chart session.
///
/// `enabled_tickers` decides whether a symbol takes part in domain
/// computation at all; `visible_tickers` only decides whether an enabled
/// symbol is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub enabled_tickers: IndexSet<String>,
    pub visible_tickers: IndexSet<String>,
    /// Channel panels, stacked top to bottom.
    pub visible_chart_keys: Vec<String>,
    pub show_candles: bool,
    pub fill_gaps: bool,
    pub smoothing: SmoothingMode,
    pub show_average: bool,
    pub show_grid: bool,
    pub show_points: bool,
    pub normalize: bool,
    pub aggregate_daily: bool,
    pub range: RangeWindow,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            enabled_tickers: IndexSet::new(),
            visible_tickers: IndexSet::new(),
            visible_chart_keys: vec![PRICE_CHANNEL.to_owned()],
            show_candles: false,
            fill_gaps: false,
            smoothing: SmoothingMode::Off,
            show_average: false,
            show_grid: true,
            show_points: false,
            normalize: false,
            aggregate_daily: false,
            range: RangeWindow::default(),
        }
    }
}

impl RenderState {
    /// Default state with every given symbol enabled and visible.
    #[must_use]
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enabled: IndexSet<String> = symbols.into_iter().map(Into::into).collect();
        Self {
            visible_tickers: enabled.clone(),
            enabled_tickers: enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_chart_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_chart_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `symbol` is both enabled and visible.
    #[must_use]
    pub fn is_drawn(&self, symbol: &str) -> bool {
        self.enabled_tickers.contains(symbol) && self.visible_tickers.contains(symbol)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.range.validate()?;
        let mut seen = IndexSet::new();
        for key in &self.visible_chart_keys {
            if key.is_empty() {
                return Err(ChartError::InvalidState(
                    "chart keys must not be empty".to_owned(),
                ));
            }
            if !seen.insert(key.as_str()) {
                return Err(ChartError::InvalidState(format!(
                    "chart key `{key}` listed twice"
                )));
            }
        }
        Ok(())
    }

    /// Shallow merge: every field present in `patch` replaces the current one.
    pub fn merge(&mut self, patch: RenderStatePatch) {
        let RenderStatePatch {
            enabled_tickers,
            visible_tickers,
            visible_chart_keys,
            show_candles,
            fill_gaps,
            smoothing,
            show_average,
            show_grid,
            show_points,
            normalize,
            aggregate_daily,
            range,
        } = patch;

        if let Some(value) = enabled_tickers {
            self.enabled_tickers = value;
        }
        if let Some(value) = visible_tickers {
            self.visible_tickers = value;
        }
        if let Some(value) = visible_chart_keys {
            self.visible_chart_keys = value;
        }
        if let Some(value) = show_candles {
            self.show_candles = value;
        }
        if let Some(value) = fill_gaps {
            self.fill_gaps = value;
        }
        if let Some(value) = smoothing {
            self.smoothing = value;
        }
        if let Some(value) = show_average {
            self.show_average = value;
        }
        if let Some(value) = show_grid {
            self.show_grid = value;
        }
        if let Some(value) = show_points {
            self.show_points = value;
        }
        if let Some(value) = normalize {
            self.normalize = value;
        }
        if let Some(value) = aggregate_daily {
            self.aggregate_daily = value;
        }
        if let Some(value) = range {
            self.range = value;
        }
    }
}

/// Partial update for [`RenderState`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_tickers: Option<IndexSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_tickers: Option<IndexSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_chart_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_candles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_gaps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<SmoothingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_average: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_points: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_daily: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeWindow>,
}
