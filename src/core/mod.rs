pub mod aggregation;
pub mod candlestick;
pub mod layout;
pub mod line_path;
pub mod mapper;
pub mod normalizer;
pub mod primitives;
pub mod series;
pub mod types;
pub mod windowing;

pub use aggregation::aggregate_daily;
pub use candlestick::{CandleGeometry, candle_body_width, project_candles};
pub use layout::{ChartMargins, PanelRegion, layout_panels, plot_area};
pub use line_path::{
    LineProjection, SeriesStroke, SmoothingMode, StrokeKind, average_time_diff,
    count_distinct_timestamps, is_gap, pick_field, project_series_strokes,
};
pub use mapper::{
    VALUE_MARGIN_RATIO, linear_ticks, map_time, map_value, pixel_to_time, pixel_to_value,
};
pub use normalizer::{ScaleMode, ValueRange, channel_ranges};
pub use series::{
    DataMap, EventMarker, OBV_CHANNEL, OhlcvRecord, PRICE_CHANNEL, SeriesPoint, SymbolEntry,
    VOLUME_CHANNEL, partition_events,
};
pub use types::{Rect, Viewport};
pub use windowing::{points_in_time_window, time_extent};
