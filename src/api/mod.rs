mod axis_render_frame_builder;
mod chart;
mod chart_snapshot;
mod config;
mod controls_render_frame_builder;
mod crosshair_render_frame_builder;
mod hit_test;
mod interaction_controller;
mod label_format;
mod overlay_render_frame_builder;
mod render_frame_builder;
mod render_state;
mod series_render_frame_builder;

pub use chart::Chart;
pub use chart_snapshot::ChartSnapshot;
pub use config::{
    ChartColors, ChartConfig, ChartFormatters, ColorFn, ColorSource, LegendClickFn,
    default_series_color,
};
pub use hit_test::{
    HIT_RADIUS_PX, HitCache, LegendItem, PanelScale, PlottedPoint, ZoomAction, ZoomButton,
};
pub use interaction_controller::TouchPoint;
pub use label_format::{
    EventLabelFormatterFn, LabelStyle, LabelText, LegendFormatterFn, TimeLabelContext,
    TimeLabelFormatterFn, TooltipContext, TooltipFormatterFn, ValueLabelContext,
    ValueLabelFormatterFn, default_time_label, default_tooltip_label, default_value_label,
};
pub use render_state::{RenderState, RenderStatePatch};
