//! overlay-chart: interactive multi-series charting engine.
//!
//! Stacked channel panels (price, volume, OBV or any caller-named metric)
//! share one time axis. A [`Chart`] session owns the data, render state and
//! zoom window, turns pointer/touch input into state changes and redraws a
//! fresh [`render::RenderFrame`] through a backend-agnostic
//! [`render::Renderer`] after every change.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, RenderState, RenderStatePatch};
pub use error::{ChartError, ChartResult};
