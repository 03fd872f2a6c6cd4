use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CrosshairState, InteractionMode, ZoomWindow};
use crate::render::Renderer;

use super::{Chart, LegendItem, PanelScale, PlottedPoint, RenderState};

/// Serializable view of a chart session used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub state: RenderState,
    pub zoom: ZoomWindow,
    pub interaction_mode: InteractionMode,
    pub crosshair: CrosshairState,
    pub display_window: Option<(f64, f64)>,
    pub panels: Vec<PanelScale>,
    pub legend_items: Vec<LegendItem>,
    pub plotted_point_count: usize,
    pub hovered_point: Option<PlottedPoint>,
    pub destroyed: bool,
}

impl ChartSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot: {e}")))
    }
}

impl<R: Renderer> Chart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            viewport: self.viewport,
            state: self.state.clone(),
            zoom: self.zoom,
            interaction_mode: self.gesture.mode(),
            crosshair: self.crosshair,
            display_window: self.hits.display_window,
            panels: self.hits.panels.clone(),
            legend_items: self.hits.legend_items.clone(),
            plotted_point_count: self.hits.data_points.len(),
            hovered_point: self.hovered_point.clone(),
            destroyed: self.destroyed,
        }
    }
}
