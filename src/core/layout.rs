use serde::{Deserialize, Serialize};

use crate::core::{Rect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Fixed margins around the stacked panels.
///
/// `top` hosts the legend and zoom controls, `bottom` the shared time-axis
/// labels and `left` the value-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            top: 56.0,
            right: 20.0,
            bottom: 36.0,
            left: 72.0,
        }
    }
}

impl ChartMargins {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Pixel rectangle assigned to one channel panel for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRegion {
    pub key: String,
    pub rect: Rect,
}

/// Area spanned by all panels together.
#[must_use]
pub fn plot_area(viewport: Viewport, margins: ChartMargins) -> Rect {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let left = margins.left.min(width);
    let top = margins.top.min(height);
    Rect::new(
        left,
        top,
        (width - margins.left - margins.right).max(0.0),
        (height - margins.top - margins.bottom).max(0.0),
    )
}

/// Splits the plot area into equally tall panels stacked in `keys` order.
#[must_use]
pub fn layout_panels(
    viewport: Viewport,
    margins: ChartMargins,
    keys: &[String],
) -> Vec<PanelRegion> {
    if keys.is_empty() {
        return Vec::new();
    }
    let area = plot_area(viewport, margins);
    let panel_height = area.height / keys.len() as f64;

    keys.iter()
        .enumerate()
        .map(|(index, key)| PanelRegion {
            key: key.clone(),
            rect: Rect::new(
                area.x,
                area.y + panel_height * index as f64,
                area.width,
                panel_height,
            ),
        })
        .collect()
}
