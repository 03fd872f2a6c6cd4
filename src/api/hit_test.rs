use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Rect, ValueRange};

/// Default pointer radius within which a plotted point counts as hit.
pub const HIT_RADIUS_PX: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub symbol: String,
    pub rect: Rect,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomAction {
    ZoomIn,
    ZoomOut,
    Reset,
}

impl ZoomAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ZoomIn => "+",
            Self::ZoomOut => "\u{2212}",
            Self::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomButton {
    pub action: ZoomAction,
    pub rect: Rect,
}

/// One drawn sample and where it landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlottedPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub time: f64,
    pub symbol: String,
    pub channel: String,
}

/// Vertical scale a panel's axis labels were placed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelScale {
    pub key: String,
    pub rect: Rect,
    /// `None` when the panel had nothing to draw.
    pub label_range: Option<ValueRange>,
    pub normalized: bool,
}

/// Hit boxes of the last rendered frame.
///
/// Overwritten wholesale by each render; handlers only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitCache {
    pub legend_items: Vec<LegendItem>,
    pub zoom_buttons: SmallVec<[ZoomButton; 3]>,
    pub data_points: Vec<PlottedPoint>,
    pub panels: Vec<PanelScale>,
    /// Union of all panel rectangles; the area that accepts drags.
    pub plot_area: Option<Rect>,
    /// Absolute `(start, end)` time window shown by the last frame.
    pub display_window: Option<(f64, f64)>,
}

impl HitCache {
    #[must_use]
    pub fn legend_at(&self, x: f64, y: f64) -> Option<&LegendItem> {
        self.legend_items.iter().find(|item| item.rect.contains(x, y))
    }

    #[must_use]
    pub fn zoom_button_at(&self, x: f64, y: f64) -> Option<ZoomAction> {
        self.zoom_buttons
            .iter()
            .find(|button| button.rect.contains(x, y))
            .map(|button| button.action)
    }

    /// First plotted point within `radius` of `(x, y)`, in draw order.
    #[must_use]
    pub fn point_at(&self, x: f64, y: f64, radius: f64) -> Option<&PlottedPoint> {
        let radius_sq = radius * radius;
        self.data_points.iter().find(|point| {
            let dx = point.x - x;
            let dy = point.y - y;
            dx * dx + dy * dy <= radius_sq
        })
    }

    #[must_use]
    pub fn in_plot_area(&self, x: f64, y: f64) -> bool {
        self.plot_area.is_some_and(|area| area.contains(x, y))
    }

    #[must_use]
    pub fn panel_at(&self, x: f64, y: f64) -> Option<&PanelScale> {
        self.panels.iter().find(|panel| panel.rect.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::{HitCache, PlottedPoint, ZoomAction, ZoomButton};
    use crate::core::Rect;

    fn point(x: f64, symbol: &str) -> PlottedPoint {
        PlottedPoint {
            x,
            y: 10.0,
            value: 1.0,
            time: 0.0,
            symbol: symbol.to_owned(),
            channel: "price".to_owned(),
        }
    }

    #[test]
    fn point_lookup_returns_first_match_not_nearest() {
        let cache = HitCache {
            data_points: vec![point(14.0, "far"), point(10.5, "near")],
            ..HitCache::default()
        };
        let hit = cache.point_at(10.0, 10.0, 6.0).expect("hit");
        assert_eq!(hit.symbol, "far");
        assert!(cache.point_at(30.0, 10.0, 6.0).is_none());
    }

    #[test]
    fn button_lookup_uses_rect_bounds() {
        let mut cache = HitCache::default();
        cache.zoom_buttons.push(ZoomButton {
            action: ZoomAction::Reset,
            rect: Rect::new(100.0, 0.0, 40.0, 20.0),
        });
        assert_eq!(cache.zoom_button_at(120.0, 10.0), Some(ZoomAction::Reset));
        assert_eq!(cache.zoom_button_at(99.0, 10.0), None);
    }
}
