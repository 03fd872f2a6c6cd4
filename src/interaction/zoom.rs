use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const ZOOM_IN_FACTOR: f64 = 0.7;
pub const ZOOM_OUT_FACTOR: f64 = 1.4;
/// Narrowest window reachable through zoom-in steps.
pub const MIN_ZOOM_SPAN_PCT: f64 = 10.0;
/// Both ends within this distance of the bounds snap the window to full.
pub const SNAP_EPSILON_PCT: f64 = 0.5;
pub const MIN_DRAG_MOUSE_PX: f64 = 10.0;
pub const MIN_DRAG_TOUCH_PX: f64 = 20.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Operator-selected sub-range of the full time domain, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeWindow {
    pub min: f64,
    pub max: f64,
}

impl Default for RangeWindow {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl RangeWindow {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        Self { min, max }.validate()
    }

    /// Enforces `0 <= min < max <= 100`.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ChartError::InvalidState(
                "range bounds must be finite".to_owned(),
            ));
        }
        if self.min < 0.0 || self.max > 100.0 || self.min >= self.max {
            return Err(ChartError::InvalidState(format!(
                "range must satisfy 0 <= min < max <= 100, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(self)
    }

    /// Absolute time window selected from `[domain_min, domain_max]`.
    #[must_use]
    pub fn apply(self, domain_min: f64, domain_max: f64) -> (f64, f64) {
        let span = domain_max - domain_min;
        (
            domain_min + span * self.min / 100.0,
            domain_min + span * self.max / 100.0,
        )
    }
}

/// Result of a zoom-window mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomOutcome {
    Unchanged,
    Changed,
    /// The window landed within the snap epsilon and was reset to full;
    /// any active pan must be cleared.
    SnappedToFull,
}

impl ZoomOutcome {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Interaction-driven `[start, end]` percentage window over the
/// range-filtered domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl ZoomWindow {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 100.0,
    };

    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        let window = RangeWindow::new(start, end).map_err(|_| {
            ChartError::InvalidState(format!(
                "zoom window must satisfy 0 <= start < end <= 100, got [{start}, {end}]"
            ))
        })?;
        Ok(Self {
            start: window.min,
            end: window.max,
        })
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self == Self::FULL
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Absolute time window selected from the range window `[range_start, range_end]`.
    #[must_use]
    pub fn apply(self, range_start: f64, range_end: f64) -> (f64, f64) {
        let span = range_end - range_start;
        (
            range_start + span * self.start / 100.0,
            range_start + span * self.end / 100.0,
        )
    }

    /// Converts a pixel inside a panel into a zoom percentage of the current window.
    #[must_use]
    pub fn percent_at_pixel(self, x: f64, panel_left: f64, panel_width: f64) -> f64 {
        if panel_width <= 0.0 {
            return self.start + self.span() / 2.0;
        }
        let fraction = ((x - panel_left) / panel_width).clamp(0.0, 1.0);
        self.start + fraction * self.span()
    }

    pub fn reset(&mut self) {
        *self = Self::FULL;
    }

    /// Shrinks the window by [`ZOOM_IN_FACTOR`] around `focus` (a zoom
    /// percentage), or around the midpoint without focus.
    pub fn zoom_in(&mut self, focus: Option<f64>) -> ZoomOutcome {
        let span = self.span();
        if span <= MIN_ZOOM_SPAN_PCT {
            return ZoomOutcome::Unchanged;
        }
        let target = (span * ZOOM_IN_FACTOR).max(MIN_ZOOM_SPAN_PCT);
        self.rescale_around(focus, target)
    }

    /// Grows the window by [`ZOOM_OUT_FACTOR`] around `focus`.
    pub fn zoom_out(&mut self, focus: Option<f64>) -> ZoomOutcome {
        let span = self.span();
        if span >= 100.0 {
            return ZoomOutcome::Unchanged;
        }
        let target = (span * ZOOM_OUT_FACTOR).min(100.0);
        self.rescale_around(focus, target)
    }

    /// Shifts the window by a pixel delta measured in a panel `panel_width` wide.
    ///
    /// Dragging right (positive delta) reveals earlier data.
    pub fn pan_by_pixels(&mut self, delta_px: f64, panel_width: f64) -> ZoomOutcome {
        if panel_width <= 0.0 || !delta_px.is_finite() || delta_px == 0.0 {
            return ZoomOutcome::Unchanged;
        }
        let shift = -(delta_px / panel_width) * self.span();
        self.settle(self.start + shift, self.end + shift)
    }

    /// Narrows the window to a dragged pixel span, nested inside the current
    /// window. Spans not wider than `min_px` are ignored.
    pub fn drag_select(
        &mut self,
        start_px: f64,
        end_px: f64,
        panel_left: f64,
        panel_width: f64,
        min_px: f64,
    ) -> ZoomOutcome {
        if (end_px - start_px).abs() <= min_px || panel_width <= 0.0 {
            return ZoomOutcome::Unchanged;
        }
        let first = self.percent_at_pixel(start_px.min(end_px), panel_left, panel_width);
        let second = self.percent_at_pixel(start_px.max(end_px), panel_left, panel_width);
        if round2(second - first) <= 0.0 {
            return ZoomOutcome::Unchanged;
        }
        self.settle(first, second)
    }

    fn rescale_around(&mut self, focus: Option<f64>, target_span: f64) -> ZoomOutcome {
        let span = self.span();
        let focus = focus
            .filter(|value| value.is_finite())
            .unwrap_or(self.start + span / 2.0)
            .clamp(self.start, self.end);
        let ratio = if span > 0.0 {
            (focus - self.start) / span
        } else {
            0.5
        };
        let start = focus - ratio * target_span;
        self.settle(start, start + target_span)
    }

    /// Shift-clamps into `[0, 100]`, rounds to 2 decimals and snaps to full.
    fn settle(&mut self, start: f64, end: f64) -> ZoomOutcome {
        let (mut start, mut end) = (start, end);
        if start < 0.0 {
            end -= start;
            start = 0.0;
        }
        if end > 100.0 {
            start -= end - 100.0;
            end = 100.0;
        }
        let span = round2(end.min(100.0) - start.max(0.0));
        if span <= 0.0 {
            return ZoomOutcome::Unchanged;
        }
        start = round2(start.max(0.0));
        end = round2(start + span);
        if end > 100.0 {
            end = 100.0;
            start = round2(end - span);
        }

        let snapped = start <= SNAP_EPSILON_PCT && end >= 100.0 - SNAP_EPSILON_PCT;
        let next = if snapped {
            Self::FULL
        } else {
            Self { start, end }
        };

        if next == *self {
            return ZoomOutcome::Unchanged;
        }
        *self = next;
        if snapped {
            ZoomOutcome::SnappedToFull
        } else {
            ZoomOutcome::Changed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeWindow, ZoomOutcome, ZoomWindow};

    #[test]
    fn zoom_in_without_focus_shrinks_around_midpoint() {
        let mut window = ZoomWindow::default();
        assert_eq!(window.zoom_in(None), ZoomOutcome::Changed);
        assert_eq!(window, ZoomWindow { start: 15.0, end: 85.0 });
    }

    #[test]
    fn zoom_in_keeps_focus_at_same_relative_position() {
        let mut window = ZoomWindow::default();
        window.zoom_in(Some(20.0));
        assert_eq!(window, ZoomWindow { start: 6.0, end: 76.0 });
    }

    #[test]
    fn zoom_in_stops_at_floor() {
        let mut window = ZoomWindow::default();
        for _ in 0..20 {
            window.zoom_in(None);
        }
        assert!((window.span() - 10.0).abs() <= 1e-9);
        assert_eq!(window.zoom_in(None), ZoomOutcome::Unchanged);
    }

    #[test]
    fn zoom_out_near_full_snaps_and_reports_it() {
        let mut window = ZoomWindow { start: 10.0, end: 85.0 };
        assert_eq!(window.zoom_out(None), ZoomOutcome::SnappedToFull);
        assert!(window.is_full());
        assert_eq!(window.zoom_out(None), ZoomOutcome::Unchanged);
    }

    #[test]
    fn zoom_out_shifts_instead_of_overflowing() {
        let mut window = ZoomWindow { start: 80.0, end: 100.0 };
        window.zoom_out(Some(100.0));
        assert_eq!(window, ZoomWindow { start: 72.0, end: 100.0 });
    }

    #[test]
    fn pan_is_clamped_by_shifting() {
        let mut window = ZoomWindow { start: 20.0, end: 40.0 };
        assert_eq!(window.pan_by_pixels(100.0, 1000.0), ZoomOutcome::Changed);
        assert_eq!(window, ZoomWindow { start: 18.0, end: 38.0 });
        window.pan_by_pixels(100_000.0, 1000.0);
        assert_eq!(window, ZoomWindow { start: 0.0, end: 20.0 });
        assert_eq!(window.pan_by_pixels(10.0, 1000.0), ZoomOutcome::Unchanged);
    }

    #[test]
    fn drag_select_nests_inside_current_window() {
        let mut window = ZoomWindow::default();
        window.drag_select(100.0, 600.0, 100.0, 1000.0, 10.0);
        assert_eq!(window, ZoomWindow { start: 0.0, end: 50.0 });
        window.drag_select(600.0, 100.0, 100.0, 1000.0, 10.0);
        assert_eq!(window, ZoomWindow { start: 0.0, end: 25.0 });
        assert_eq!(
            window.drag_select(100.0, 105.0, 100.0, 1000.0, 10.0),
            ZoomOutcome::Unchanged
        );
    }

    #[test]
    fn range_and_zoom_compose_multiplicatively() {
        let range = RangeWindow::new(20.0, 80.0).expect("valid range");
        let (range_start, range_end) = range.apply(0.0, 1000.0);
        assert_eq!((range_start, range_end), (200.0, 800.0));
        let zoom = ZoomWindow { start: 50.0, end: 100.0 };
        assert_eq!(zoom.apply(range_start, range_end), (500.0, 800.0));
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(RangeWindow::new(50.0, 50.0).is_err());
        assert!(RangeWindow::new(-1.0, 50.0).is_err());
        assert!(RangeWindow::new(10.0, 100.5).is_err());
    }
}
