use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::interaction::{
    InteractionMode, MIN_DRAG_MOUSE_PX, MIN_DRAG_TOUCH_PX, PinchStep, TapRecord,
};
use crate::render::Renderer;

use super::{Chart, ZoomAction};

/// One active touch contact in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn touch_distance(first: TouchPoint, second: TouchPoint) -> f64 {
    (first.x - second.x).hypot(first.y - second.y)
}

impl<R: Renderer> Chart<R> {
    /// Press: zoom buttons win over legend entries, which win over the plot
    /// area. A press in the plot starts a drag selection when the window is
    /// full and a pan otherwise.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.drag_min_px = MIN_DRAG_MOUSE_PX;
        self.press_at(x, y);
        self.render()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.move_to(x, y);
        self.render()
    }

    pub fn pointer_up(&mut self, x: f64, _y: f64) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.release_at(x);
        self.render()
    }

    /// Leaving the surface abandons any drag or pan without committing it.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        trace!(mode = ?self.gesture.mode(), "pointer leave");
        self.abandon_gestures();
        self.render()
    }

    /// Wheel up zooms in, wheel down zooms out, focused under the pointer.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        if self.hits.in_plot_area(x, y) && delta_y != 0.0 && delta_y.is_finite() {
            let focus = self.focus_at(x);
            if delta_y < 0.0 {
                let outcome = self.zoom.zoom_in(Some(focus));
                self.finish_zoom_change(outcome, "wheel zoom in");
            } else {
                let outcome = self.zoom.zoom_out(Some(focus));
                self.finish_zoom_change(outcome, "wheel zoom out");
            }
        }
        self.render()
    }

    /// One finger presses like a pointer (with the wider touch drag
    /// threshold) or completes a double tap; two fingers start a pinch.
    pub fn touch_start(&mut self, touches: &[TouchPoint], time_ms: f64) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        match touches {
            [touch] => {
                let double_tap = self.gesture.register_tap(TapRecord {
                    time_ms,
                    x: touch.x,
                    y: touch.y,
                });
                let resets = double_tap
                    && self.hits.in_plot_area(touch.x, touch.y)
                    && !self.zoom.is_full();
                if resets {
                    debug!("double tap resets zoom");
                    self.reset_zoom_state();
                } else {
                    self.drag_min_px = MIN_DRAG_TOUCH_PX;
                    self.press_at(touch.x, touch.y);
                }
            }
            [first, second, ..] => {
                trace!("pinch start");
                self.gesture.begin_pinch(touch_distance(*first, *second));
            }
            [] => {}
        }
        self.render()
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        match touches {
            [first, second, ..] if self.gesture.is_pinching() => {
                if let Some(step) = self.gesture.pinch_step(touch_distance(*first, *second)) {
                    let focus = self.focus_at((first.x + second.x) / 2.0);
                    let outcome = match step {
                        PinchStep::ZoomIn => self.zoom.zoom_in(Some(focus)),
                        PinchStep::ZoomOut => self.zoom.zoom_out(Some(focus)),
                    };
                    self.finish_zoom_change(outcome, "pinch");
                }
            }
            [touch] => self.move_to(touch.x, touch.y),
            _ => {}
        }
        self.render()
    }

    /// `remaining` lists the contacts still down after the lift.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        if self.gesture.is_pinching() {
            if remaining.len() < 2 {
                self.gesture.end_pinch();
            }
        } else if let Some((_, current_x)) = self.gesture.drag_span() {
            self.release_at(current_x);
        } else {
            self.gesture.end_pan();
        }
        self.render()
    }

    /// Cancelled touch sequences return to idle without committing anything.
    pub fn touch_cancel(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        trace!("touch cancel");
        self.abandon_gestures();
        self.render()
    }

    fn press_at(&mut self, x: f64, y: f64) {
        if let Some(action) = self.hits.zoom_button_at(x, y) {
            self.apply_zoom_action(action);
            return;
        }
        if let Some(item) = self.hits.legend_at(x, y) {
            let symbol = item.symbol.clone();
            self.toggle_symbol_visibility(&symbol);
            return;
        }
        if !self.hits.in_plot_area(x, y) {
            return;
        }
        if self.zoom.is_full() {
            trace!(x, "begin drag selection");
            self.gesture.begin_drag(x);
        } else {
            trace!(x, "begin pan");
            self.gesture.begin_pan(x);
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        match self.gesture.mode() {
            InteractionMode::DragSelecting => self.gesture.update_drag(x),
            InteractionMode::Panning => {
                if let Some(delta) = self.gesture.pan_delta(x) {
                    let width = self.hits.plot_area.map_or(0.0, |area| area.width);
                    let outcome = self.zoom.pan_by_pixels(delta, width);
                    self.finish_zoom_change(outcome, "pan");
                }
            }
            InteractionMode::Idle => {}
        }

        let inside = self.hits.in_plot_area(x, y);
        self.crosshair.on_pointer_move(x, y, inside);
        let tracks_hover = self.state.show_points && self.gesture.mode() == InteractionMode::Idle;
        self.hovered_point = if tracks_hover {
            self.hits
                .point_at(x, y, self.config.hit_radius_px)
                .cloned()
        } else {
            None
        };
    }

    fn release_at(&mut self, x: f64) {
        match self.gesture.mode() {
            InteractionMode::DragSelecting => {
                let Some((start_x, end_x)) = self.gesture.finish_drag(x) else {
                    return;
                };
                let Some(area) = self.hits.plot_area else {
                    return;
                };
                let outcome = self.zoom.drag_select(
                    start_x,
                    end_x,
                    area.x,
                    area.width,
                    self.drag_min_px,
                );
                self.finish_zoom_change(outcome, "drag select");
            }
            InteractionMode::Panning => self.gesture.end_pan(),
            InteractionMode::Idle => {}
        }
    }

    fn abandon_gestures(&mut self) {
        self.gesture.cancel();
        self.crosshair.on_pointer_leave();
        self.hovered_point = None;
    }

    fn apply_zoom_action(&mut self, action: ZoomAction) {
        match action {
            ZoomAction::ZoomIn => {
                let outcome = self.zoom.zoom_in(None);
                self.finish_zoom_change(outcome, "zoom in button");
            }
            ZoomAction::ZoomOut => {
                let outcome = self.zoom.zoom_out(None);
                self.finish_zoom_change(outcome, "zoom out button");
            }
            ZoomAction::Reset => self.reset_zoom_state(),
        }
    }

    /// Flips whether an enabled symbol is drawn. The enabled set, and thus
    /// the time domain, is left untouched.
    fn toggle_symbol_visibility(&mut self, symbol: &str) {
        let visible = if self.state.visible_tickers.shift_remove(symbol) {
            false
        } else {
            self.state.visible_tickers.insert(symbol.to_owned());
            true
        };
        if !visible
            && self
                .hovered_point
                .as_ref()
                .is_some_and(|point| point.symbol == symbol)
        {
            self.hovered_point = None;
        }
        debug!(symbol, visible, "toggle legend entry");
        if let Some(callback) = self.config.on_legend_click.as_ref() {
            callback(symbol, visible);
        }
    }

    /// Pointer x as a percentage of the current zoom window.
    fn focus_at(&self, x: f64) -> f64 {
        match self.hits.plot_area {
            Some(area) => self.zoom.percent_at_pixel(x, area.x, area.width),
            None => self.zoom.start + self.zoom.span() / 2.0,
        }
    }
}
