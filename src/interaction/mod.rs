mod gesture;
mod zoom;

use serde::{Deserialize, Serialize};

pub use gesture::{
    DOUBLE_TAP_RADIUS_PX, DOUBLE_TAP_WINDOW_MS, GestureState, PINCH_THRESHOLD_PX, PinchStep,
    TapRecord,
};
pub use zoom::{
    MIN_DRAG_MOUSE_PX, MIN_DRAG_TOUCH_PX, MIN_ZOOM_SPAN_PCT, RangeWindow, SNAP_EPSILON_PCT,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR, ZoomOutcome, ZoomWindow,
};

/// Mutually exclusive pointer interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Pressed inside a fully zoomed-out chart: dragging selects a zoom span.
    DragSelecting,
    /// Pressed inside an already narrowed chart: dragging shifts the window.
    Panning,
}

/// Public crosshair state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

impl CrosshairState {
    pub fn on_pointer_move(&mut self, x: f64, y: f64, inside_plot: bool) {
        self.visible = inside_plot;
        self.x = x;
        self.y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
    }
}
