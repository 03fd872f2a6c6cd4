use serde::{Deserialize, Serialize};

use super::InteractionMode;

pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const DOUBLE_TAP_RADIUS_PX: f64 = 30.0;
pub const PINCH_THRESHOLD_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapRecord {
    pub time_ms: f64,
    pub x: f64,
    pub y: f64,
}

/// Discrete zoom step produced by a pinch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinchStep {
    ZoomIn,
    ZoomOut,
}

/// Short-lived pointer/touch state between a press and its release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    mode: InteractionMode,
    drag_start_x: f64,
    drag_current_x: f64,
    pan_last_x: f64,
    pinch_distance: Option<f64>,
    last_tap: Option<TapRecord>,
}

impl GestureState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// `(start_x, current_x)` of an active drag selection.
    #[must_use]
    pub fn drag_span(&self) -> Option<(f64, f64)> {
        (self.mode == InteractionMode::DragSelecting)
            .then_some((self.drag_start_x, self.drag_current_x))
    }

    pub fn begin_drag(&mut self, x: f64) {
        self.mode = InteractionMode::DragSelecting;
        self.drag_start_x = x;
        self.drag_current_x = x;
    }

    pub fn update_drag(&mut self, x: f64) {
        if self.mode == InteractionMode::DragSelecting {
            self.drag_current_x = x;
        }
    }

    /// Ends a drag selection and returns its pixel span.
    pub fn finish_drag(&mut self, x: f64) -> Option<(f64, f64)> {
        if self.mode != InteractionMode::DragSelecting {
            return None;
        }
        self.drag_current_x = x;
        let span = (self.drag_start_x, self.drag_current_x);
        self.mode = InteractionMode::Idle;
        Some(span)
    }

    pub fn begin_pan(&mut self, x: f64) {
        self.mode = InteractionMode::Panning;
        self.pan_last_x = x;
    }

    /// Pixel delta since the previous pan position; `None` when not panning.
    pub fn pan_delta(&mut self, x: f64) -> Option<f64> {
        if self.mode != InteractionMode::Panning {
            return None;
        }
        let delta = x - self.pan_last_x;
        self.pan_last_x = x;
        Some(delta)
    }

    pub fn end_pan(&mut self) {
        if self.mode == InteractionMode::Panning {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn begin_pinch(&mut self, distance: f64) {
        self.mode = InteractionMode::Idle;
        self.pinch_distance = Some(distance);
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_distance.is_some()
    }

    /// Emits one zoom step once the finger distance moved past the threshold,
    /// then re-arms from the current distance.
    pub fn pinch_step(&mut self, distance: f64) -> Option<PinchStep> {
        let last = self.pinch_distance?;
        let change = distance - last;
        if change.abs() <= PINCH_THRESHOLD_PX {
            return None;
        }
        self.pinch_distance = Some(distance);
        Some(if change > 0.0 {
            PinchStep::ZoomIn
        } else {
            PinchStep::ZoomOut
        })
    }

    pub fn end_pinch(&mut self) {
        self.pinch_distance = None;
    }

    /// Records a tap and reports whether it completes a double tap.
    pub fn register_tap(&mut self, tap: TapRecord) -> bool {
        let is_double = self.last_tap.is_some_and(|previous| {
            let elapsed = tap.time_ms - previous.time_ms;
            let distance = (tap.x - previous.x).hypot(tap.y - previous.y);
            (0.0..=DOUBLE_TAP_WINDOW_MS).contains(&elapsed) && distance <= DOUBLE_TAP_RADIUS_PX
        });
        self.last_tap = if is_double { None } else { Some(tap) };
        is_double
    }

    /// Returns to idle without committing anything.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureState, PinchStep, TapRecord};
    use crate::interaction::InteractionMode;

    fn tap(time_ms: f64, x: f64) -> TapRecord {
        TapRecord { time_ms, x, y: 50.0 }
    }

    #[test]
    fn drag_and_pan_are_mutually_exclusive() {
        let mut gesture = GestureState::default();
        gesture.begin_drag(10.0);
        assert_eq!(gesture.pan_delta(20.0), None);
        gesture.update_drag(40.0);
        assert_eq!(gesture.drag_span(), Some((10.0, 40.0)));
        assert_eq!(gesture.finish_drag(50.0), Some((10.0, 50.0)));
        assert_eq!(gesture.mode(), InteractionMode::Idle);

        gesture.begin_pan(100.0);
        assert_eq!(gesture.finish_drag(120.0), None);
        assert_eq!(gesture.pan_delta(130.0), Some(30.0));
        assert_eq!(gesture.pan_delta(125.0), Some(-5.0));
    }

    #[test]
    fn pinch_steps_only_past_threshold() {
        let mut gesture = GestureState::default();
        gesture.begin_pinch(100.0);
        assert_eq!(gesture.pinch_step(108.0), None);
        assert_eq!(gesture.pinch_step(111.0), Some(PinchStep::ZoomIn));
        assert_eq!(gesture.pinch_step(105.0), None);
        assert_eq!(gesture.pinch_step(90.0), Some(PinchStep::ZoomOut));
    }

    #[test]
    fn double_tap_needs_time_and_distance_window() {
        let mut gesture = GestureState::default();
        assert!(!gesture.register_tap(tap(0.0, 100.0)));
        assert!(!gesture.register_tap(tap(400.0, 100.0)));
        assert!(gesture.register_tap(tap(600.0, 120.0)));
        assert!(!gesture.register_tap(tap(700.0, 120.0)));
        assert!(!gesture.register_tap(tap(800.0, 200.0)));
    }

    #[test]
    fn cancel_forgets_everything() {
        let mut gesture = GestureState::default();
        gesture.begin_drag(5.0);
        gesture.register_tap(tap(0.0, 1.0));
        gesture.cancel();
        assert_eq!(gesture, GestureState::default());
    }
}
