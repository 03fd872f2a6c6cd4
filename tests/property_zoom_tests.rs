use overlay_chart::interaction::{MIN_DRAG_MOUSE_PX, ZoomOutcome, ZoomWindow};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ZoomOp {
    ZoomIn(Option<f64>),
    ZoomOut(Option<f64>),
    Pan(f64, f64),
    Drag(f64, f64),
    Reset,
}

fn zoom_op() -> impl Strategy<Value = ZoomOp> {
    prop_oneof![
        proptest::option::of(-50.0f64..150.0).prop_map(ZoomOp::ZoomIn),
        proptest::option::of(-50.0f64..150.0).prop_map(ZoomOp::ZoomOut),
        (-3_000.0f64..3_000.0, 50.0f64..2_000.0)
            .prop_map(|(delta, width)| ZoomOp::Pan(delta, width)),
        (0.0f64..800.0, 0.0f64..800.0).prop_map(|(a, b)| ZoomOp::Drag(a, b)),
        Just(ZoomOp::Reset),
    ]
}

fn apply(window: &mut ZoomWindow, op: &ZoomOp) -> ZoomOutcome {
    match *op {
        ZoomOp::ZoomIn(focus) => window.zoom_in(focus),
        ZoomOp::ZoomOut(focus) => window.zoom_out(focus),
        ZoomOp::Pan(delta, width) => window.pan_by_pixels(delta, width),
        ZoomOp::Drag(a, b) => window.drag_select(a, b, 0.0, 800.0, MIN_DRAG_MOUSE_PX),
        ZoomOp::Reset => {
            window.reset();
            ZoomOutcome::Changed
        }
    }
}

proptest! {
    #[test]
    fn any_operation_sequence_keeps_window_ordered_and_bounded(
        ops in proptest::collection::vec(zoom_op(), 1..64)
    ) {
        let mut window = ZoomWindow::default();
        for op in &ops {
            apply(&mut window, op);
            prop_assert!(window.start >= 0.0, "start out of bounds after {op:?}: {window:?}");
            prop_assert!(window.end <= 100.0, "end out of bounds after {op:?}: {window:?}");
            prop_assert!(window.start < window.end, "inverted after {op:?}: {window:?}");
        }
    }

    #[test]
    fn reset_is_idempotent(ops in proptest::collection::vec(zoom_op(), 0..16)) {
        let mut window = ZoomWindow::default();
        for op in &ops {
            apply(&mut window, op);
        }
        window.reset();
        let once = window;
        window.reset();
        prop_assert_eq!(window, once);
        prop_assert!(window.is_full());
    }

    #[test]
    fn drag_select_after_reset_reproduces_the_same_window(
        prefix in proptest::collection::vec(zoom_op(), 0..8),
        a in 0.0f64..800.0,
        b in 0.0f64..800.0,
    ) {
        let mut window = ZoomWindow::default();
        for op in &prefix {
            apply(&mut window, op);
        }
        window.reset();
        window.drag_select(a, b, 0.0, 800.0, MIN_DRAG_MOUSE_PX);
        let first = window;

        window.reset();
        window.drag_select(a, b, 0.0, 800.0, MIN_DRAG_MOUSE_PX);
        prop_assert_eq!(window, first);
    }

    #[test]
    fn zoom_in_never_goes_below_the_span_floor(steps in 1usize..40) {
        let mut window = ZoomWindow::default();
        for _ in 0..steps {
            window.zoom_in(None);
        }
        prop_assert!(window.span() >= 10.0 - 1e-9);
    }
}

#[test]
fn zoom_in_without_focus_from_full_window_gives_fifteen_to_eighty_five() {
    let mut window = ZoomWindow::default();
    assert_eq!(window.zoom_in(None), ZoomOutcome::Changed);
    assert_eq!(window, ZoomWindow { start: 15.0, end: 85.0 });
}

#[test]
fn nested_drag_selects_within_the_current_window() {
    let mut window = ZoomWindow::default();
    window.drag_select(200.0, 600.0, 0.0, 800.0, MIN_DRAG_MOUSE_PX);
    assert_eq!(window, ZoomWindow { start: 25.0, end: 75.0 });
    window.drag_select(0.0, 400.0, 0.0, 800.0, MIN_DRAG_MOUSE_PX);
    assert_eq!(window, ZoomWindow { start: 25.0, end: 50.0 });
}

#[test]
fn zooming_out_close_to_full_snaps_to_full() {
    let mut window = ZoomWindow { start: 0.2, end: 71.6 };
    assert_eq!(window.zoom_out(Some(0.2)), ZoomOutcome::SnappedToFull);
    assert!(window.is_full());
}
