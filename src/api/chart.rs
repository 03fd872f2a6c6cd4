use tracing::{debug, trace, warn};

use crate::core::{DataMap, EventMarker, Viewport, time_extent};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CrosshairState, GestureState, InteractionMode, ZoomOutcome, ZoomWindow};
use crate::render::Renderer;

use super::{ChartConfig, HitCache, PlottedPoint, RenderState, RenderStatePatch};

/// One interactive chart session bound to a drawing surface.
///
/// Owns the symbol data, render state, zoom window and short-lived gesture
/// state. Every mutation ends with a full, synchronous render; hit boxes are
/// rebuilt by each render and only read by the next input event.
pub struct Chart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: ChartConfig,
    pub(super) data: DataMap,
    pub(super) common_events: Vec<EventMarker>,
    pub(super) state: RenderState,
    pub(super) zoom: ZoomWindow,
    pub(super) gesture: GestureState,
    pub(super) crosshair: CrosshairState,
    pub(super) hovered_point: Option<PlottedPoint>,
    /// Minimum drag width of the press in progress (mouse or touch).
    pub(super) drag_min_px: f64,
    pub(super) hits: HitCache,
    pub(super) destroyed: bool,
}

impl<R: Renderer> Chart<R> {
    /// Creates the session and performs the initial render.
    pub fn new(
        renderer: R,
        viewport: Viewport,
        data: DataMap,
        common_events: Vec<EventMarker>,
        initial_state: RenderState,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;
        initial_state.validate()?;

        let mut chart = Self {
            renderer,
            viewport,
            config,
            data,
            common_events,
            state: initial_state,
            zoom: ZoomWindow::FULL,
            gesture: GestureState::default(),
            crosshair: CrosshairState::default(),
            hovered_point: None,
            drag_min_px: crate::interaction::MIN_DRAG_MOUSE_PX,
            hits: HitCache::default(),
            destroyed: false,
        };
        debug!(
            symbols = chart.data.len(),
            common_events = chart.common_events.len(),
            "create chart"
        );
        chart.render()?;
        Ok(chart)
    }

    /// Replaces all symbol data and common events. Zoom, gesture and render
    /// state are kept.
    pub fn set_data(&mut self, data: DataMap, common_events: Vec<EventMarker>) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        debug!(
            symbols = data.len(),
            common_events = common_events.len(),
            "set chart data"
        );
        self.data = data;
        self.common_events = common_events;
        self.hovered_point = None;
        self.render()
    }

    /// Shallow-merges `patch` into the render state and renders.
    ///
    /// A patch producing an invalid state is rejected as a whole.
    pub fn update_state(&mut self, patch: RenderStatePatch) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let mut next = self.state.clone();
        next.merge(patch);
        if let Err(err) = next.validate() {
            warn!(error = %err, "rejecting render state update");
            return Err(err);
        }
        self.state = next;
        if self
            .hovered_point
            .as_ref()
            .is_some_and(|point| !self.state.is_drawn(&point.symbol) || !self.state.show_points)
        {
            self.hovered_point = None;
        }
        debug!("update render state");
        self.render()
    }

    /// Copy of the current render state.
    #[must_use]
    pub fn state(&self) -> RenderState {
        self.state.clone()
    }

    #[must_use]
    pub fn zoom_window(&self) -> ZoomWindow {
        self.zoom
    }

    /// Replaces the zoom window programmatically.
    pub fn set_zoom_window(&mut self, window: ZoomWindow) -> ChartResult<()> {
        let window = ZoomWindow::new(window.start, window.end)?;
        if self.destroyed {
            return Ok(());
        }
        self.zoom = window;
        self.gesture.cancel();
        debug!(start = window.start, end = window.end, "set zoom window");
        self.render()
    }

    pub fn zoom_in(&mut self, focus_pct: Option<f64>) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let outcome = self.zoom.zoom_in(focus_pct);
        self.finish_zoom_change(outcome, "zoom in");
        self.render()
    }

    pub fn zoom_out(&mut self, focus_pct: Option<f64>) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let outcome = self.zoom.zoom_out(focus_pct);
        self.finish_zoom_change(outcome, "zoom out");
        self.render()
    }

    /// Restores the full window and drops every transient gesture.
    pub fn zoom_reset(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.reset_zoom_state();
        self.render()
    }

    pub(super) fn reset_zoom_state(&mut self) {
        self.zoom.reset();
        self.gesture.cancel();
        debug!("reset zoom");
    }

    pub(super) fn finish_zoom_change(&mut self, outcome: ZoomOutcome, action: &'static str) {
        match outcome {
            ZoomOutcome::Unchanged => trace!(action, "zoom unchanged"),
            ZoomOutcome::Changed => debug!(
                action,
                start = self.zoom.start,
                end = self.zoom.end,
                "zoom window changed"
            ),
            ZoomOutcome::SnappedToFull => {
                self.gesture.end_pan();
                debug!(action, "zoom window snapped to full");
            }
        }
    }

    /// Applies a new surface size and renders.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.destroyed {
            return Ok(());
        }
        debug!(width = viewport.width, height = viewport.height, "resize chart");
        self.viewport = viewport;
        self.render()
    }

    /// Detaches the chart from its surface. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.gesture.cancel();
        self.crosshair.on_pointer_leave();
        self.hovered_point = None;
        self.hits = HitCache::default();
        self.renderer.release();
        debug!("destroy chart");
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Rebuilds the frame and hit boxes from current state and hands the
    /// frame to the renderer. No-op after [`Chart::destroy`].
    pub fn render(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let (frame, hits) = self.build_render_frame();
        trace!(
            legend_items = hits.legend_items.len(),
            data_points = hits.data_points.len(),
            "render chart frame"
        );
        self.hits = hits;
        self.renderer.render(&frame)
    }

    /// Full time extent of enabled symbols over the displayed channels.
    #[must_use]
    pub fn time_domain(&self) -> Option<(f64, f64)> {
        let keys = &self.state.visible_chart_keys;
        time_extent(
            self.data
                .iter()
                .filter(|(symbol, _)| self.state.enabled_tickers.contains(symbol.as_str()))
                .flat_map(|(_, entry)| keys.iter().map(move |key| entry.channel(key))),
        )
    }

    /// Time domain narrowed by the render-state range window.
    #[must_use]
    pub fn range_window(&self) -> Option<(f64, f64)> {
        let (min, max) = self.time_domain()?;
        Some(self.state.range.apply(min, max))
    }

    /// Range window narrowed by the zoom window: what the frame shows.
    #[must_use]
    pub fn display_window(&self) -> Option<(f64, f64)> {
        let (start, end) = self.range_window()?;
        Some(self.zoom.apply(start, end))
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &DataMap {
        &self.data
    }

    #[must_use]
    pub fn common_events(&self) -> &[EventMarker] {
        &self.common_events
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.gesture.mode()
    }

    #[must_use]
    pub fn crosshair(&self) -> CrosshairState {
        self.crosshair
    }

    #[must_use]
    pub fn hovered_point(&self) -> Option<&PlottedPoint> {
        self.hovered_point.as_ref()
    }

    /// Hit boxes produced by the last render.
    #[must_use]
    pub fn hit_cache(&self) -> &HitCache {
        &self.hits
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
