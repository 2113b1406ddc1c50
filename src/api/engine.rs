use chrono::NaiveDate;
use tracing::debug;

use crate::core::{
    ChartLayout, DateWindow, Record, RecordId, Viewport, ViewportState, validate_records,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragController, InteractionMode};
use crate::markers::{ElementPool, MarkerHandle, MarkerId};
use crate::render::{Renderer, TooltipFrame};

use super::render_coordinator::{RedrawOutcome, RenderCoordinator};
use super::{ChartEngineConfig, PlotHook, WindowSummary};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the record set, the viewport state, the marker pool and
/// the gesture state, and hands finished frames to the renderer. All methods
/// take `&mut self`; hosts with several UI threads must funnel calls onto one.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) layout: ChartLayout,
    pub(super) viewport: ViewportState,
    /// Leading offset the density fallback subtracts when fitting two months.
    pub(super) leading_origin_px: f64,
    pub(super) records: Vec<Record>,
    pub(super) max_revenue: f64,
    /// Record index to bound marker.
    pub(super) bindings: Vec<Option<MarkerId>>,
    pub(super) pool: ElementPool,
    pub(super) drag: DragController,
    /// Plot-area x of each density handle from the last frame; `None` when hidden.
    pub(super) density_handles: Vec<Option<f64>>,
    /// Density handle under an active drag, with its live plot-area x.
    pub(super) dragged_handle: Option<(usize, f64)>,
    pub(super) tooltip: Option<TooltipFrame>,
    pub(super) plot_hook: Option<Box<dyn PlotHook>>,
    pub(super) redraw_in_flight: bool,
    pub(super) last_window: Option<DateWindow>,
    pub(super) last_summary: Option<WindowSummary>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Builds an engine for `records`, which must be sorted ascending by close date.
    pub fn new(renderer: R, config: ChartEngineConfig, records: Vec<Record>) -> ChartResult<Self> {
        let config = config.validate()?;
        let max_revenue = validate_records(&records)?;
        let (layout, viewport, leading_origin_px) = initial_state(config, &records)?;
        debug!(
            records = records.len(),
            max_revenue,
            chart_width = layout.chart_width_px,
            chart_height = layout.chart_height_px,
            pixels_per_day = viewport.pixels_per_day(),
            "chart engine initialized"
        );

        Ok(Self {
            renderer,
            config,
            layout,
            viewport,
            leading_origin_px,
            bindings: vec![None; records.len()],
            records,
            max_revenue,
            pool: ElementPool::new(config.marker_park_offset_px),
            drag: DragController::default(),
            density_handles: Vec::new(),
            dragged_handle: None,
            tooltip: None,
            plot_hook: None,
            redraw_in_flight: false,
            last_window: None,
            last_summary: None,
        })
    }

    /// Replaces the record set, keeping scroll position and density.
    ///
    /// Every bound marker goes back to the pool; the next render rebinds the
    /// new records that fall inside the window.
    pub fn set_records(&mut self, records: Vec<Record>) -> ChartResult<()> {
        let max_revenue = validate_records(&records)?;
        self.release_all_markers()?;
        debug!(records = records.len(), max_revenue, "set records");
        self.bindings = vec![None; records.len()];
        self.records = records;
        self.max_revenue = max_revenue;
        self.tooltip = None;
        Ok(())
    }

    /// Discards all marker elements and bindings and rebuilds layout and
    /// viewport state against a new container size.
    ///
    /// Scroll position and density return to their initial values.
    pub fn update_size(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.config;
        config.viewport = viewport;
        let config = config.validate()?;
        let (layout, state, leading_origin_px) = initial_state(config, &self.records)?;

        self.config = config;
        self.layout = layout;
        self.viewport = state;
        self.leading_origin_px = leading_origin_px;
        self.pool.clear();
        self.bindings.iter_mut().for_each(|binding| *binding = None);
        self.drag.cancel();
        self.density_handles.clear();
        self.dragged_handle = None;
        self.tooltip = None;
        self.last_window = None;
        self.last_summary = None;
        debug!(
            width = viewport.width,
            height = viewport.height,
            pixels_per_day = self.viewport.pixels_per_day(),
            "chart resized"
        );
        Ok(())
    }

    /// Installs a custom plot pass in place of the built-in bubbles.
    ///
    /// Markers bound so far are released to the pool.
    pub fn set_plot_hook(&mut self, hook: impl PlotHook + 'static) -> ChartResult<()> {
        self.release_all_markers()?;
        self.tooltip = None;
        self.plot_hook = Some(Box::new(hook));
        Ok(())
    }

    pub fn clear_plot_hook(&mut self) {
        self.plot_hook = None;
    }

    pub fn render(&mut self) -> ChartResult<RedrawOutcome> {
        RenderCoordinator::render(self)
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn max_revenue(&self) -> f64 {
        self.max_revenue
    }

    #[must_use]
    pub fn marker_pool(&self) -> &ElementPool {
        &self.pool
    }

    /// Marker currently bound to a record, if the record is inside the window.
    #[must_use]
    pub fn marker_for(&self, record: RecordId) -> Option<MarkerId> {
        self.bindings.get(record.0).copied().flatten()
    }

    #[must_use]
    pub fn marker_handle(&self, marker: MarkerId) -> Option<&MarkerHandle> {
        self.pool.handle(marker)
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.drag.mode()
    }

    /// Window computed by the last render, if any.
    #[must_use]
    pub fn current_window(&self) -> Option<&DateWindow> {
        self.last_window.as_ref()
    }

    #[must_use]
    pub fn current_summary(&self) -> Option<&WindowSummary> {
        self.last_summary.as_ref()
    }

    #[must_use]
    pub fn is_redraw_in_flight(&self) -> bool {
        self.redraw_in_flight
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn release_all_markers(&mut self) -> ChartResult<()> {
        for binding in &mut self.bindings {
            if let Some(marker) = binding.take() {
                self.pool.release(marker)?;
            }
        }
        Ok(())
    }
}

fn initial_state(
    config: ChartEngineConfig,
    records: &[Record],
) -> ChartResult<(ChartLayout, ViewportState, f64)> {
    let layout = ChartLayout::resolve(
        config.viewport,
        config.title_height_px,
        config.gutters,
        config.marker_diameter_ratio,
        config.y_tick_count,
    )?;
    let first_date = first_close_date(records)?;
    let (viewport, leading_origin_px) = ViewportState::anchored(
        first_date,
        layout.chart_width_px,
        config.leading_offset_px,
        config.initial_months_visible,
    )?;
    Ok((layout, viewport, leading_origin_px))
}

fn first_close_date(records: &[Record]) -> ChartResult<NaiveDate> {
    records
        .first()
        .map(|record| record.close_date)
        .ok_or_else(|| ChartError::InvalidData("record set must not be empty".to_owned()))
}
