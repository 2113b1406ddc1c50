use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{DateWindow, RecordId, compute_window, marker_geometry};
use crate::error::ChartResult;
use crate::render::{MarkerPrimitive, RenderFrame, Renderer};

use super::axis_frame_builder::{AxisFrameInput, build_axis_layer, build_density_handles};
use super::{ChartEngine, PlotContext, WindowSummary};

/// Result of a render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawOutcome {
    Rendered,
    /// Another redraw was already running; the request was dropped, not queued.
    Skipped,
}

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<RedrawOutcome> {
        if engine.redraw_in_flight {
            debug!("redraw dropped while another redraw is in flight");
            return Ok(RedrawOutcome::Skipped);
        }

        engine.redraw_in_flight = true;
        let result = Self::render_pass(engine);
        engine.redraw_in_flight = false;

        if let Err(err) = &result {
            warn!(error = %err, "redraw failed");
        }
        result.map(|()| RedrawOutcome::Rendered)
    }

    fn render_pass<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<()> {
        let frame = engine.build_render_frame()?;
        engine.renderer.render(&frame)
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Recomputes the window, syncs marker bindings and builds the frame
    /// without handing it to the renderer.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let window = compute_window(&self.viewport, self.layout.chart_width_px)?;
        let mut frame = RenderFrame::new(self.layout.container);

        let axis_input = AxisFrameInput {
            layout: &self.layout,
            window: &window,
            pixels_per_day: self.viewport.pixels_per_day(),
            months_visible: self.viewport.months_visible(),
            font_size_px: self.config.axis_font_size_px,
            dragged_handle: self.dragged_handle,
        };
        let month_lines = build_axis_layer(&axis_input, &mut frame);
        self.density_handles = build_density_handles(
            &axis_input,
            &month_lines,
            self.density_handles.len(),
            &mut frame,
        );

        if let Some(hook) = self.plot_hook.as_mut() {
            hook.plot(
                PlotContext {
                    window: &window,
                    pixels_per_day: self.viewport.pixels_per_day(),
                    records: &self.records,
                    layout: &self.layout,
                },
                &mut frame,
            )?;
        } else {
            self.sync_markers(&window)?;
        }
        self.push_marker_primitives(&mut frame);

        if let Some(tooltip) = &self.tooltip {
            let still_bound = self
                .pool
                .handle(tooltip.marker)
                .is_some_and(|handle| handle.bound_record.is_some());
            if !still_bound {
                self.tooltip = None;
            }
        }
        frame.tooltip = self.tooltip.clone();

        let summary = WindowSummary::from_window(&window, &self.records);
        frame.title = Some(summary.title());
        trace!(
            start = %window.start_date,
            end = %window.end_date,
            visible = summary.visible_records,
            active_markers = self.pool.active_count(),
            idle_markers = self.pool.idle_count(),
            "frame built"
        );

        frame.window = Some(window.clone());
        self.last_summary = Some(summary);
        self.last_window = Some(window);
        Ok(frame)
    }

    /// Binds a marker to every record inside the window and releases the rest.
    fn sync_markers(&mut self, window: &DateWindow) -> ChartResult<()> {
        let pixels_per_day = self.viewport.pixels_per_day();
        let chart_height = self.layout.chart_height_px;
        let base_diameter = self.layout.base_marker_diameter_px;

        for (index, (record, binding)) in self
            .records
            .iter()
            .zip(self.bindings.iter_mut())
            .enumerate()
        {
            if !window.contains(record.close_date) {
                if let Some(marker) = binding.take() {
                    self.pool.release(marker)?;
                }
                continue;
            }

            let geometry = marker_geometry(
                record,
                window,
                pixels_per_day,
                chart_height,
                self.max_revenue,
                base_diameter,
            )?;
            match *binding {
                Some(marker) => self.pool.place(marker, geometry)?,
                None => {
                    let marker = self.pool.acquire();
                    self.pool.bind(marker, RecordId(index), geometry)?;
                    *binding = Some(marker);
                }
            }
        }
        Ok(())
    }

    fn push_marker_primitives(&self, frame: &mut RenderFrame) {
        frame.markers.extend(self.pool.handles().map(|handle| MarkerPrimitive {
            marker: handle.id,
            record: handle.bound_record,
            x: handle.geometry.x,
            y: handle.geometry.y,
            diameter: handle.geometry.diameter,
            visible: handle.visible,
        }));
    }
}
