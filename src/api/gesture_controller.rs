use tracing::{debug, trace};

use crate::core::DensityChange;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragRelease, DragUpdate, GestureSource, GestureTarget};
use crate::render::Renderer;

use super::ChartEngine;
use super::render_coordinator::RedrawOutcome;

/// What a gesture event did to the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// Orphaned or rejected event; nothing changed.
    Ignored,
    Started,
    /// Pan moved the window; a redraw was attempted.
    Panned {
        pending_offset_px: f64,
        redraw: RedrawOutcome,
    },
    /// Only the dragged handle moved; the chart is recomputed on release.
    DensityHandleMoved { handle: usize, handle_x: f64 },
    PanCommitted { scroll_offset_px: f64 },
    DensityCommitted {
        change: DensityChange,
        redraw: RedrawOutcome,
    },
    Cancelled { redraw: RedrawOutcome },
}

impl<R: Renderer> ChartEngine<R> {
    /// Starts a pan on the chart body or a density drag on a month-line handle.
    ///
    /// Density drags need the handle positions of a previous render.
    pub fn gesture_start(
        &mut self,
        target: GestureTarget,
        source: GestureSource,
        pointer_x: f64,
    ) -> ChartResult<GestureEffect> {
        let start_value = match target {
            GestureTarget::ChartBody => self.viewport.scroll_offset_px(),
            GestureTarget::DensityHandle(index) => self
                .density_handles
                .get(index)
                .copied()
                .flatten()
                .ok_or_else(|| {
                    ChartError::InvalidData(format!("density handle {index} is not visible"))
                })?,
        };

        if !self
            .drag
            .on_gesture_start(target, source, pointer_x, start_value)?
        {
            return Ok(GestureEffect::Ignored);
        }

        trace!(?target, ?source, pointer_x, "gesture started");
        if target == GestureTarget::ChartBody {
            self.tooltip = None;
        }
        Ok(GestureEffect::Started)
    }

    pub fn gesture_move(&mut self, pointer_x: f64) -> ChartResult<GestureEffect> {
        match self.drag.on_gesture_move(pointer_x)? {
            DragUpdate::Ignored => Ok(GestureEffect::Ignored),
            DragUpdate::PanMoved { pending_offset_px } => {
                self.viewport.set_pending_drag_offset(pending_offset_px)?;
                self.tooltip = None;
                let redraw = self.render()?;
                Ok(GestureEffect::Panned {
                    pending_offset_px,
                    redraw,
                })
            }
            DragUpdate::DensityHandleMoved { handle, handle_x } => {
                self.dragged_handle = Some((handle, handle_x));
                Ok(GestureEffect::DensityHandleMoved { handle, handle_x })
            }
        }
    }

    /// Ends the active gesture. `pointer_x` may be `None` for touch ends that
    /// carry no position.
    pub fn gesture_end(&mut self, pointer_x: Option<f64>) -> ChartResult<GestureEffect> {
        match self.drag.on_gesture_end(pointer_x)? {
            DragRelease::Ignored => Ok(GestureEffect::Ignored),
            DragRelease::PanReleased => {
                self.viewport.commit_pending_drag();
                trace!(
                    scroll_offset_px = self.viewport.scroll_offset_px(),
                    "pan committed"
                );
                Ok(GestureEffect::PanCommitted {
                    scroll_offset_px: self.viewport.scroll_offset_px(),
                })
            }
            DragRelease::DensityReleased { handle, delta_px } => {
                self.dragged_handle = None;
                let change = self.viewport.apply_density_delta(
                    delta_px,
                    self.layout.chart_width_px,
                    self.leading_origin_px,
                    self.config.min_pixels_per_day,
                )?;
                debug!(
                    handle,
                    delta_px,
                    pixels_per_day = change.pixels_per_day,
                    months_visible = change.months_visible,
                    clamped = change.clamped_to_min_months,
                    "density committed"
                );
                let redraw = self.render()?;
                Ok(GestureEffect::DensityCommitted { change, redraw })
            }
        }
    }

    /// Abandons the active gesture, dropping any uncommitted pan offset.
    pub fn cancel_gesture(&mut self) -> ChartResult<GestureEffect> {
        if self.drag.cancel().is_none() {
            return Ok(GestureEffect::Ignored);
        }
        self.viewport.discard_pending_drag();
        self.dragged_handle = None;
        let redraw = self.render()?;
        Ok(GestureEffect::Cancelled { redraw })
    }
}
