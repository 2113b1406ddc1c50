use ordered_float::OrderedFloat;

use crate::error::{ChartError, ChartResult};
use crate::markers::{MarkerId, TooltipContent, TooltipSize, place_tooltip, tooltip_content};
use crate::render::{Renderer, TooltipFrame};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Tooltip text for a bound marker, for hosts that measure before placing.
    pub fn tooltip_content_for(&self, marker: MarkerId) -> ChartResult<Option<TooltipContent>> {
        let handle = self
            .pool
            .handle(marker)
            .ok_or(ChartError::UnknownMarker(marker))?;
        Ok(handle
            .bound_record
            .and_then(|record| self.records.get(record.0))
            .map(tooltip_content))
    }

    /// Shows the tooltip for a hovered or touched marker.
    ///
    /// Returns `None` while panning or when the marker is not bound to a record.
    pub fn show_tooltip(
        &mut self,
        marker: MarkerId,
        size: TooltipSize,
    ) -> ChartResult<Option<&TooltipFrame>> {
        if self.drag.is_panning() {
            return Ok(None);
        }
        if !size.width.is_finite() || !size.height.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip size must be finite".to_owned(),
            ));
        }

        let handle = *self
            .pool
            .handle(marker)
            .ok_or(ChartError::UnknownMarker(marker))?;
        let Some(record) = handle
            .bound_record
            .and_then(|record| self.records.get(record.0))
        else {
            return Ok(None);
        };

        self.tooltip = Some(TooltipFrame {
            marker,
            content: tooltip_content(record),
            placement: place_tooltip(
                handle.geometry,
                size,
                self.layout.chart_width_px,
                self.layout.chart_height_px,
            ),
        });
        Ok(self.tooltip.as_ref())
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipFrame> {
        self.tooltip.as_ref()
    }

    /// Bound marker under a plot-area point; the smallest one wins on overlap.
    #[must_use]
    pub fn marker_at(&self, x: f64, y: f64) -> Option<MarkerId> {
        self.pool
            .active_handles()
            .filter(|handle| handle.visible && handle.geometry.contains_point(x, y))
            .min_by_key(|handle| OrderedFloat(handle.geometry.diameter))
            .map(|handle| handle.id)
    }
}
