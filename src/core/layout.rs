use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plot area for labels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGutters {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for ChartGutters {
    fn default() -> Self {
        Self {
            left: 45.0,
            top: 10.0,
            right: 0.0,
            bottom: 25.0,
        }
    }
}

impl ChartGutters {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.left, "left"),
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "gutter `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Resolved geometry of one chart instance.
///
/// The canvas sits under a title block of `title_height_px`; the plot area is
/// the canvas minus gutters. Axis primitives use canvas coordinates, markers
/// and density handles use plot-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub container: Viewport,
    pub title_height_px: f64,
    pub canvas_width_px: f64,
    pub canvas_height_px: f64,
    pub gutters: ChartGutters,
    pub chart_width_px: f64,
    pub chart_height_px: f64,
    pub base_marker_diameter_px: f64,
    pub y_tick_count: u32,
    pub y_tick_spacing_px: f64,
}

impl ChartLayout {
    pub fn resolve(
        container: Viewport,
        title_height_px: f64,
        gutters: ChartGutters,
        marker_diameter_ratio: f64,
        y_tick_count: u32,
    ) -> ChartResult<Self> {
        if !container.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: container.width,
                height: container.height,
            });
        }
        let gutters = gutters.validate()?;
        if !title_height_px.is_finite() || title_height_px < 0.0 {
            return Err(ChartError::InvalidData(
                "title height must be finite and >= 0".to_owned(),
            ));
        }
        if !marker_diameter_ratio.is_finite() || marker_diameter_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker diameter ratio must be finite and > 0".to_owned(),
            ));
        }
        if y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "y tick count must be > 0".to_owned(),
            ));
        }

        let canvas_width_px = f64::from(container.width);
        let canvas_height_px = f64::from(container.height) - title_height_px;
        let chart_width_px = canvas_width_px - gutters.left - gutters.right;
        let chart_height_px = canvas_height_px - gutters.top - gutters.bottom;
        if chart_width_px <= 0.0 || chart_height_px <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: container.width,
                height: container.height,
            });
        }

        let base_marker_diameter_px =
            (chart_height_px.min(chart_width_px) * marker_diameter_ratio).round();
        if base_marker_diameter_px <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: container.width,
                height: container.height,
            });
        }

        Ok(Self {
            container,
            title_height_px,
            canvas_width_px,
            canvas_height_px,
            gutters,
            chart_width_px,
            chart_height_px,
            base_marker_diameter_px,
            y_tick_count,
            y_tick_spacing_px: (chart_height_px / f64::from(y_tick_count)).floor(),
        })
    }

    /// Plot-area left edge in canvas coordinates.
    #[must_use]
    pub fn plot_left(&self) -> f64 {
        self.gutters.left
    }

    /// Plot-area top edge in canvas coordinates.
    #[must_use]
    pub fn plot_top(&self) -> f64 {
        self.gutters.top
    }

    /// Plot-area bottom edge in canvas coordinates.
    #[must_use]
    pub fn plot_bottom(&self) -> f64 {
        self.gutters.top + self.chart_height_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_subtracts_title_and_gutters() {
        let layout = ChartLayout::resolve(
            Viewport::new(505, 275),
            40.0,
            ChartGutters::default(),
            1.0 / 3.0,
            5,
        )
        .expect("layout");
        assert_eq!(layout.chart_width_px, 460.0);
        assert_eq!(layout.chart_height_px, 200.0);
        assert_eq!(layout.base_marker_diameter_px, 67.0);
        assert_eq!(layout.y_tick_spacing_px, 40.0);
        assert_eq!(layout.plot_bottom(), 210.0);
    }

    #[test]
    fn layout_rejects_degenerate_plot_area() {
        let err = ChartLayout::resolve(
            Viewport::new(40, 400),
            40.0,
            ChartGutters::default(),
            1.0 / 3.0,
            5,
        )
        .expect_err("too narrow");
        assert!(matches!(err, ChartError::InvalidViewport { .. }));
    }
}
