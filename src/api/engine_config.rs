use serde::{Deserialize, Serialize};

use crate::core::viewport::{DEFAULT_MIN_PIXELS_PER_DAY, MIN_MONTHS_VISIBLE};
use crate::core::{ChartGutters, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::markers::DEFAULT_PARK_OFFSET_PX;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can ship chart setup as JSON next to their markup.
/// Every field except the container size has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    /// Height of the title block rendered above the canvas.
    #[serde(default = "default_title_height_px")]
    pub title_height_px: f64,
    #[serde(default)]
    pub gutters: ChartGutters,
    #[serde(default = "default_initial_months_visible")]
    pub initial_months_visible: u32,
    /// Minimum gap between the plot's left edge and the first month line.
    #[serde(default = "default_leading_offset_px")]
    pub leading_offset_px: f64,
    #[serde(default = "default_min_pixels_per_day")]
    pub min_pixels_per_day: f64,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: u32,
    /// Largest marker diameter as a fraction of the shorter plot side.
    #[serde(default = "default_marker_diameter_ratio")]
    pub marker_diameter_ratio: f64,
    #[serde(default = "default_axis_font_size_px")]
    pub axis_font_size_px: f64,
    #[serde(default = "default_marker_park_offset_px")]
    pub marker_park_offset_px: f64,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title_height_px: default_title_height_px(),
            gutters: ChartGutters::default(),
            initial_months_visible: default_initial_months_visible(),
            leading_offset_px: default_leading_offset_px(),
            min_pixels_per_day: default_min_pixels_per_day(),
            y_tick_count: default_y_tick_count(),
            marker_diameter_ratio: default_marker_diameter_ratio(),
            axis_font_size_px: default_axis_font_size_px(),
            marker_park_offset_px: default_marker_park_offset_px(),
        }
    }

    #[must_use]
    pub fn with_title_height(mut self, title_height_px: f64) -> Self {
        self.title_height_px = title_height_px;
        self
    }

    #[must_use]
    pub fn with_gutters(mut self, gutters: ChartGutters) -> Self {
        self.gutters = gutters;
        self
    }

    #[must_use]
    pub fn with_initial_months_visible(mut self, months: u32) -> Self {
        self.initial_months_visible = months;
        self
    }

    #[must_use]
    pub fn with_leading_offset(mut self, leading_offset_px: f64) -> Self {
        self.leading_offset_px = leading_offset_px;
        self
    }

    #[must_use]
    pub fn with_min_pixels_per_day(mut self, min_pixels_per_day: f64) -> Self {
        self.min_pixels_per_day = min_pixels_per_day;
        self
    }

    #[must_use]
    pub fn with_y_tick_count(mut self, y_tick_count: u32) -> Self {
        self.y_tick_count = y_tick_count;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.initial_months_visible < MIN_MONTHS_VISIBLE {
            return Err(ChartError::InvalidData(format!(
                "initial months visible must be >= {MIN_MONTHS_VISIBLE}"
            )));
        }
        for (value, name) in [
            (self.min_pixels_per_day, "min_pixels_per_day"),
            (self.axis_font_size_px, "axis_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.leading_offset_px.is_finite() || self.leading_offset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "config `leading_offset_px` must be finite and >= 0".to_owned(),
            ));
        }
        if !self.marker_park_offset_px.is_finite() {
            return Err(ChartError::InvalidData(
                "config `marker_park_offset_px` must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }
}

fn default_title_height_px() -> f64 {
    40.0
}

fn default_initial_months_visible() -> u32 {
    3
}

fn default_leading_offset_px() -> f64 {
    10.0
}

fn default_min_pixels_per_day() -> f64 {
    DEFAULT_MIN_PIXELS_PER_DAY
}

fn default_y_tick_count() -> u32 {
    5
}

fn default_marker_diameter_ratio() -> f64 {
    1.0 / 3.0
}

fn default_axis_font_size_px() -> f64 {
    15.0
}

fn default_marker_park_offset_px() -> f64 {
    DEFAULT_PARK_OFFSET_PX
}
