use crate::core::{DateWindow, RecordId, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::markers::{MarkerId, TooltipContent, TooltipPlacement};
use crate::render::{LinePrimitive, MarkerStyle, RectPrimitive, TextPrimitive};

/// Host marker element update, in plot-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPrimitive {
    pub marker: MarkerId,
    pub record: Option<RecordId>,
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub visible: bool,
}

/// Draggable month line, in plot-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityHandlePrimitive {
    pub index: usize,
    pub x: f64,
    pub height: f64,
    pub visible: bool,
    /// `true` while this handle is being dragged.
    pub dragging: bool,
}

/// Two-line summary shown above the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTitle {
    pub range_line: String,
    pub revenue_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipFrame {
    pub marker: MarkerId,
    pub content: TooltipContent,
    pub placement: TooltipPlacement,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// `lines`, `rects` and `texts` live in canvas coordinates. Markers, density
/// handles and the tooltip are element updates relative to the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub window: Option<DateWindow>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub marker_style: MarkerStyle,
    pub markers: Vec<MarkerPrimitive>,
    pub density_handles: Vec<DensityHandlePrimitive>,
    pub title: Option<ChartTitle>,
    pub tooltip: Option<TooltipFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            window: None,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            marker_style: MarkerStyle::default(),
            markers: Vec::new(),
            density_handles: Vec::new(),
            title: None,
            tooltip: None,
        }
    }

    /// Markers currently bound to a record and shown.
    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerPrimitive> {
        self.markers.iter().filter(|marker| marker.visible)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        self.marker_style.validate()?;
        for marker in &self.markers {
            if !marker.x.is_finite() || !marker.y.is_finite() || !marker.diameter.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "marker {:?} geometry must be finite",
                    marker.marker
                )));
            }
            if marker.visible && marker.record.is_none() {
                return Err(ChartError::InvalidData(format!(
                    "visible marker {:?} must be bound to a record",
                    marker.marker
                )));
            }
        }
        for handle in &self.density_handles {
            if !handle.x.is_finite() || !handle.height.is_finite() {
                return Err(ChartError::InvalidData(
                    "density handle geometry must be finite".to_owned(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.markers.is_empty()
    }
}
