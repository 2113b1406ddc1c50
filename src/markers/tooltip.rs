use serde::{Deserialize, Serialize};

use crate::core::date_math::{format_thousands, format_tooltip_date};
use crate::core::{MarkerGeometry, Record};

/// Side of the marker the tooltip is attached to; also selects the arrow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipSide {
    Right,
    Left,
    Above,
    Below,
}

/// Tooltip box size as measured by the host after filling in the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    /// Emphasized first line.
    pub headline: String,
    pub lines: Vec<String>,
}

/// Tooltip position in plot-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub side: TooltipSide,
    pub left_px: f64,
    pub top_px: f64,
}

#[must_use]
pub fn tooltip_content(record: &Record) -> TooltipContent {
    TooltipContent {
        headline: format!("Project: {}", record.project),
        lines: vec![
            format!("Account: {}", record.account),
            format!("Revenue: ${}", format_thousands(record.revenue)),
            format!("Close Date: {}", format_tooltip_date(record.close_date)),
            format!("Probability: {}%", record.probability),
        ],
    }
}

/// Places the tooltip next to a marker.
///
/// Markers on the right half of the chart get the tooltip on their left and
/// vice versa, vertically centred on the marker. When that would cross the top
/// or bottom of the plot area the tooltip moves below or above the marker,
/// horizontally centred.
#[must_use]
pub fn place_tooltip(
    marker: MarkerGeometry,
    tooltip: TooltipSize,
    chart_width_px: f64,
    chart_height_px: f64,
) -> TooltipPlacement {
    let radius = marker.radius();
    let centred_top = marker.y - tooltip.height / 2.0 + radius;
    let centred_left = marker.x - tooltip.width / 2.0 + radius;

    if centred_top < 0.0 {
        return TooltipPlacement {
            side: TooltipSide::Below,
            left_px: centred_left,
            top_px: marker.y + radius * 2.0,
        };
    }
    if centred_top + tooltip.height > chart_height_px {
        return TooltipPlacement {
            side: TooltipSide::Above,
            left_px: centred_left,
            top_px: marker.y - tooltip.height,
        };
    }

    if chart_width_px / 2.0 < marker.x {
        TooltipPlacement {
            side: TooltipSide::Left,
            left_px: marker.x - tooltip.width,
            top_px: centred_top,
        }
    } else {
        TooltipPlacement {
            side: TooltipSide::Right,
            left_px: marker.x + radius * 2.0,
            top_px: centred_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const SIZE: TooltipSize = TooltipSize {
        width: 120.0,
        height: 80.0,
    };

    fn marker(x: f64, y: f64) -> MarkerGeometry {
        MarkerGeometry {
            x,
            y,
            diameter: 20.0,
        }
    }

    #[test]
    fn content_lists_record_fields() {
        let record = Record::new(
            "Omega",
            "McDonald's Corp",
            300_000.0,
            NaiveDate::from_ymd_opt(2012, 3, 27).expect("valid date"),
            60.0,
        );
        let content = tooltip_content(&record);
        assert_eq!(content.headline, "Project: Omega");
        assert_eq!(
            content.lines,
            vec![
                "Account: McDonald's Corp".to_owned(),
                "Revenue: $300,000".to_owned(),
                "Close Date: 3/27/12".to_owned(),
                "Probability: 60%".to_owned(),
            ]
        );
    }

    #[test]
    fn left_half_markers_get_tooltip_on_the_right() {
        let placement = place_tooltip(marker(50.0, 100.0), SIZE, 400.0, 300.0);
        assert_eq!(placement.side, TooltipSide::Right);
        assert_eq!(placement.left_px, 70.0);
        assert_eq!(placement.top_px, 70.0);
    }

    #[test]
    fn right_half_markers_get_tooltip_on_the_left() {
        let placement = place_tooltip(marker(300.0, 100.0), SIZE, 400.0, 300.0);
        assert_eq!(placement.side, TooltipSide::Left);
        assert_eq!(placement.left_px, 180.0);
    }

    #[test]
    fn markers_near_edges_flip_vertically() {
        let top = place_tooltip(marker(50.0, 5.0), SIZE, 400.0, 300.0);
        assert_eq!(top.side, TooltipSide::Below);
        assert_eq!(top.top_px, 25.0);
        assert_eq!(top.left_px, 0.0);

        let bottom = place_tooltip(marker(50.0, 270.0), SIZE, 400.0, 300.0);
        assert_eq!(bottom.side, TooltipSide::Above);
        assert_eq!(bottom.top_px, 190.0);
    }
}
