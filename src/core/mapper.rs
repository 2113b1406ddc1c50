//! Screen/date correspondence for the timeline axis.
//!
//! Every function here is pure: the same viewport, width and record always
//! produce the same window and coordinates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::date_math::{add_days, add_months, days_in_month_of};
use crate::core::primitives::ensure_positive;
use crate::core::viewport::MIN_MONTHS_VISIBLE;
use crate::core::{Record, ViewportState};
use crate::error::{ChartError, ChartResult};

/// Calendar window currently covered by the chart area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Pixel distance from the chart's left edge to the first month boundary.
    pub leading_offset_px: OrderedPx,
    /// First-of-month dates, `months_visible + 1` entries.
    pub month_boundaries: SmallVec<[NaiveDate; 8]>,
}

/// Pixel value compared bit-for-bit, so windows can be checked for identity.
pub type OrderedPx = ordered_float::OrderedFloat<f64>;

impl DateWindow {
    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whole days between start and end.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days().abs()
    }

    #[must_use]
    pub fn leading_offset(&self) -> f64 {
        self.leading_offset_px.into_inner()
    }
}

/// Derives the visible date window from the viewport state.
pub fn compute_window(viewport: &ViewportState, chart_width_px: f64) -> ChartResult<DateWindow> {
    ensure_positive(chart_width_px, "chart width")?;
    let pixels_per_day = ensure_positive(viewport.pixels_per_day(), "pixels per day")?;
    if viewport.months_visible() < MIN_MONTHS_VISIBLE {
        return Err(ChartError::InvalidData(format!(
            "months visible must be >= {MIN_MONTHS_VISIBLE}"
        )));
    }

    let effective_offset = viewport.effective_offset_px();
    if !effective_offset.is_finite() {
        return Err(ChartError::InvalidData(
            "scroll offset must be finite".to_owned(),
        ));
    }

    let total_scroll_days = (effective_offset / pixels_per_day).floor() as i64;
    let start_date = add_days(viewport.origin_date(), -total_scroll_days);

    let (leading_offset_px, first_boundary) = if start_date.day() == 1 {
        (0.0, start_date)
    } else {
        let remaining_days = days_in_month_of(start_date) - start_date.day();
        let leading_offset_px = match viewport.rest_leading_offset_px() {
            Some(rest) if effective_offset == 0.0 => rest,
            _ => pixels_per_day * f64::from(remaining_days),
        };
        (
            leading_offset_px,
            add_months(start_date.with_day(1).unwrap_or(start_date), 1),
        )
    };

    let month_boundaries = (0..=viewport.months_visible())
        .map(|index| add_months(first_boundary, index as i32))
        .collect();

    let visible_days = (chart_width_px / pixels_per_day).floor() as i64;
    let end_date = add_days(start_date, visible_days);

    Ok(DateWindow {
        start_date,
        end_date,
        leading_offset_px: ordered_float::OrderedFloat(leading_offset_px),
        month_boundaries,
    })
}

/// Bubble diameter proportional to the record's share of the largest revenue.
pub fn marker_diameter(record: &Record, max_revenue: f64, base_diameter: f64) -> ChartResult<f64> {
    if !max_revenue.is_finite() || max_revenue <= 0.0 {
        return Err(ChartError::InvalidData(
            "max revenue must be finite and > 0 to size markers".to_owned(),
        ));
    }
    ensure_positive(base_diameter, "base marker diameter")?;
    Ok((base_diameter * (record.revenue / max_revenue)).round())
}

/// Half the marker size as used for centring, rounded to whole pixels.
#[must_use]
pub fn marker_radius(diameter: f64) -> f64 {
    (diameter / 2.0).round()
}

/// Left edge of the marker, centred on its close date.
#[must_use]
pub fn map_record_to_x(
    record: &Record,
    window: &DateWindow,
    pixels_per_day: f64,
    diameter: f64,
) -> f64 {
    let days = (record.close_date - window.start_date).num_days();
    days as f64 * pixels_per_day - marker_radius(diameter)
}

/// Top edge of the marker: 100% probability sits on the top edge of the chart.
#[must_use]
pub fn map_record_to_y(record: &Record, chart_height_px: f64, diameter: f64) -> f64 {
    (chart_height_px - (record.probability / 100.0) * chart_height_px - diameter / 2.0).round()
}

/// Position and size of one marker in chart-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl MarkerGeometry {
    #[must_use]
    pub fn radius(self) -> f64 {
        marker_radius(self.diameter)
    }

    /// Whether a chart-local point falls inside the marker's circle.
    #[must_use]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        let radius = self.diameter / 2.0;
        let dx = x - (self.x + self.radius());
        let dy = y - (self.y + self.radius());
        dx * dx + dy * dy <= radius * radius
    }
}

pub fn marker_geometry(
    record: &Record,
    window: &DateWindow,
    pixels_per_day: f64,
    chart_height_px: f64,
    max_revenue: f64,
    base_diameter: f64,
) -> ChartResult<MarkerGeometry> {
    let diameter = marker_diameter(record, max_revenue, base_diameter)?;
    Ok(MarkerGeometry {
        x: map_record_to_x(record, window, pixels_per_day, diameter),
        y: map_record_to_y(record, chart_height_px, diameter),
        diameter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn window_starting_on_first_has_no_leading_offset() {
        let viewport = ViewportState::new(date(2012, 1, 1), 5.0, 3).expect("viewport");
        let window = compute_window(&viewport, 450.0).expect("window");
        assert_eq!(window.start_date, date(2012, 1, 1));
        assert_eq!(window.leading_offset(), 0.0);
        assert_eq!(
            window.month_boundaries.as_slice(),
            &[
                date(2012, 1, 1),
                date(2012, 2, 1),
                date(2012, 3, 1),
                date(2012, 4, 1)
            ]
        );
        assert_eq!(window.end_date, date(2012, 3, 31));
    }

    #[test]
    fn mid_month_start_offsets_first_boundary() {
        let viewport = ViewportState::new(date(2011, 12, 29), 5.0, 3).expect("viewport");
        let window = compute_window(&viewport, 450.0).expect("window");
        assert_eq!(window.start_date, date(2011, 12, 29));
        assert_eq!(window.leading_offset(), 10.0);
        assert_eq!(window.month_boundaries[0], date(2012, 1, 1));
        assert_eq!(window.month_boundaries.len(), 4);
    }

    #[test]
    fn anchored_window_at_rest_uses_configured_leading_offset() {
        let (mut viewport, leading) =
            ViewportState::anchored(date(2011, 12, 1), 460.0, 10.0, 3).expect("anchored");
        let window = compute_window(&viewport, 460.0).expect("window");
        assert_eq!(window.start_date, date(2011, 11, 29));
        assert_eq!(window.leading_offset(), leading);

        let first = Record::new("Apollo", "Adobe", 250_000.0, date(2011, 12, 1), 30.0);
        let geometry = marker_geometry(&first, &window, 5.0, 200.0, 700_000.0, 67.0)
            .expect("geometry");
        assert_eq!(geometry.x + geometry.radius(), window.leading_offset());

        viewport.set_pending_drag_offset(3.0).expect("pending");
        let window = compute_window(&viewport, 460.0).expect("window");
        assert_eq!(window.start_date, date(2011, 11, 29));
        assert_eq!(window.leading_offset(), 5.0);
    }

    #[test]
    fn deserialized_zero_density_never_reaches_the_mapper() {
        let json = r#"{"origin_date":"2012-01-01","pixels_per_day":0.0,"months_visible":3}"#;
        let result = serde_json::from_str::<ViewportState>(json);
        assert!(result.is_err());
    }

    #[test]
    fn positive_offset_scrolls_back_in_time() {
        let mut viewport = ViewportState::new(date(2012, 1, 1), 5.0, 3).expect("viewport");
        viewport.set_pending_drag_offset(12.0).expect("pending");
        let window = compute_window(&viewport, 450.0).expect("window");
        assert_eq!(window.start_date, date(2011, 12, 30));

        viewport.set_pending_drag_offset(-12.0).expect("pending");
        let window = compute_window(&viewport, 450.0).expect("window");
        assert_eq!(window.start_date, date(2012, 1, 4));
    }

    #[test]
    fn record_scenario_maps_to_expected_geometry() {
        let viewport = ViewportState::new(date(2012, 1, 1), 5.0, 3).expect("viewport");
        let window = compute_window(&viewport, 450.0).expect("window");
        let record = Record::new("Gamma", "JetBlue", 300_000.0, date(2012, 1, 15), 60.0);

        let geometry = marker_geometry(&record, &window, 5.0, 200.0, 700_000.0, 60.0)
            .expect("geometry");
        assert_eq!(geometry.diameter, 26.0);
        assert_eq!(geometry.y, 67.0);
        assert_eq!(geometry.x, 14.0 * 5.0 - 13.0);
    }

    #[test]
    fn zero_max_revenue_is_rejected() {
        let record = Record::new("Gamma", "JetBlue", 0.0, date(2012, 1, 15), 60.0);
        assert!(marker_diameter(&record, 0.0, 60.0).is_err());
    }

    #[test]
    fn geometry_hit_test_uses_circle() {
        let geometry = MarkerGeometry {
            x: 10.0,
            y: 10.0,
            diameter: 20.0,
        };
        assert!(geometry.contains_point(20.0, 20.0));
        assert!(geometry.contains_point(29.0, 20.0));
        assert!(!geometry.contains_point(10.5, 10.5));
    }
}
